use thiserror::Error;

use crate::command::CommandError;

#[derive(Error, Debug)]
pub enum StartError {
    #[error("server is already running")]
    AlreadyRunning,

    #[error("no project root available")]
    NoWorkspace,

    #[error("could not spawn the server process: `{0}`")]
    Spawn(#[from] CommandError),
}

#[derive(Error, Debug)]
pub enum StopError {
    #[error("server is not running")]
    NotRunning,

    #[error("could not terminate the server process: `{0}`")]
    Terminate(#[source] CommandError),
}
