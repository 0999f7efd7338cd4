use std::fmt::Debug;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("`{0}` not piped")]
    StreamPipeError(String),

    #[error("signal delivery failed: `{0}`")]
    SignalError(String),

    #[error("io error: `{0}`")]
    IOError(#[from] std::io::Error),

    #[error("process termination is not supported on this platform")]
    Unsupported,
}
