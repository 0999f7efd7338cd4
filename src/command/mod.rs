mod error;
mod resolver;
mod runner;
mod shutdown;
mod stream;

use std::process::ExitStatus;

use crate::event::channel::EventPublisher;

pub use error::CommandError;
pub use resolver::{isolated_interpreter, resolve_command, LaunchCommand};
pub use runner::ProcessRunner;
pub use shutdown::ProcessTerminator;
pub use stream::OutputEvent;

/// Trait that specifies the interface for launching a command
pub trait CommandExecutor {
    type Error: std::error::Error + Send + Sync;
    type Handle: CommandHandle;

    /// Spawns the command, handing back a handle to the live process
    fn start(self) -> Result<Self::Handle, Self::Error>;
}

/// Trait that specifies the interface for a launched process
pub trait CommandHandle {
    type Error: std::error::Error + Send + Sync;

    /// Blocks until the process exits and releases its resources
    fn wait(self) -> Result<ExitStatus, Self::Error>;

    fn get_pid(&self) -> u32;
}

/// Trait that specifies the interface for relaying process output
pub trait OutputStreamer {
    type Error: std::error::Error + Send + Sync;
    type Handle;

    /// Starts forwarding the process output, line by line, to the publisher
    fn stream(self, publisher: EventPublisher<OutputEvent>) -> Result<Self::Handle, Self::Error>;
}
