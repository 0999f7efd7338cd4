use super::CommandError;

/// Requests termination of the process with the pid provided.
///
/// Signals are addressed by pid because the `Child` handle is owned by the
/// exit watcher, which is blocked in `wait`.
pub struct ProcessTerminator {
    pid: u32,
}

impl ProcessTerminator {
    pub fn new(pid: u32) -> Self {
        Self { pid }
    }

    #[cfg(target_family = "unix")]
    /// Asks the process to terminate with a SIGTERM. Delivery is not
    /// verified; the caller observes the actual exit elsewhere.
    pub fn terminate(&self) -> Result<(), CommandError> {
        self.signal(nix::sys::signal::Signal::SIGTERM)
    }

    #[cfg(target_family = "unix")]
    /// Force-kills the process with a SIGKILL.
    pub fn kill(&self) -> Result<(), CommandError> {
        self.signal(nix::sys::signal::Signal::SIGKILL)
    }

    #[cfg(target_family = "unix")]
    fn signal(&self, signal: nix::sys::signal::Signal) -> Result<(), CommandError> {
        use nix::unistd::Pid;
        nix::sys::signal::kill(Pid::from_raw(self.pid as i32), signal)
            .map_err(|err| CommandError::SignalError(err.to_string()))
    }

    #[cfg(not(target_family = "unix"))]
    pub fn terminate(&self) -> Result<(), CommandError> {
        Err(CommandError::Unsupported)
    }

    #[cfg(not(target_family = "unix"))]
    pub fn kill(&self) -> Result<(), CommandError> {
        Err(CommandError::Unsupported)
    }
}
