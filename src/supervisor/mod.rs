mod error;
mod sink;

use std::fmt;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;

use tracing::{debug, error};

use crate::command::{
    resolve_command, CommandExecutor, CommandHandle, OutputStreamer, ProcessRunner,
    ProcessTerminator,
};
use crate::config::ServerConfig;
use crate::event::channel::{pub_sub, EventPublisher};
use crate::utils::threads::spawn_named_thread;

pub use error::{StartError, StopError};
pub use sink::{ServerSink, TracingSink};

/// How a server process ended: exit code when it exited normally, signal
/// name when it was terminated by one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExitReport {
    pub code: Option<i32>,
    pub signal: Option<String>,
}

impl From<ExitStatus> for ExitReport {
    fn from(status: ExitStatus) -> Self {
        #[cfg(target_family = "unix")]
        let signal = {
            use nix::sys::signal::Signal;
            use std::os::unix::process::ExitStatusExt;
            status.signal().map(|raw| {
                Signal::try_from(raw)
                    .map(|s| s.as_str().to_string())
                    .unwrap_or_else(|_| format!("signal {raw}"))
            })
        };
        #[cfg(not(target_family = "unix"))]
        let signal = None;

        Self {
            code: status.code(),
            signal,
        }
    }
}

impl fmt::Display for ExitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.code, &self.signal) {
            (Some(code), _) => write!(f, "exited with code {code}"),
            (None, Some(signal)) => write!(f, "terminated by signal {signal}"),
            (None, None) => write!(f, "exited with unknown status"),
        }
    }
}

/// Notifications published by the supervisor to whoever composes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupervisorEvent {
    ProcessExited(ExitReport),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorStatus {
    Idle,
    Running { pid: u32 },
}

/// Owns at most one MineCode server process at a time.
///
/// `start` resolves the launch command against the project root, spawns the
/// child with piped output and hands its handle to an exit-watcher thread;
/// stdout/stderr are relayed line-by-line to the sink until EOF. The watcher
/// is the only place (besides a failed spawn) where the running state is
/// cleared, so `running` faithfully tracks the one live child.
pub struct ProcessSupervisor<S = TracingSink>
where
    S: ServerSink + 'static,
{
    root: Option<PathBuf>,
    config: ServerConfig,
    sink: Arc<S>,
    event_publisher: EventPublisher<SupervisorEvent>,
    running: Arc<Mutex<Option<u32>>>,
    watcher: Option<JoinHandle<()>>,
}

impl<S> ProcessSupervisor<S>
where
    S: ServerSink + 'static,
{
    pub fn new(
        root: Option<PathBuf>,
        config: ServerConfig,
        sink: Arc<S>,
        event_publisher: EventPublisher<SupervisorEvent>,
    ) -> Self {
        Self {
            root,
            config,
            sink,
            event_publisher,
            running: Arc::new(Mutex::new(None)),
            watcher: None,
        }
    }

    /// Launches the server process.
    ///
    /// Signals `AlreadyRunning` while a child is owned and `NoWorkspace`
    /// without a project root. A refused spawn leaves the state untouched.
    pub fn start(&mut self) -> Result<(), StartError> {
        if lock(&self.running).is_some() {
            return Err(StartError::AlreadyRunning);
        }
        let root = self.root.as_deref().ok_or(StartError::NoWorkspace)?;

        let launch = resolve_command(root, &self.config);
        debug!(program = %launch.program.display(), "resolved server command");

        let (output_publisher, output_consumer) = pub_sub();
        let started = ProcessRunner::new(&launch)
            .start()?
            .stream(output_publisher)?;
        let pid = started.get_pid();

        let forwarder = sink::spawn_forwarder(output_consumer, self.sink.clone());

        *lock(&self.running) = Some(pid);
        self.sink
            .status_line(&format!("minecode server started (pid {pid})"));

        let running = self.running.clone();
        let sink = self.sink.clone();
        let event_publisher = self.event_publisher.clone();
        self.watcher = Some(spawn_named_thread("exit watcher", move || {
            let report = match started.wait() {
                Ok(status) => ExitReport::from(status),
                Err(err) => {
                    error!("waiting for the server process: {err}");
                    ExitReport::default()
                }
            };

            // Drain the remaining output before the exit notice.
            if forwarder.join().is_err() {
                error!("output forwarder panicked");
            }

            sink.status_line(&format!("minecode server {report}"));
            *lock(&running) = None;

            if let Err(err) = event_publisher.publish(SupervisorEvent::ProcessExited(report)) {
                debug!("no consumer for the server exit event: {err}");
            }
        }));

        Ok(())
    }

    /// Requests termination of the owned child and returns immediately.
    ///
    /// The exit watcher performs the cleanup once the child actually dies.
    /// Termination is not verified here: a child ignoring the signal keeps
    /// the supervisor in Running until a real exit is observed.
    pub fn stop(&self) -> Result<(), StopError> {
        let pid = (*lock(&self.running)).ok_or(StopError::NotRunning)?;

        ProcessTerminator::new(pid)
            .terminate()
            .map_err(StopError::Terminate)?;

        self.sink
            .status_line(&format!("minecode server stop requested (pid {pid})"));
        Ok(())
    }

    /// Tears the child down before the host goes away.
    ///
    /// Force-kills the owned child (if any) and blocks until the exit
    /// watcher has observed the exit, so no orphaned process survives the
    /// host and the state is Idle on return.
    pub fn shutdown(&mut self) {
        if let Some(pid) = *lock(&self.running) {
            // A kill failure here is most likely a child that just exited;
            // the watcher join below settles it either way.
            if let Err(err) = ProcessTerminator::new(pid).kill() {
                debug!("force-terminating the server process (pid {pid}): {err}");
            }
        }

        if let Some(watcher) = self.watcher.take() {
            if watcher.join().is_err() {
                error!("exit watcher panicked");
            }
        }
    }

    pub fn status(&self) -> SupervisorStatus {
        match *lock(&self.running) {
            Some(pid) => SupervisorStatus::Running { pid },
            None => SupervisorStatus::Idle,
        }
    }
}

fn lock(running: &Mutex<Option<u32>>) -> MutexGuard<'_, Option<u32>> {
    running.lock().unwrap_or_else(PoisonError::into_inner)
}
