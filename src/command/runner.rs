use std::{
    io::{BufRead, BufReader, Read},
    process::{Child, Command, ExitStatus, Stdio},
};

use tracing::error;

use crate::event::channel::{EventPublisher, EventPublisherError};
use crate::utils::threads::spawn_named_thread;

use super::{
    stream::OutputEvent, CommandError, CommandExecutor, CommandHandle, LaunchCommand,
    OutputStreamer,
};

#[derive(Debug)]
pub struct Unstarted {
    cmd: Command,
}

#[derive(Debug)]
pub struct Started {
    process: Child,
}

/// Runs the server command as a child process with piped output.
#[derive(Debug)]
pub struct ProcessRunner<State = Unstarted> {
    state: State,
}

impl ProcessRunner {
    pub fn new(launch: &LaunchCommand) -> Self {
        let mut cmd = Command::new(&launch.program);
        cmd.args(&launch.args)
            .envs(&launch.env)
            .current_dir(&launch.working_dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        Self {
            state: Unstarted { cmd },
        }
    }
}

impl CommandExecutor for ProcessRunner<Unstarted> {
    type Error = CommandError;
    type Handle = ProcessRunner<Started>;

    fn start(mut self) -> Result<Self::Handle, Self::Error> {
        let process = self.state.cmd.spawn()?;
        Ok(ProcessRunner {
            state: Started { process },
        })
    }
}

impl CommandHandle for ProcessRunner<Started> {
    type Error = CommandError;

    fn wait(mut self) -> Result<ExitStatus, Self::Error> {
        self.state.process.wait().map_err(CommandError::from)
    }

    fn get_pid(&self) -> u32 {
        self.state.process.id()
    }
}

impl OutputStreamer for ProcessRunner<Started> {
    type Error = CommandError;
    type Handle = ProcessRunner<Started>;

    fn stream(
        mut self,
        publisher: EventPublisher<OutputEvent>,
    ) -> Result<Self::Handle, Self::Error> {
        let stdout = self
            .state
            .process
            .stdout
            .take()
            .ok_or(CommandError::StreamPipeError("stdout".to_string()))?;

        let stderr = self
            .state
            .process
            .stderr
            .take()
            .ok_or(CommandError::StreamPipeError("stderr".to_string()))?;

        // Read stdout and publish until EOF
        spawn_named_thread("stdout reader", {
            let publisher = publisher.clone();
            move || {
                forward_lines(stdout, |line| publisher.publish(OutputEvent::Stdout(line)))
                    .map_err(|e| error!("stdout stream error: {e}"))
            }
        });

        // Read stderr and publish until EOF
        spawn_named_thread("stderr reader", move || {
            forward_lines(stderr, |line| publisher.publish(OutputEvent::Stderr(line)))
                .map_err(|e| error!("stderr stream error: {e}"))
        });

        Ok(self)
    }
}

fn forward_lines<R, F>(stream: R, publish: F) -> Result<(), CommandError>
where
    R: Read,
    F: Fn(String) -> Result<(), EventPublisherError>,
{
    for line in BufReader::new(stream).lines() {
        // A dropped consumer means nobody is listening anymore; stop reading.
        if publish(line?).is_err() {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::event::channel::pub_sub;
    use assert_matches::assert_matches;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn launch_of(program: &str, args: &[&str]) -> LaunchCommand {
        LaunchCommand {
            program: PathBuf::from(program),
            args: args.iter().map(|a| a.to_string()).collect(),
            working_dir: std::env::current_dir().unwrap(),
            env: HashMap::default(),
        }
    }

    #[test]
    fn unknown_binary_fails_to_start() {
        let runner = ProcessRunner::new(&launch_of("minecode-no-such-binary", &[]));

        assert_matches!(runner.start().unwrap_err(), CommandError::IOError(_));
    }

    #[cfg(target_family = "unix")]
    #[test]
    fn streams_stdout_and_stderr_until_exit() {
        let launch = launch_of("sh", &["-c", "echo out line; echo err line >&2"]);
        let (publisher, consumer) = pub_sub();

        let handle = ProcessRunner::new(&launch)
            .start()
            .unwrap()
            .stream(publisher)
            .unwrap();

        // Publishers are dropped at EOF, disconnecting the channel.
        let events: Vec<OutputEvent> = consumer.as_ref().iter().collect();

        assert!(events.contains(&OutputEvent::Stdout("out line".to_string())));
        assert!(events.contains(&OutputEvent::Stderr("err line".to_string())));

        let status = handle.wait().unwrap();
        assert!(status.success());
    }

    #[cfg(target_family = "unix")]
    #[test]
    fn runs_in_the_resolved_working_directory() {
        let root = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            use_isolated_environment: false,
            explicit_executable: "pwd".to_string(),
            args: vec![],
            ..ServerConfig::default()
        };
        let launch = crate::command::resolve_command(root.path(), &config);
        let (publisher, consumer) = pub_sub();

        let handle = ProcessRunner::new(&launch)
            .start()
            .unwrap()
            .stream(publisher)
            .unwrap();
        handle.wait().unwrap();

        let printed: Vec<OutputEvent> = consumer.as_ref().iter().collect();
        let expected = root.path().canonicalize().unwrap();
        assert!(printed
            .iter()
            .any(|e| PathBuf::from(e.line()).canonicalize().ok() == Some(expected.clone())));
    }

    #[cfg(target_family = "unix")]
    #[test]
    fn extra_env_reaches_the_child() {
        let mut env = HashMap::default();
        env.insert("MINECODE_MARKER".to_string(), "is-set".to_string());
        let launch = LaunchCommand {
            env,
            ..launch_of("sh", &["-c", "echo $MINECODE_MARKER"])
        };
        let (publisher, consumer) = pub_sub();

        ProcessRunner::new(&launch)
            .start()
            .unwrap()
            .stream(publisher)
            .unwrap()
            .wait()
            .unwrap();

        let events: Vec<OutputEvent> = consumer.as_ref().iter().collect();
        assert!(events.contains(&OutputEvent::Stdout("is-set".to_string())));
    }
}
