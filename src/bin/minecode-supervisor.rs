use std::error::Error;
use std::sync::Arc;

use crossbeam::select;
use tracing::{error, info};

use minecode_supervisor::cli::Cli;
use minecode_supervisor::config::{ConfigLoader, FileConfigLoader, ServerConfig};
use minecode_supervisor::event::channel::pub_sub;
use minecode_supervisor::logging::Logging;
use minecode_supervisor::supervisor::{ProcessSupervisor, SupervisorEvent, TracingSink};
use minecode_supervisor::workspace;

fn main() -> Result<(), Box<dyn Error>> {
    // init logging singleton
    Logging::try_init()?;

    let cli = Cli::init_supervisor_cli();

    let config = match cli.config_path() {
        Some(path) => FileConfigLoader::new(&path).load_config()?,
        None => ServerConfig::default(),
    };
    let root = workspace::find_project_root(cli.root());

    let (supervisor_publisher, supervisor_consumer) = pub_sub();
    let mut supervisor =
        ProcessSupervisor::new(root, config, Arc::new(TracingSink), supervisor_publisher);

    info!("starting the minecode server");
    supervisor.start()?;

    let (stop_publisher, stop_consumer) = pub_sub::<()>();
    ctrlc::set_handler(move || {
        // A full channel or dropped consumer just means a stop is already underway
        let _ = stop_publisher.publish(());
    })
    .map_err(|e| {
        error!("could not set signal handler: {e}");
        e
    })?;

    select! {
        recv(stop_consumer.as_ref()) -> _ => {
            info!("termination signal received, shutting the server down");
            supervisor.shutdown();
        }
        recv(supervisor_consumer.as_ref()) -> event => {
            match event {
                Ok(SupervisorEvent::ProcessExited(report)) => {
                    info!("server {report}, exiting");
                }
                Err(_) => error!("supervisor event channel closed unexpectedly"),
            }
            supervisor.shutdown();
        }
    }

    Ok(())
}
