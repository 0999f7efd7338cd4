use std::sync::Arc;
use std::thread::JoinHandle;

use tracing::{debug, info, warn};

use crate::command::OutputEvent;
use crate::event::channel::EventConsumer;
use crate::utils::threads::spawn_named_thread;

/// Destination for the relayed server output and for supervisor notices.
///
/// `output_chunk` receives decoded lines of the child's stdout/stderr;
/// `status_line` receives human-readable start/stop/exit notices.
pub trait ServerSink: Send + Sync {
    fn output_chunk(&self, event: OutputEvent);
    fn status_line(&self, line: &str);
}

/// Sink that relays everything through the tracing subscriber.
#[derive(Default)]
pub struct TracingSink;

impl ServerSink for TracingSink {
    fn output_chunk(&self, event: OutputEvent) {
        match event {
            OutputEvent::Stdout(line) => debug!(stream = "stdout", "{line}"),
            OutputEvent::Stderr(line) => warn!(stream = "stderr", "{line}"),
        }
    }

    fn status_line(&self, line: &str) {
        info!("{line}");
    }
}

/// Drains the output channel into the sink on a dedicated thread.
///
/// The thread ends when every publisher is gone, i.e. once both reader
/// threads hit EOF on the child's pipes.
pub(crate) fn spawn_forwarder<S>(
    consumer: EventConsumer<OutputEvent>,
    sink: Arc<S>,
) -> JoinHandle<()>
where
    S: ServerSink + 'static,
{
    spawn_named_thread("output forwarder", move || {
        for event in consumer.as_ref().iter() {
            sink.output_chunk(event);
        }
    })
}
