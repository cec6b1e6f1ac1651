// ─── Event Pump ───
// One unbounded queue per host channel, drained by a single task into the
// buffer. Order within a channel is preserved; the two channels are not
// ordered against each other.

use futures_util::{pin_mut, Stream, StreamExt};
use serde_json::Value;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::core::host::HostEvent;

use super::buffer::EventStreamBuffer;

/// Producer side of the two host event channels.
#[derive(Clone)]
pub struct EventSender {
    log: UnboundedSender<String>,
    progress: UnboundedSender<f64>,
}

impl EventSender {
    /// Returns `false` once the pump has stopped.
    pub fn log(&self, line: impl Into<String>) -> bool {
        self.log.send(line.into()).is_ok()
    }

    pub fn progress(&self, value: f64) -> bool {
        self.progress.send(value).is_ok()
    }

    pub fn send(&self, event: HostEvent) -> bool {
        match event {
            HostEvent::Log(line) => self.log(line),
            HostEvent::Progress(value) => self.progress(value),
        }
    }
}

/// Start draining both channels into `buffer`.
///
/// The task ends when every [`EventSender`] clone has been dropped.
pub fn spawn_event_pump(buffer: EventStreamBuffer) -> (EventSender, JoinHandle<()>) {
    let (log_tx, mut log_rx) = mpsc::unbounded_channel::<String>();
    let (progress_tx, mut progress_rx) = mpsc::unbounded_channel::<f64>();

    let handle = tokio::spawn(async move {
        let mut log_open = true;
        let mut progress_open = true;

        while log_open || progress_open {
            tokio::select! {
                line = log_rx.recv(), if log_open => match line {
                    Some(line) => {
                        buffer.append(line);
                    }
                    None => log_open = false,
                },
                value = progress_rx.recv(), if progress_open => match value {
                    Some(value) => buffer.set_progress(value),
                    None => progress_open = false,
                },
            }
        }

        debug!("Host event channels closed, event pump stopped");
    });

    (
        EventSender {
            log: log_tx,
            progress: progress_tx,
        },
        handle,
    )
}

/// Feed raw `(event name, payload)` pairs from the host bridge into the
/// channels until the stream ends or the pump goes away.
pub async fn forward_host_events<S>(events: S, sender: EventSender)
where
    S: Stream<Item = (String, Value)>,
{
    pin_mut!(events);
    while let Some((name, payload)) = events.next().await {
        if let Some(event) = HostEvent::from_ipc(&name, &payload) {
            if !sender.send(event) {
                debug!("Event pump gone, no longer forwarding host events");
                break;
            }
        }
    }
}
