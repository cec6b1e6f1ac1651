use serde_json::Value;
use tracing::{debug, warn};

pub const LOG_EVENT: &str = "log";
pub const PROGRESS_EVENT: &str = "progress";

/// An event pushed by the host while a launch runs.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Log(String),
    Progress(f64),
}

impl HostEvent {
    /// Decode a named host event.
    ///
    /// Unknown names are ignored. A payload of the wrong shape is dropped:
    /// the event streams have no error channel.
    pub fn from_ipc(name: &str, payload: &Value) -> Option<Self> {
        match name {
            LOG_EVENT => match payload.as_str() {
                Some(line) => Some(HostEvent::Log(line.to_string())),
                None => {
                    warn!("Dropping malformed log event payload: {payload}");
                    None
                }
            },
            PROGRESS_EVENT => match payload.as_f64() {
                Some(value) => Some(HostEvent::Progress(value)),
                None => {
                    warn!("Dropping malformed progress event payload: {payload}");
                    None
                }
            },
            other => {
                debug!("Ignoring host event '{other}'");
                None
            }
        }
    }
}
