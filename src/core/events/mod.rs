pub mod buffer;
pub mod pump;

pub use buffer::{EventStreamBuffer, LogAppended, DEFAULT_TAIL_LIMIT};
pub use pump::{forward_host_events, spawn_event_pump, EventSender};
