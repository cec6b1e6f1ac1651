pub mod api;
pub mod events;
pub mod ipc;

#[cfg(test)]
pub(crate) mod testing;

pub use api::HostApi;
pub use events::HostEvent;
pub use ipc::{IpcHost, IpcTransport};
