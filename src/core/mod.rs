// ─── Satellite Core ───
// Client-side state of the launcher. All filesystem, network and process
// work happens in the host; this crate only talks to it.
//
// Architecture:
//   core/
//     host/     Host RPC boundary, IPC binding, host event decoding
//     events/   Launch log + progress buffer, event pump
//     version/  Version catalog and selected-version cursor
//     config/   Launcher configuration draft/commit store
//     mods/     Installed mods, remote search, file size formatting
//     state/    Client options + session orchestrator
//     notify    User-facing toasts
//     observe   Change subscriptions
//     error     Error types shared by every store

pub mod config;
pub mod error;
pub mod events;
pub mod host;
pub mod mods;
pub mod notify;
pub mod observe;
pub mod state;
pub mod version;
