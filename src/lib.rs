pub mod commands;
pub mod core;

use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::core::state::options::default_options_path;

pub use crate::commands::{dispatch, Command};
pub use crate::core::config::{ConfigDraft, ConfigEdit, ConfigState, ConfigStore, LauncherConfig};
pub use crate::core::error::{ErrorKind, HostError, HostResult, LauncherError, LauncherResult};
pub use crate::core::events::{spawn_event_pump, EventSender, EventStreamBuffer};
pub use crate::core::host::{HostApi, HostEvent, IpcHost, IpcTransport};
pub use crate::core::mods::{ModLifecycleManager, ModLoader, ModRecord, ModSearchResult};
pub use crate::core::notify::{Notification, NotificationLevel, Notifier};
pub use crate::core::state::{ClientOptions, Section, SessionOrchestrator};
pub use crate::core::version::{VersionCatalogStore, VersionDescriptor, VersionKind};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `default_filter`. Calling this more than once is
/// harmless; later calls are ignored.
pub fn init_logging(default_filter: &str) {
    let result = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .try_init();

    if result.is_ok() {
        tracing::info!("Satellite launcher core starting...");
    }
}

/// Build a session from the per-user client options.
pub fn start(host: Arc<dyn HostApi>) -> SessionOrchestrator {
    start_with(host, &default_options_path())
}

/// Load client options from `options_path`, install logging with their
/// filter and build the session. A missing options file is written out with
/// the defaults so it can be edited.
pub fn start_with(host: Arc<dyn HostApi>, options_path: &Path) -> SessionOrchestrator {
    let first_run = !options_path.exists();
    let options = ClientOptions::load_from(options_path);
    init_logging(&options.log_filter);

    if first_run {
        match options.save_to(options_path) {
            Ok(()) => tracing::info!("Wrote default client options to {}", options_path.display()),
            Err(e) => tracing::warn!(
                "Could not write client options to {}: {}",
                options_path.display(),
                e
            ),
        }
    }

    SessionOrchestrator::new(host, options)
}
