// ─── Version Catalog ───
// Caches the Minecraft version list reported by the host and tracks which
// version the user picked.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::error::{LauncherError, LauncherResult};
use crate::core::host::HostApi;
use crate::core::notify::Notifier;
use crate::core::observe::{Subscribers, Subscription};

/// Release channel of a version, spelled the way the Mojang manifest does.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VersionKind {
    Release,
    Snapshot,
    OldBeta,
    OldAlpha,
}

/// A single entry of the version catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VersionDescriptor {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: VersionKind,
    pub url: String,
}

impl VersionDescriptor {
    pub fn is_release(&self) -> bool {
        self.kind == VersionKind::Release
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEvent {
    Loaded { count: usize },
    Selected { id: String },
    SnapshotsToggled { visible: bool },
}

struct CatalogState {
    versions: Vec<VersionDescriptor>,
    selected: String,
    show_snapshots: bool,
    loading: bool,
}

#[derive(Clone)]
pub struct VersionCatalogStore {
    host: Arc<dyn HostApi>,
    notifier: Notifier,
    state: Arc<Mutex<CatalogState>>,
    events: Subscribers<CatalogEvent>,
}

impl VersionCatalogStore {
    /// `default_version` is selected until the user picks something else;
    /// it does not have to exist in the catalog.
    pub fn new(host: Arc<dyn HostApi>, notifier: Notifier, default_version: &str) -> Self {
        Self {
            host,
            notifier,
            state: Arc::new(Mutex::new(CatalogState {
                versions: Vec::new(),
                selected: default_version.to_string(),
                show_snapshots: false,
                loading: false,
            })),
            events: Subscribers::new(),
        }
    }

    /// Fetch the full version list from the host.
    ///
    /// On failure the previously cached list is kept as is.
    pub async fn fetch_all(&self) -> LauncherResult<usize> {
        info!("Fetching Minecraft version catalog...");
        self.state.lock().loading = true;

        let result = self.host.fetch_versions().await;

        let outcome = {
            let mut state = self.state.lock();
            state.loading = false;
            match result {
                Ok(versions) => {
                    let count = versions.len();
                    state.versions = versions;
                    Ok(count)
                }
                Err(source) => Err(LauncherError::CatalogUnavailable(source)),
            }
        };

        match outcome {
            Ok(count) => {
                info!("Loaded {} versions from catalog", count);
                self.events.emit(&CatalogEvent::Loaded { count });
                Ok(count)
            }
            Err(err) => {
                warn!("Version catalog fetch failed: {err}");
                self.notifier
                    .failure("Failed to load Minecraft versions", &err);
                Err(err)
            }
        }
    }

    /// Versions in fetch order; snapshots and old builds only when asked.
    pub fn filtered(&self, include_snapshots: bool) -> Vec<VersionDescriptor> {
        let state = self.state.lock();
        if include_snapshots {
            state.versions.clone()
        } else {
            state
                .versions
                .iter()
                .filter(|v| v.is_release())
                .cloned()
                .collect()
        }
    }

    /// What the picker shows right now.
    pub fn visible(&self) -> Vec<VersionDescriptor> {
        let include_snapshots = self.state.lock().show_snapshots;
        self.filtered(include_snapshots)
    }

    pub fn all(&self) -> Vec<VersionDescriptor> {
        self.state.lock().versions.clone()
    }

    pub fn find(&self, id: &str) -> Option<VersionDescriptor> {
        self.state
            .lock()
            .versions
            .iter()
            .find(|v| v.id == id)
            .cloned()
    }

    /// Move the cursor to `id` without checking it against the catalog.
    pub fn select(&self, id: &str) {
        self.state.lock().selected = id.to_string();
        self.events.emit(&CatalogEvent::Selected { id: id.to_string() });
    }

    pub fn selected(&self) -> String {
        self.state.lock().selected.clone()
    }

    pub fn toggle_snapshots(&self) -> bool {
        let visible = {
            let mut state = self.state.lock();
            state.show_snapshots = !state.show_snapshots;
            state.show_snapshots
        };
        self.events.emit(&CatalogEvent::SnapshotsToggled { visible });
        visible
    }

    pub fn shows_snapshots(&self) -> bool {
        self.state.lock().show_snapshots
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().loading
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&CatalogEvent) + Send + Sync + 'static,
    {
        self.events.subscribe(callback)
    }
}
