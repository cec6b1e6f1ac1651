// ─── Mod Lifecycle Manager ───
// Installed mods of the current game directory and the latest remote search
// hits. Every mutation goes to the host first; local state follows only once
// the host has confirmed it.

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::core::error::{LauncherError, LauncherResult};
use crate::core::host::HostApi;
use crate::core::notify::Notifier;
use crate::core::observe::{Subscribers, Subscription};

use super::model::{ModLoader, ModRecord, ModSearchQuery, ModSearchResult};

/// Result count asked of the remote catalog when the caller has no opinion.
pub const DEFAULT_SEARCH_LIMIT: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModsEvent {
    InstalledChanged { count: usize },
    SearchResultsChanged { count: usize },
}

#[derive(Default)]
struct ModsState {
    installed: Vec<ModRecord>,
    search_results: Vec<ModSearchResult>,
    loading: bool,
    searching: bool,
    loaded_directory: Option<String>,
    // Only the newest request of each kind may write its answer back.
    // Confirmed mutations also bump `list_generation` so a list fetched
    // before them cannot undo them.
    list_generation: u64,
    latest_list_request: u64,
    search_generation: u64,
}

#[derive(Clone)]
pub struct ModLifecycleManager {
    host: Arc<dyn HostApi>,
    notifier: Notifier,
    state: Arc<Mutex<ModsState>>,
    events: Subscribers<ModsEvent>,
}

impl ModLifecycleManager {
    pub fn new(host: Arc<dyn HostApi>, notifier: Notifier) -> Self {
        Self {
            host,
            notifier,
            state: Arc::new(Mutex::new(ModsState::default())),
            events: Subscribers::new(),
        }
    }

    /// Replace the installed list with what the host finds in `game_directory`.
    pub async fn load_installed(&self, game_directory: &str) -> LauncherResult<usize> {
        info!("Loading installed mods from {}", game_directory);
        let generation = {
            let mut state = self.state.lock();
            state.list_generation += 1;
            state.latest_list_request = state.list_generation;
            state.loading = true;
            state.list_generation
        };

        let result = self.host.list_installed_mods(game_directory).await;

        let outcome = {
            let mut state = self.state.lock();
            if state.list_generation != generation {
                warn!("Discarding stale mod list for {}", game_directory);
                if state.latest_list_request == generation {
                    state.loading = false;
                }
                return Ok(state.installed.len());
            }
            state.loading = false;
            match result {
                Ok(mods) => {
                    state.installed = mods;
                    state.loaded_directory = Some(game_directory.to_string());
                    Ok(state.installed.len())
                }
                Err(source) => Err(LauncherError::ModListUnavailable {
                    game_directory: game_directory.to_string(),
                    source,
                }),
            }
        };

        match outcome {
            Ok(count) => {
                info!("Found {} installed mods", count);
                self.events.emit(&ModsEvent::InstalledChanged { count });
                Ok(count)
            }
            Err(err) => {
                warn!("{err}");
                self.notifier.failure("Failed to load installed mods", &err);
                Err(err)
            }
        }
    }

    /// Ask the host to enable or disable a mod; the local flag flips only
    /// after the host agrees.
    pub async fn toggle_enabled(
        &self,
        game_directory: &str,
        mod_id: &str,
        enabled: bool,
    ) -> LauncherResult<()> {
        debug!("Setting mod {} enabled={}", mod_id, enabled);

        if let Err(source) = self.host.toggle_mod(game_directory, mod_id, enabled).await {
            let err = LauncherError::ModToggleFailed {
                id: mod_id.to_string(),
                source,
            };
            warn!("{err}");
            self.notifier.failure("Failed to toggle mod", &err);
            return Err(err);
        }

        let count = {
            let mut state = self.state.lock();
            if let Some(record) = state.installed.iter_mut().find(|m| m.id == mod_id) {
                record.enabled = enabled;
            }
            state.list_generation += 1;
            state.installed.len()
        };
        self.events.emit(&ModsEvent::InstalledChanged { count });
        self.notifier
            .success(if enabled { "Mod enabled" } else { "Mod disabled" });
        Ok(())
    }

    /// Remove a mod from disk. Confirmation is the caller's business.
    pub async fn delete(&self, game_directory: &str, mod_id: &str) -> LauncherResult<()> {
        info!("Deleting mod {}", mod_id);

        if let Err(source) = self.host.delete_mod(game_directory, mod_id).await {
            let err = LauncherError::ModDeleteFailed {
                id: mod_id.to_string(),
                source,
            };
            warn!("{err}");
            self.notifier.failure("Failed to delete mod", &err);
            return Err(err);
        }

        let count = {
            let mut state = self.state.lock();
            state.installed.retain(|m| m.id != mod_id);
            state.list_generation += 1;
            state.installed.len()
        };
        self.events.emit(&ModsEvent::InstalledChanged { count });
        self.notifier.success("Mod deleted successfully");
        Ok(())
    }

    /// Copy a local archive into the game directory and track the record
    /// the host derived from it.
    pub async fn install_from_file(
        &self,
        game_directory: &str,
        file_path: &Path,
    ) -> LauncherResult<ModRecord> {
        info!("Installing mod from {}", file_path.display());

        let record = match self
            .host
            .install_mod_from_file(game_directory, file_path)
            .await
        {
            Ok(record) => record,
            Err(source) => {
                let err = LauncherError::ModInstallFailed {
                    path: file_path.to_path_buf(),
                    source,
                };
                warn!("{err}");
                self.notifier.failure("Failed to install mod", &err);
                return Err(err);
            }
        };

        let count = {
            let mut state = self.state.lock();
            state.installed.push(record.clone());
            state.list_generation += 1;
            state.installed.len()
        };
        info!("Installed {} {}", record.name, record.version);
        self.events.emit(&ModsEvent::InstalledChanged { count });
        self.notifier.success("Mod installed successfully");
        Ok(record)
    }

    /// Query the remote catalog. A blank query does nothing and keeps the
    /// current results.
    pub async fn search(
        &self,
        query: &str,
        minecraft_version: &str,
        mod_loader: ModLoader,
        limit: u32,
    ) -> LauncherResult<()> {
        let query = query.trim();
        if query.is_empty() {
            debug!("Ignoring blank mod search");
            return Ok(());
        }

        let request = ModSearchQuery {
            query: query.to_string(),
            minecraft_version: minecraft_version.to_string(),
            mod_loader,
            limit,
        };
        info!(
            "Searching mods for '{}' ({} {})",
            request.query, mod_loader, minecraft_version
        );

        let generation = {
            let mut state = self.state.lock();
            state.search_generation += 1;
            state.searching = true;
            state.search_generation
        };

        let result = self.host.search_mods(&request).await;

        let outcome = {
            let mut state = self.state.lock();
            if state.search_generation != generation {
                warn!("Discarding stale search results for '{}'", request.query);
                return Ok(());
            }
            state.searching = false;
            match result {
                Ok(results) => {
                    state.search_results = results;
                    Ok(state.search_results.len())
                }
                Err(source) => Err(LauncherError::ModSearchFailed {
                    query: request.query.clone(),
                    source,
                }),
            }
        };

        match outcome {
            Ok(count) => {
                debug!("Mod search returned {} results", count);
                self.events.emit(&ModsEvent::SearchResultsChanged { count });
                Ok(())
            }
            Err(err) => {
                warn!("{err}");
                self.notifier.failure("Failed to search mods", &err);
                Err(err)
            }
        }
    }

    pub fn installed(&self) -> Vec<ModRecord> {
        self.state.lock().installed.clone()
    }

    pub fn get(&self, mod_id: &str) -> Option<ModRecord> {
        self.state
            .lock()
            .installed
            .iter()
            .find(|m| m.id == mod_id)
            .cloned()
    }

    pub fn search_results(&self) -> Vec<ModSearchResult> {
        self.state.lock().search_results.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().loading
    }

    pub fn is_searching(&self) -> bool {
        self.state.lock().searching
    }

    /// Directory the installed list was last loaded from.
    pub fn loaded_directory(&self) -> Option<String> {
        self.state.lock().loaded_directory.clone()
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&ModsEvent) + Send + Sync + 'static,
    {
        self.events.subscribe(callback)
    }
}
