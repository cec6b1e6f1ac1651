// ─── Configuration Store ───
// Committed copy (last value the host accepted) and a draft being edited.
//
//   Clean --edit--> Dirty --commit--> Saving --ok--> Clean
//                                            \--err--> Dirty
//   cancel: any state --> Clean (draft := committed)

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::core::error::{LauncherError, LauncherResult};
use crate::core::host::HostApi;
use crate::core::notify::Notifier;
use crate::core::observe::{Subscribers, Subscription};

use super::model::{ConfigDraft, ConfigEdit, LauncherConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigState {
    Clean,
    Dirty,
    Saving,
}

struct ConfigInner {
    committed: ConfigDraft,
    draft: ConfigDraft,
    state: ConfigState,
    loaded: bool,
}

#[derive(Clone)]
pub struct ConfigStore {
    host: Arc<dyn HostApi>,
    notifier: Notifier,
    default_player_name: String,
    inner: Arc<Mutex<ConfigInner>>,
    events: Subscribers<ConfigState>,
}

impl ConfigStore {
    pub fn new(host: Arc<dyn HostApi>, notifier: Notifier, default_player_name: &str) -> Self {
        let initial = ConfigDraft::from_config(LauncherConfig::default(), default_player_name);
        Self {
            host,
            notifier,
            default_player_name: default_player_name.to_string(),
            inner: Arc::new(Mutex::new(ConfigInner {
                committed: initial.clone(),
                draft: initial,
                state: ConfigState::Clean,
                loaded: false,
            })),
            events: Subscribers::new(),
        }
    }

    /// Replace both copies with the host's configuration.
    ///
    /// On failure whatever was there before (defaults on first run) stays.
    pub async fn load(&self) -> LauncherResult<()> {
        info!("Loading launcher configuration...");

        match self.host.fetch_config().await {
            Ok(config) => {
                let fresh = ConfigDraft::from_config(config, &self.default_player_name);
                {
                    let mut inner = self.inner.lock();
                    inner.committed = fresh.clone();
                    inner.draft = fresh;
                    inner.state = ConfigState::Clean;
                    inner.loaded = true;
                }
                info!("Launcher configuration loaded");
                self.events.emit(&ConfigState::Clean);
                Ok(())
            }
            Err(source) => {
                let err = LauncherError::ConfigUnavailable(source);
                error!("{err}");
                self.notifier
                    .failure("Failed to load launcher settings", &err);
                Err(err)
            }
        }
    }

    /// Change one field of the draft. Never touches the host.
    pub fn edit(&self, edit: ConfigEdit) {
        let state = {
            let mut inner = self.inner.lock();
            inner.draft.apply(edit);
            if inner.state == ConfigState::Clean {
                inner.state = ConfigState::Dirty;
            }
            inner.state
        };
        self.events.emit(&state);
    }

    pub fn is_committable(&self) -> bool {
        self.inner.lock().draft.is_committable()
    }

    /// Persist the draft (player name included) and make it the committed
    /// copy.
    ///
    /// Refused without contacting the host when the draft is invalid or a
    /// save is already running. A failed save leaves the draft as it was and
    /// is not retried.
    pub async fn commit(&self) -> LauncherResult<()> {
        let sent = {
            let mut inner = self.inner.lock();
            if inner.state == ConfigState::Saving {
                return Err(LauncherError::CommitInProgress);
            }
            if let Err(err) = inner.draft.validate() {
                debug!("Refusing to save configuration: {err}");
                return Err(err);
            }
            inner.state = ConfigState::Saving;
            inner.draft.clone()
        };
        self.events.emit(&ConfigState::Saving);

        info!("Saving launcher configuration...");
        let result = self.host.persist_config(&sent.to_record()).await;

        let (state, outcome) = {
            let mut inner = self.inner.lock();
            match result {
                Ok(()) => {
                    inner.committed = sent.clone();
                    // Edits made while the save was in flight stay pending.
                    inner.state = if inner.draft == sent {
                        ConfigState::Clean
                    } else {
                        ConfigState::Dirty
                    };
                    (inner.state, Ok(()))
                }
                Err(source) => {
                    inner.state = ConfigState::Dirty;
                    (inner.state, Err(LauncherError::ConfigPersistFailed(source)))
                }
            }
        };
        self.events.emit(&state);

        match outcome {
            Ok(()) => {
                info!("Launcher configuration saved");
                self.notifier.success("Settings saved successfully!");
                Ok(())
            }
            Err(err) => {
                warn!("{err}");
                self.notifier.failure("Failed to save settings", &err);
                Err(err)
            }
        }
    }

    /// Throw away unsaved edits.
    pub fn cancel(&self) {
        {
            let mut inner = self.inner.lock();
            inner.draft = inner.committed.clone();
            inner.state = ConfigState::Clean;
        }
        debug!("Discarded unsaved configuration edits");
        self.events.emit(&ConfigState::Clean);
    }

    pub fn state(&self) -> ConfigState {
        self.inner.lock().state
    }

    pub fn draft(&self) -> ConfigDraft {
        self.inner.lock().draft.clone()
    }

    pub fn committed(&self) -> ConfigDraft {
        self.inner.lock().committed.clone()
    }

    /// Game directory of the committed configuration.
    pub fn game_directory(&self) -> String {
        self.inner.lock().committed.config.game_directory.clone()
    }

    pub fn player_name(&self) -> String {
        self.inner.lock().committed.player_name.clone()
    }

    /// Whether a host configuration has been received at least once.
    pub fn is_loaded(&self) -> bool {
        self.inner.lock().loaded
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&ConfigState) + Send + Sync + 'static,
    {
        self.events.subscribe(callback)
    }
}
