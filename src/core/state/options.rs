use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::config::DEFAULT_PLAYER_NAME;
use crate::core::events::DEFAULT_TAIL_LIMIT;
use crate::core::mods::{ModLoader, DEFAULT_SEARCH_LIMIT};

const APP_DIR_NAME: &str = "satellite-launcher";
const OPTIONS_FILE: &str = "client_options.json";

pub const DEFAULT_VERSION: &str = "1.20.1";
pub const DEFAULT_LOG_FILTER: &str = "info,satellite_lib=debug";

/// Client-side knobs. These never travel to the host; the launcher
/// configuration proper lives in [`ConfigStore`](crate::core::config::ConfigStore).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientOptions {
    pub log_tail_limit: usize,
    pub default_version: String,
    pub default_player_name: String,
    pub search_limit: u32,
    pub default_mod_loader: ModLoader,
    pub notification_capacity: usize,
    pub log_filter: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            log_tail_limit: DEFAULT_TAIL_LIMIT,
            default_version: DEFAULT_VERSION.to_string(),
            default_player_name: DEFAULT_PLAYER_NAME.to_string(),
            search_limit: DEFAULT_SEARCH_LIMIT,
            default_mod_loader: ModLoader::Fabric,
            notification_capacity: 32,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ClientOptions {
    /// Missing or unreadable files fall back to defaults.
    pub fn load_from(path: &Path) -> Self {
        match load_options_from_disk(path) {
            Some(options) => {
                debug!("Loaded client options from {}", path.display());
                options
            }
            None => Self::default(),
        }
    }

    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }
}

fn load_options_from_disk(path: &Path) -> Option<ClientOptions> {
    let raw = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&raw) {
        Ok(options) => Some(options),
        Err(e) => {
            warn!("Ignoring corrupt client options {}: {}", path.display(), e);
            None
        }
    }
}

pub fn default_options_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(OPTIONS_FILE)
}
