use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::error::{LauncherError, LauncherResult};

pub const DEFAULT_PLAYER_NAME: &str = "Player";
pub const DEFAULT_MEMORY_MIN_MB: u32 = 1024;
pub const DEFAULT_MEMORY_MAX_MB: u32 = 4096;
/// Lowest value the memory inputs accept.
pub const MEMORY_FLOOR_MB: u32 = 512;

/// Launcher configuration as stored by the host.
///
/// Field names follow the host's JSON layout. Anything the host stores that
/// the client does not model (download timeouts, theme, ...) is kept in
/// `extra` so that a save never erases it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LauncherConfig {
    #[serde(default)]
    pub player_name: String,
    #[serde(default)]
    pub player_uuid: Option<String>,
    #[serde(default)]
    pub game_directory: String,
    #[serde(default)]
    pub java_executable: Option<String>,
    #[serde(default)]
    pub jvm_args: Vec<String>,
    #[serde(rename = "min_memory", default = "default_memory_min")]
    pub memory_min_mb: u32,
    #[serde(rename = "max_memory", default = "default_memory_max")]
    pub memory_max_mb: u32,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_memory_min() -> u32 {
    DEFAULT_MEMORY_MIN_MB
}

fn default_memory_max() -> u32 {
    DEFAULT_MEMORY_MAX_MB
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            player_uuid: None,
            game_directory: String::new(),
            java_executable: None,
            jvm_args: Vec::new(),
            memory_min_mb: DEFAULT_MEMORY_MIN_MB,
            memory_max_mb: DEFAULT_MEMORY_MAX_MB,
            extra: Map::new(),
        }
    }
}

/// A single field change made in the settings form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ConfigEdit {
    PlayerName(String),
    PlayerUuid(Option<String>),
    GameDirectory(String),
    JavaExecutable(Option<String>),
    JvmArgs(Vec<String>),
    /// Raw text of the JVM arguments input, split on whitespace.
    JvmArgsLine(String),
    MemoryMinMb(u32),
    MemoryMaxMb(u32),
}

/// The editable copy of the configuration.
///
/// The player name is tracked next to the record, not inside it, and is
/// merged back in when the draft is sent to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDraft {
    pub config: LauncherConfig,
    pub player_name: String,
}

impl ConfigDraft {
    pub fn from_config(config: LauncherConfig, fallback_name: &str) -> Self {
        let player_name = if config.player_name.is_empty() {
            fallback_name.to_string()
        } else {
            config.player_name.clone()
        };
        Self {
            config,
            player_name,
        }
    }

    pub fn apply(&mut self, edit: ConfigEdit) {
        match edit {
            ConfigEdit::PlayerName(name) => self.player_name = name,
            ConfigEdit::PlayerUuid(uuid) => self.config.player_uuid = uuid,
            ConfigEdit::GameDirectory(dir) => self.config.game_directory = dir,
            ConfigEdit::JavaExecutable(java) => self.config.java_executable = java,
            ConfigEdit::JvmArgs(args) => self.config.jvm_args = args,
            ConfigEdit::JvmArgsLine(line) => {
                self.config.jvm_args = line.split_whitespace().map(str::to_string).collect();
            }
            ConfigEdit::MemoryMinMb(mb) => self.config.memory_min_mb = mb,
            ConfigEdit::MemoryMaxMb(mb) => self.config.memory_max_mb = mb,
        }
    }

    /// Check the draft against the commit rules, reporting the first
    /// offending field.
    ///
    /// An unset Java executable is accepted (the host falls back to `java` on
    /// the PATH); an explicitly empty one is not.
    pub fn validate(&self) -> LauncherResult<()> {
        if self.config.memory_max_mb < self.config.memory_min_mb {
            return Err(LauncherError::InvalidConfig {
                field: "memory",
                message: "Max memory cannot be lower than min memory",
            });
        }

        if self.config.java_executable.as_deref() == Some("") {
            return Err(LauncherError::InvalidConfig {
                field: "java_executable",
                message: "Java executable cannot be empty",
            });
        }

        if self.config.game_directory.is_empty() {
            return Err(LauncherError::InvalidConfig {
                field: "game_directory",
                message: "Game directory cannot be empty",
            });
        }

        if self.player_name.is_empty() {
            return Err(LauncherError::InvalidConfig {
                field: "player_name",
                message: "Player name cannot be empty",
            });
        }

        Ok(())
    }

    pub fn is_committable(&self) -> bool {
        self.validate().is_ok()
    }

    /// The record the host should persist: the config with the player name
    /// merged in.
    pub fn to_record(&self) -> LauncherConfig {
        let mut record = self.config.clone();
        record.player_name = self.player_name.clone();
        record
    }
}

impl Default for ConfigDraft {
    fn default() -> Self {
        Self::from_config(LauncherConfig::default(), DEFAULT_PLAYER_NAME)
    }
}
