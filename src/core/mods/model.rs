use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Mod loaders the host knows how to install for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModLoader {
    Forge,
    Fabric,
    Quilt,
    NeoForge,
}

impl std::fmt::Display for ModLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModLoader::Forge => write!(f, "Forge"),
            ModLoader::Fabric => write!(f, "Fabric"),
            ModLoader::Quilt => write!(f, "Quilt"),
            ModLoader::NeoForge => write!(f, "NeoForge"),
        }
    }
}

/// Where an installed mod came from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ModSource {
    Local,
    Modrinth { project_id: String },
    CurseForge { project_id: u32 },
}

/// A mod installed in the game directory, as reported by the host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModRecord {
    pub id: String,
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    pub minecraft_version: String,
    pub mod_loader: ModLoader,
    pub file_name: String,
    #[serde(rename = "file_size")]
    pub file_size_bytes: u64,
    pub enabled: bool,
    #[serde(default)]
    pub dependencies: BTreeSet<String>,
    pub source: ModSource,
}

/// One hit from the remote mod catalog. Read-only; never merged into the
/// installed list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModSearchResult {
    pub id: String,
    pub name: String,
    pub description: String,
    pub author: String,
    #[serde(rename = "downloads")]
    pub download_count: u64,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(rename = "minecraft_versions", default)]
    pub supported_versions: Vec<String>,
    #[serde(rename = "mod_loaders", default)]
    pub supported_loaders: BTreeSet<ModLoader>,
    pub source: ModSource,
}

/// Parameters of a remote search, as sent to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModSearchQuery {
    pub query: String,
    pub minecraft_version: String,
    pub mod_loader: ModLoader,
    pub limit: u32,
}
