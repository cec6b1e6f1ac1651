use std::path::Path;

use async_trait::async_trait;

use crate::core::config::LauncherConfig;
use crate::core::error::HostResult;
use crate::core::mods::{ModRecord, ModSearchQuery, ModSearchResult};
use crate::core::version::VersionDescriptor;

/// Every request the client core sends to the host process.
///
/// Each call may fail independently; callers decide what a failure means
/// for their own state.
#[async_trait]
pub trait HostApi: Send + Sync {
    async fn fetch_config(&self) -> HostResult<LauncherConfig>;

    /// `config` already carries the player name.
    async fn persist_config(&self, config: &LauncherConfig) -> HostResult<()>;

    async fn fetch_versions(&self) -> HostResult<Vec<VersionDescriptor>>;

    /// Returns once the host accepted the request; progress and log lines
    /// follow on the event channels.
    async fn start_launch(&self, version_id: &str) -> HostResult<()>;

    async fn list_installed_mods(&self, game_directory: &str) -> HostResult<Vec<ModRecord>>;

    async fn toggle_mod(&self, game_directory: &str, mod_id: &str, enabled: bool)
        -> HostResult<()>;

    async fn delete_mod(&self, game_directory: &str, mod_id: &str) -> HostResult<()>;

    async fn install_mod_from_file(
        &self,
        game_directory: &str,
        file_path: &Path,
    ) -> HostResult<ModRecord>;

    async fn search_mods(&self, query: &ModSearchQuery) -> HostResult<Vec<ModSearchResult>>;
}
