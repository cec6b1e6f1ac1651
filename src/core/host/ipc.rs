// ─── IPC Binding ───
// Maps `HostApi` onto the host's named commands. The transport only has to
// move `(command, json args) -> json` across the process boundary.

use std::path::Path;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;

use crate::core::config::LauncherConfig;
use crate::core::error::HostResult;
use crate::core::mods::{ModRecord, ModSearchQuery, ModSearchResult};
use crate::core::version::VersionDescriptor;

use super::api::HostApi;

pub mod command {
    pub const GET_CONFIG: &str = "get_config";
    pub const UPDATE_CONFIG: &str = "update_config";
    pub const GET_VERSIONS: &str = "get_versions";
    pub const START_LAUNCHER: &str = "start_launcher";
    pub const GET_INSTALLED_MODS: &str = "get_installed_mods";
    pub const TOGGLE_MOD: &str = "toggle_mod";
    pub const DELETE_MOD: &str = "delete_mod";
    pub const INSTALL_MOD_FROM_FILE: &str = "install_mod_from_file";
    pub const SEARCH_MODS_ONLINE: &str = "search_mods_online";
}

/// Request/response channel to the host process.
#[async_trait]
pub trait IpcTransport: Send + Sync {
    async fn invoke(&self, command: &str, args: Value) -> HostResult<Value>;
}

/// [`HostApi`] implemented on top of an [`IpcTransport`].
pub struct IpcHost<T> {
    transport: T,
}

impl<T: IpcTransport> IpcHost<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn call<R: DeserializeOwned>(&self, command: &str, args: Value) -> HostResult<R> {
        debug!("invoking host command {command}");
        let value = self.transport.invoke(command, args).await?;
        Ok(serde_json::from_value(value)?)
    }
}

#[async_trait]
impl<T: IpcTransport> HostApi for IpcHost<T> {
    async fn fetch_config(&self) -> HostResult<LauncherConfig> {
        self.call(command::GET_CONFIG, json!({})).await
    }

    async fn persist_config(&self, config: &LauncherConfig) -> HostResult<()> {
        self.call(command::UPDATE_CONFIG, json!({ "config": config }))
            .await
    }

    async fn fetch_versions(&self) -> HostResult<Vec<VersionDescriptor>> {
        self.call(command::GET_VERSIONS, json!({})).await
    }

    async fn start_launch(&self, version_id: &str) -> HostResult<()> {
        self.call(command::START_LAUNCHER, json!({ "version": version_id }))
            .await
    }

    async fn list_installed_mods(&self, game_directory: &str) -> HostResult<Vec<ModRecord>> {
        self.call(
            command::GET_INSTALLED_MODS,
            json!({ "gameDirectory": game_directory }),
        )
        .await
    }

    async fn toggle_mod(
        &self,
        game_directory: &str,
        mod_id: &str,
        enabled: bool,
    ) -> HostResult<()> {
        self.call(
            command::TOGGLE_MOD,
            json!({
                "gameDirectory": game_directory,
                "modId": mod_id,
                "enabled": enabled,
            }),
        )
        .await
    }

    async fn delete_mod(&self, game_directory: &str, mod_id: &str) -> HostResult<()> {
        self.call(
            command::DELETE_MOD,
            json!({ "gameDirectory": game_directory, "modId": mod_id }),
        )
        .await
    }

    async fn install_mod_from_file(
        &self,
        game_directory: &str,
        file_path: &Path,
    ) -> HostResult<ModRecord> {
        self.call(
            command::INSTALL_MOD_FROM_FILE,
            json!({
                "gameDirectory": game_directory,
                "filePath": file_path.to_string_lossy(),
            }),
        )
        .await
    }

    async fn search_mods(&self, query: &ModSearchQuery) -> HostResult<Vec<ModSearchResult>> {
        self.call(
            command::SEARCH_MODS_ONLINE,
            json!({
                "query": query.query,
                "minecraftVersion": query.minecraft_version,
                "modLoader": query.mod_loader,
                "limit": query.limit,
            }),
        )
        .await
    }
}
