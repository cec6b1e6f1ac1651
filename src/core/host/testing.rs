//! Scripted in-memory host used by the unit tests.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::core::config::LauncherConfig;
use crate::core::error::{HostError, HostResult};
use crate::core::mods::{ModRecord, ModSearchQuery, ModSearchResult};
use crate::core::version::VersionDescriptor;

use super::api::HostApi;

#[derive(Default)]
struct FakeState {
    config: LauncherConfig,
    versions: Vec<VersionDescriptor>,
    mods: Vec<ModRecord>,
    install_result: Option<ModRecord>,
    search_results: HashMap<String, Vec<ModSearchResult>>,
    delays: HashMap<(&'static str, String), Duration>,
    failing: HashSet<&'static str>,
    calls: Vec<&'static str>,
    persisted: Vec<LauncherConfig>,
    launched: Vec<String>,
    toggled: Vec<(String, String, bool)>,
    searches: Vec<ModSearchQuery>,
}

#[derive(Default)]
pub(crate) struct FakeHost {
    state: Mutex<FakeState>,
}

impl FakeHost {
    pub fn set_config(&self, config: LauncherConfig) {
        self.state.lock().config = config;
    }

    pub fn set_versions(&self, versions: Vec<VersionDescriptor>) {
        self.state.lock().versions = versions;
    }

    pub fn set_mods(&self, mods: Vec<ModRecord>) {
        self.state.lock().mods = mods;
    }

    pub fn set_install_result(&self, record: ModRecord) {
        self.state.lock().install_result = Some(record);
    }

    pub fn set_search_results(&self, query: &str, results: Vec<ModSearchResult>) {
        self.state
            .lock()
            .search_results
            .insert(query.to_string(), results);
    }

    /// Hold the answer to `call` for `detail` (search query or game directory).
    pub fn delay(&self, call: &'static str, detail: &str, by: Duration) {
        self.state
            .lock()
            .delays
            .insert((call, detail.to_string()), by);
    }

    pub fn fail(&self, call: &'static str) {
        self.state.lock().failing.insert(call);
    }

    pub fn recover(&self, call: &'static str) {
        self.state.lock().failing.remove(call);
    }

    pub fn calls(&self, call: &str) -> usize {
        self.state.lock().calls.iter().filter(|c| **c == call).count()
    }

    pub fn call_order(&self) -> Vec<&'static str> {
        self.state.lock().calls.clone()
    }

    pub fn persisted(&self) -> Vec<LauncherConfig> {
        self.state.lock().persisted.clone()
    }

    pub fn launched(&self) -> Vec<String> {
        self.state.lock().launched.clone()
    }

    pub fn toggled(&self) -> Vec<(String, String, bool)> {
        self.state.lock().toggled.clone()
    }

    pub fn searches(&self) -> Vec<ModSearchQuery> {
        self.state.lock().searches.clone()
    }

    async fn enter(&self, call: &'static str, detail: &str) -> HostResult<()> {
        let (delay, failing) = {
            let mut state = self.state.lock();
            state.calls.push(call);
            (
                state.delays.get(&(call, detail.to_string())).copied(),
                state.failing.contains(call),
            )
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if failing {
            return Err(HostError::Rejected(format!("{call} failed")));
        }
        Ok(())
    }
}

#[async_trait]
impl HostApi for FakeHost {
    async fn fetch_config(&self) -> HostResult<LauncherConfig> {
        self.enter("fetch_config", "").await?;
        Ok(self.state.lock().config.clone())
    }

    async fn persist_config(&self, config: &LauncherConfig) -> HostResult<()> {
        self.enter("persist_config", "").await?;
        let mut state = self.state.lock();
        state.persisted.push(config.clone());
        state.config = config.clone();
        Ok(())
    }

    async fn fetch_versions(&self) -> HostResult<Vec<VersionDescriptor>> {
        self.enter("fetch_versions", "").await?;
        Ok(self.state.lock().versions.clone())
    }

    async fn start_launch(&self, version_id: &str) -> HostResult<()> {
        self.enter("start_launch", version_id).await?;
        self.state.lock().launched.push(version_id.to_string());
        Ok(())
    }

    async fn list_installed_mods(&self, game_directory: &str) -> HostResult<Vec<ModRecord>> {
        self.enter("list_installed_mods", game_directory).await?;
        Ok(self.state.lock().mods.clone())
    }

    async fn toggle_mod(
        &self,
        game_directory: &str,
        mod_id: &str,
        enabled: bool,
    ) -> HostResult<()> {
        self.enter("toggle_mod", mod_id).await?;
        self.state.lock().toggled.push((
            game_directory.to_string(),
            mod_id.to_string(),
            enabled,
        ));
        Ok(())
    }

    async fn delete_mod(&self, _game_directory: &str, mod_id: &str) -> HostResult<()> {
        self.enter("delete_mod", mod_id).await?;
        self.state.lock().mods.retain(|m| m.id != mod_id);
        Ok(())
    }

    async fn install_mod_from_file(
        &self,
        _game_directory: &str,
        file_path: &Path,
    ) -> HostResult<ModRecord> {
        self.enter("install_mod_from_file", &file_path.to_string_lossy())
            .await?;
        self.state
            .lock()
            .install_result
            .clone()
            .ok_or_else(|| HostError::Rejected("not a mod archive".into()))
    }

    async fn search_mods(&self, query: &ModSearchQuery) -> HostResult<Vec<ModSearchResult>> {
        self.enter("search_mods", &query.query).await?;
        let mut state = self.state.lock();
        state.searches.push(query.clone());
        Ok(state
            .search_results
            .get(&query.query)
            .cloned()
            .unwrap_or_default())
    }
}
