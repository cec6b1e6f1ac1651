// ─── Session Orchestrator ───
// Composition root of the client core. Owns the stores, the view flags the
// shell renders from, and the launch sequence.
//
//   bootstrap: catalog.fetch_all ‖ config.load
//   launch:    config.commit ─ok→ host.start_launch(selected)

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::config::ConfigStore;
use crate::core::error::{LauncherError, LauncherResult};
use crate::core::events::EventStreamBuffer;
use crate::core::host::HostApi;
use crate::core::mods::{ModLifecycleManager, ModRecord};
use crate::core::notify::Notifier;
use crate::core::observe::{Subscribers, Subscription};
use crate::core::version::{CatalogEvent, VersionCatalogStore, VersionDescriptor};

use super::options::ClientOptions;

/// Top-level views of the launcher window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Section {
    #[default]
    Home,
    Instances,
    Mods,
    Settings,
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Section::Home => write!(f, "Home"),
            Section::Instances => write!(f, "Instances"),
            Section::Mods => write!(f, "Mods"),
            Section::Settings => write!(f, "Settings"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    SectionChanged(Section),
    VersionSelectorToggled(bool),
    LogViewToggled(bool),
}

/// Everything the shell needs to draw one frame.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub active_section: Section,
    pub selected_version: String,
    pub show_version_selector: bool,
    pub show_all_logs: bool,
    pub show_snapshots: bool,
    pub progress: f64,
    pub log: String,
    pub player_name: String,
}

/// Outcome of both startup loads. Neither failure stops the other.
#[derive(Debug)]
pub struct BootstrapReport {
    pub catalog: LauncherResult<usize>,
    pub config: LauncherResult<()>,
}

impl BootstrapReport {
    pub fn is_complete(&self) -> bool {
        self.catalog.is_ok() && self.config.is_ok()
    }
}

#[derive(Default)]
struct ViewState {
    active_section: Section,
    show_version_selector: bool,
    show_all_logs: bool,
    // Game directory whose mod list was last requested.
    mods_directory: Option<String>,
}

#[derive(Clone)]
pub struct SessionOrchestrator {
    host: Arc<dyn HostApi>,
    options: ClientOptions,
    pub events: EventStreamBuffer,
    catalog: VersionCatalogStore,
    pub config: ConfigStore,
    pub mods: ModLifecycleManager,
    pub notifier: Notifier,
    view: Arc<Mutex<ViewState>>,
    changes: Subscribers<SessionEvent>,
}

impl SessionOrchestrator {
    pub fn new(host: Arc<dyn HostApi>, options: ClientOptions) -> Self {
        let notifier = Notifier::new(options.notification_capacity);
        Self {
            events: EventStreamBuffer::new(),
            catalog: VersionCatalogStore::new(
                host.clone(),
                notifier.clone(),
                &options.default_version,
            ),
            config: ConfigStore::new(host.clone(), notifier.clone(), &options.default_player_name),
            mods: ModLifecycleManager::new(host.clone(), notifier.clone()),
            notifier,
            host,
            options,
            view: Arc::new(Mutex::new(ViewState::default())),
            changes: Subscribers::new(),
        }
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Load the version catalog and the configuration side by side.
    pub async fn bootstrap(&self) -> BootstrapReport {
        info!("Bootstrapping launcher session...");
        let (catalog, config) = tokio::join!(self.catalog.fetch_all(), self.config.load());
        let report = BootstrapReport { catalog, config };
        if report.is_complete() {
            info!("Launcher session ready");
        } else {
            warn!("Launcher session started with missing data: {:?}", report);
        }
        report
    }

    /// Save the configuration, then ask the host to start the selected
    /// version. Nothing is launched unless the save went through.
    pub async fn launch(&self) -> LauncherResult<()> {
        let version = self.catalog.selected();
        info!("Launch requested for Minecraft {}", version);

        if let Err(err) = self.config.commit().await {
            if err.is_validation() {
                warn!("Launch refused: {err}");
                self.notifier.failure("Cannot launch with these settings", &err);
            } else if matches!(err, LauncherError::CommitInProgress) {
                debug!("Launch ignored while settings are saving");
            }
            return Err(err);
        }

        if let Err(source) = self.host.start_launch(&version).await {
            let err = LauncherError::LaunchStartFailed { version, source };
            warn!("{err}");
            self.notifier.failure("Failed to start Minecraft", &err);
            return Err(err);
        }

        info!("Host accepted launch of {}", version);
        Ok(())
    }

    /// Pick a version; the selector closes whatever state it was in.
    pub fn select_version(&self, id: &str) {
        self.catalog.select(id);
        self.view.lock().show_version_selector = false;
        self.changes.emit(&SessionEvent::VersionSelectorToggled(false));
    }

    pub fn toggle_version_selector(&self) -> bool {
        let open = {
            let mut view = self.view.lock();
            view.show_version_selector = !view.show_version_selector;
            view.show_version_selector
        };
        self.changes.emit(&SessionEvent::VersionSelectorToggled(open));
        open
    }

    pub fn toggle_show_all_logs(&self) -> bool {
        let show_all = {
            let mut view = self.view.lock();
            view.show_all_logs = !view.show_all_logs;
            view.show_all_logs
        };
        self.changes.emit(&SessionEvent::LogViewToggled(show_all));
        show_all
    }

    /// Switch views. Entering Mods loads the installed list when a game
    /// directory is committed and its list has not been requested yet, so a
    /// newly committed directory is picked up on the next visit.
    pub async fn navigate(&self, section: Section) -> LauncherResult<()> {
        let game_directory = self.config.game_directory();
        let load_mods = {
            let mut view = self.view.lock();
            view.active_section = section;
            let needs_list = section == Section::Mods
                && !game_directory.is_empty()
                && view.mods_directory.as_deref() != Some(game_directory.as_str());
            if needs_list {
                view.mods_directory = Some(game_directory.clone());
            }
            needs_list
        };
        debug!("Navigated to {}", section);
        self.changes.emit(&SessionEvent::SectionChanged(section));

        if load_mods {
            self.mods.load_installed(&game_directory).await?;
        }
        Ok(())
    }

    pub fn active_section(&self) -> Section {
        self.view.lock().active_section
    }

    pub fn shows_version_selector(&self) -> bool {
        self.view.lock().show_version_selector
    }

    pub fn shows_all_logs(&self) -> bool {
        self.view.lock().show_all_logs
    }

    /// The log panel text for the current view mode.
    pub fn log_view(&self) -> String {
        let show_all = self.view.lock().show_all_logs;
        self.events.render(self.options.log_tail_limit, show_all)
    }

    // ── Version catalog ─────────────────────────────────
    // Selection is only reachable through `select_version`.

    pub async fn refresh_versions(&self) -> LauncherResult<usize> {
        self.catalog.fetch_all().await
    }

    pub fn selected_version(&self) -> String {
        self.catalog.selected()
    }

    /// Versions the picker shows under the current snapshot setting.
    pub fn visible_versions(&self) -> Vec<VersionDescriptor> {
        self.catalog.visible()
    }

    pub fn all_versions(&self) -> Vec<VersionDescriptor> {
        self.catalog.all()
    }

    pub fn toggle_snapshots(&self) -> bool {
        self.catalog.toggle_snapshots()
    }

    pub fn versions_loading(&self) -> bool {
        self.catalog.is_loading()
    }

    pub fn subscribe_catalog<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&CatalogEvent) + Send + Sync + 'static,
    {
        self.catalog.subscribe(callback)
    }

    // ── Mods ────────────────────────────────────────────

    pub async fn refresh_mods(&self) -> LauncherResult<usize> {
        let game_directory = self.config.game_directory();
        self.view.lock().mods_directory = Some(game_directory.clone());
        self.mods.load_installed(&game_directory).await
    }

    /// Remote search against the selected version with the configured loader.
    pub async fn search_mods(&self, query: &str) -> LauncherResult<()> {
        self.mods
            .search(
                query,
                &self.catalog.selected(),
                self.options.default_mod_loader,
                self.options.search_limit,
            )
            .await
    }

    pub async fn toggle_mod(&self, mod_id: &str, enabled: bool) -> LauncherResult<()> {
        self.mods
            .toggle_enabled(&self.config.game_directory(), mod_id, enabled)
            .await
    }

    pub async fn delete_mod(&self, mod_id: &str) -> LauncherResult<()> {
        self.mods
            .delete(&self.config.game_directory(), mod_id)
            .await
    }

    pub async fn install_mod(&self, file_path: &Path) -> LauncherResult<ModRecord> {
        self.mods
            .install_from_file(&self.config.game_directory(), file_path)
            .await
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let (active_section, show_version_selector, show_all_logs) = {
            let view = self.view.lock();
            (
                view.active_section,
                view.show_version_selector,
                view.show_all_logs,
            )
        };
        SessionSnapshot {
            active_section,
            selected_version: self.catalog.selected(),
            show_version_selector,
            show_all_logs,
            show_snapshots: self.catalog.shows_snapshots(),
            progress: self.events.display_progress(),
            log: self
                .events
                .render(self.options.log_tail_limit, show_all_logs),
            player_name: self.config.draft().player_name,
        }
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&SessionEvent) + Send + Sync + 'static,
    {
        self.changes.subscribe(callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{ConfigEdit, LauncherConfig};
    use crate::core::host::testing::FakeHost;
    use crate::core::mods::ModLoader;

    fn session(host: &Arc<FakeHost>) -> SessionOrchestrator {
        SessionOrchestrator::new(host.clone(), ClientOptions::default())
    }

    fn valid_config(game_directory: &str) -> LauncherConfig {
        LauncherConfig {
            player_name: "Steve".into(),
            game_directory: game_directory.into(),
            java_executable: Some("java".into()),
            ..LauncherConfig::default()
        }
    }

    #[test]
    fn starts_on_home_with_closed_selector() {
        let host = Arc::new(FakeHost::default());
        let session = session(&host);
        let snap = session.snapshot();
        assert_eq!(snap.active_section, Section::Home);
        assert_eq!(snap.selected_version, "1.20.1");
        assert!(!snap.show_version_selector);
        assert!(!snap.show_all_logs);
    }

    #[test]
    fn select_closes_selector_from_either_state() {
        let host = Arc::new(FakeHost::default());
        let session = session(&host);

        session.select_version("1.19.4");
        assert!(!session.shows_version_selector());

        assert!(session.toggle_version_selector());
        session.select_version("1.20.4");
        assert!(!session.shows_version_selector());
        assert_eq!(session.selected_version(), "1.20.4");
    }

    #[tokio::test]
    async fn bootstrap_survives_catalog_failure() {
        let host = Arc::new(FakeHost::default());
        host.set_config(valid_config("/g"));
        host.fail("fetch_versions");
        let session = session(&host);

        let report = session.bootstrap().await;

        assert!(report.catalog.is_err());
        assert!(report.config.is_ok());
        assert!(!report.is_complete());
        assert_eq!(session.selected_version(), "1.20.1");
        assert_eq!(session.config.player_name(), "Steve");
    }

    #[tokio::test]
    async fn launch_saves_before_starting() {
        let host = Arc::new(FakeHost::default());
        host.set_config(valid_config("/g"));
        let session = session(&host);
        session.bootstrap().await;
        session.select_version("1.19.2");

        session.launch().await.unwrap();

        let order: Vec<_> = host
            .call_order()
            .into_iter()
            .filter(|c| *c == "persist_config" || *c == "start_launch")
            .collect();
        assert_eq!(order, vec!["persist_config", "start_launch"]);
        assert_eq!(host.launched(), vec!["1.19.2"]);
    }

    #[tokio::test]
    async fn launch_stops_when_save_fails() {
        let host = Arc::new(FakeHost::default());
        host.set_config(valid_config("/g"));
        host.fail("persist_config");
        let session = session(&host);
        session.bootstrap().await;

        let err = session.launch().await.unwrap_err();

        assert!(matches!(err, LauncherError::ConfigPersistFailed(_)));
        assert_eq!(host.calls("start_launch"), 0);
    }

    #[tokio::test]
    async fn invalid_settings_block_launch_without_host_calls() {
        let host = Arc::new(FakeHost::default());
        host.set_config(valid_config("/g"));
        let session = session(&host);
        session.bootstrap().await;
        session.config.edit(ConfigEdit::GameDirectory(String::new()));
        let before = host.call_order().len();

        let err = session.launch().await.unwrap_err();

        assert!(err.is_validation());
        assert_eq!(host.call_order().len(), before);
    }

    #[tokio::test]
    async fn start_failure_is_reported_separately() {
        let host = Arc::new(FakeHost::default());
        host.set_config(valid_config("/g"));
        host.fail("start_launch");
        let session = session(&host);
        session.bootstrap().await;

        let err = session.launch().await.unwrap_err();

        assert!(matches!(err, LauncherError::LaunchStartFailed { .. }));
        assert_eq!(host.persisted().len(), 1);
    }

    #[tokio::test]
    async fn first_mods_visit_loads_once() {
        let host = Arc::new(FakeHost::default());
        host.set_config(valid_config("/g"));
        let session = session(&host);
        session.bootstrap().await;

        session.navigate(Section::Mods).await.unwrap();
        session.navigate(Section::Home).await.unwrap();
        session.navigate(Section::Mods).await.unwrap();

        assert_eq!(host.calls("list_installed_mods"), 1);
        assert_eq!(session.active_section(), Section::Mods);
    }

    #[tokio::test]
    async fn committed_directory_change_reloads_mods_on_next_visit() {
        let host = Arc::new(FakeHost::default());
        host.set_config(valid_config("/g1"));
        let session = session(&host);
        session.bootstrap().await;
        session.navigate(Section::Mods).await.unwrap();

        session.config.edit(ConfigEdit::GameDirectory("/g2".into()));
        session.navigate(Section::Mods).await.unwrap();
        assert_eq!(host.calls("list_installed_mods"), 1);

        session.config.commit().await.unwrap();
        session.navigate(Section::Home).await.unwrap();
        session.navigate(Section::Mods).await.unwrap();

        assert_eq!(host.calls("list_installed_mods"), 2);
        assert_eq!(session.mods.loaded_directory().as_deref(), Some("/g2"));
    }

    #[tokio::test]
    async fn mods_visit_without_directory_loads_nothing() {
        let host = Arc::new(FakeHost::default());
        let session = session(&host);

        session.navigate(Section::Mods).await.unwrap();
        session.navigate(Section::Settings).await.unwrap();

        assert_eq!(host.calls("list_installed_mods"), 0);
        assert_eq!(session.active_section(), Section::Settings);
    }

    #[tokio::test]
    async fn log_view_follows_toggle() {
        let host = Arc::new(FakeHost::default());
        let session = session(&host);
        for i in 0..60 {
            session.events.append(format!("line {i}"));
        }

        assert_eq!(session.log_view().lines().count(), 50);
        assert!(session.toggle_show_all_logs());
        assert_eq!(session.log_view().lines().count(), 60);
        assert_eq!(session.events.len(), 60);
    }

    #[tokio::test]
    async fn search_uses_selected_version_and_defaults() {
        let host = Arc::new(FakeHost::default());
        let session = session(&host);
        session.select_version("1.18.2");

        session.search_mods("  sodium ").await.unwrap();

        let searches = host.searches();
        assert_eq!(searches.len(), 1);
        assert_eq!(searches[0].query, "sodium");
        assert_eq!(searches[0].minecraft_version, "1.18.2");
        assert_eq!(searches[0].mod_loader, ModLoader::Fabric);
        assert_eq!(searches[0].limit, 20);
    }
}
