// ─── UI Commands ───
// Every user action the shell can trigger, routed onto the session.
// Commands arrive as JSON tagged by `command`, e.g.
//   {"command":"select_version","id":"1.20.1"}

use std::path::PathBuf;

use serde::Deserialize;
use tracing::debug;

use crate::core::config::ConfigEdit;
use crate::core::error::LauncherResult;
use crate::core::state::{Section, SessionOrchestrator};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    // ── Home ────────────────────────────────────────────
    Launch,
    ToggleVersionSelector,
    SelectVersion { id: String },
    ToggleSnapshots,
    ToggleShowAllLogs,
    Navigate { section: Section },

    // ── Settings ────────────────────────────────────────
    EditConfig { edit: ConfigEdit },
    SaveConfig,
    CancelConfig,

    // ── Mods ────────────────────────────────────────────
    RefreshMods,
    ToggleMod { mod_id: String, enabled: bool },
    /// Sent only after the user confirmed the deletion.
    DeleteMod { mod_id: String },
    InstallMod { file_path: PathBuf },
    SearchMods { query: String },
}

pub async fn dispatch(session: &SessionOrchestrator, command: Command) -> LauncherResult<()> {
    debug!("Dispatching {:?}", command);

    match command {
        Command::Launch => session.launch().await,
        Command::ToggleVersionSelector => {
            session.toggle_version_selector();
            Ok(())
        }
        Command::SelectVersion { id } => {
            session.select_version(&id);
            Ok(())
        }
        Command::ToggleSnapshots => {
            session.toggle_snapshots();
            Ok(())
        }
        Command::ToggleShowAllLogs => {
            session.toggle_show_all_logs();
            Ok(())
        }
        Command::Navigate { section } => session.navigate(section).await,

        Command::EditConfig { edit } => {
            session.config.edit(edit);
            Ok(())
        }
        Command::SaveConfig => session.config.commit().await,
        Command::CancelConfig => {
            session.config.cancel();
            Ok(())
        }

        Command::RefreshMods => session.refresh_mods().await.map(|_| ()),
        Command::ToggleMod { mod_id, enabled } => session.toggle_mod(&mod_id, enabled).await,
        Command::DeleteMod { mod_id } => session.delete_mod(&mod_id).await,
        Command::InstallMod { file_path } => session.install_mod(&file_path).await.map(|_| ()),
        Command::SearchMods { query } => session.search_mods(&query).await,
    }
}
