use std::path::PathBuf;
use thiserror::Error;

/// Failure reported by the host process for a single request.
#[derive(Debug, Error)]
pub enum HostError {
    /// The host handled the request and answered with an error message.
    #[error("{0}")]
    Rejected(String),

    /// The request never got a usable answer (channel closed, bridge gone).
    #[error("host transport failed: {0}")]
    Transport(String),

    // ── JSON ────────────────────────────────────────────
    #[error("malformed host payload: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type HostResult<T> = Result<T, HostError>;

/// Coarse classification used to pick how a failure is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Local check failed before anything was sent to the host.
    Validation,
    /// The action was refused because an identical one is still running.
    Busy,
    /// A host request failed.
    Host,
}

/// Central error type for the launcher client core.
/// Every store returns `Result<T, LauncherError>`.
#[derive(Debug, Error)]
pub enum LauncherError {
    // ── Validation ──────────────────────────────────────
    #[error("Configuration validation error in field '{field}': {message}")]
    InvalidConfig {
        field: &'static str,
        message: &'static str,
    },

    #[error("A configuration save is already in progress")]
    CommitInProgress,

    // ── Configuration ───────────────────────────────────
    #[error("Launcher configuration unavailable: {0}")]
    ConfigUnavailable(#[source] HostError),

    #[error("Failed to save launcher configuration: {0}")]
    ConfigPersistFailed(#[source] HostError),

    // ── Versions / launch ───────────────────────────────
    #[error("Version catalog unavailable: {0}")]
    CatalogUnavailable(#[source] HostError),

    #[error("Failed to start Minecraft {version}: {source}")]
    LaunchStartFailed { version: String, source: HostError },

    // ── Mods ────────────────────────────────────────────
    #[error("Failed to load installed mods from {game_directory}: {source}")]
    ModListUnavailable {
        game_directory: String,
        source: HostError,
    },

    #[error("Failed to toggle mod {id}: {source}")]
    ModToggleFailed { id: String, source: HostError },

    #[error("Failed to delete mod {id}: {source}")]
    ModDeleteFailed { id: String, source: HostError },

    #[error("Failed to install mod from {path:?}: {source}")]
    ModInstallFailed { path: PathBuf, source: HostError },

    #[error("Failed to search mods for '{query}': {source}")]
    ModSearchFailed { query: String, source: HostError },
}

/// Convenience alias used throughout the crate.
pub type LauncherResult<T> = Result<T, LauncherError>;

impl LauncherError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LauncherError::InvalidConfig { .. } => ErrorKind::Validation,
            LauncherError::CommitInProgress => ErrorKind::Busy,
            _ => ErrorKind::Host,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    /// The underlying host failure, if this error came from a host request.
    pub fn host_error(&self) -> Option<&HostError> {
        match self {
            LauncherError::ConfigUnavailable(source)
            | LauncherError::ConfigPersistFailed(source)
            | LauncherError::CatalogUnavailable(source) => Some(source),
            LauncherError::LaunchStartFailed { source, .. }
            | LauncherError::ModListUnavailable { source, .. }
            | LauncherError::ModToggleFailed { source, .. }
            | LauncherError::ModDeleteFailed { source, .. }
            | LauncherError::ModInstallFailed { source, .. }
            | LauncherError::ModSearchFailed { source, .. } => Some(source),
            LauncherError::InvalidConfig { .. } | LauncherError::CommitInProgress => None,
        }
    }
}

// ── Serialization for IPC ───────────────────────────────
// Errors cross the UI boundary as their display string.
impl serde::Serialize for LauncherError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_validation_and_host_failures() {
        let invalid = LauncherError::InvalidConfig {
            field: "player_name",
            message: "Player name cannot be empty",
        };
        assert_eq!(invalid.kind(), ErrorKind::Validation);
        assert!(invalid.host_error().is_none());

        let host = LauncherError::LaunchStartFailed {
            version: "1.20.1".into(),
            source: HostError::Rejected("java missing".into()),
        };
        assert_eq!(host.kind(), ErrorKind::Host);
        assert!(host.host_error().is_some());
        assert_eq!(LauncherError::CommitInProgress.kind(), ErrorKind::Busy);
    }

    #[test]
    fn serializes_as_display_string() {
        let err = LauncherError::ModToggleFailed {
            id: "sodium".into(),
            source: HostError::Rejected("file locked".into()),
        };
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, "\"Failed to toggle mod sodium: file locked\"");
    }
}
