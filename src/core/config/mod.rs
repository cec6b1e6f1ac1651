pub mod model;
pub mod store;

pub use model::{ConfigDraft, ConfigEdit, LauncherConfig, DEFAULT_PLAYER_NAME};
pub use store::{ConfigState, ConfigStore};
