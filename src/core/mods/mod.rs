pub mod format;
pub mod manager;
pub mod model;

pub use format::format_file_size;
pub use manager::{ModLifecycleManager, ModsEvent, DEFAULT_SEARCH_LIMIT};
pub use model::{ModLoader, ModRecord, ModSearchQuery, ModSearchResult, ModSource};
