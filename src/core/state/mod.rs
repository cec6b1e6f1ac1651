pub mod options;
pub mod session;

pub use options::{ClientOptions, DEFAULT_LOG_FILTER, DEFAULT_VERSION};
pub use session::{BootstrapReport, Section, SessionEvent, SessionOrchestrator, SessionSnapshot};
