pub mod catalog;

pub use catalog::{CatalogEvent, VersionCatalogStore, VersionDescriptor, VersionKind};
