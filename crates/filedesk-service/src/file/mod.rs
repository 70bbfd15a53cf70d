//! File operations, search, selection, and storage usage.

pub mod search;
pub mod selection;
pub mod service;
pub mod usage;

pub use search::{FileFilter, KindFilter};
pub use selection::Selection;
pub use service::FileService;
pub use usage::StorageUsage;
