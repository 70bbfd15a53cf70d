//! # filedesk-service
//!
//! Service layer for FileDesk. Services wrap the in-memory stores with
//! validation, domain events, and user-facing notifications. The
//! [`Navigator`] derives the current-folder view from the stores.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references. [`Workspace`] does the wiring.

pub mod events;
pub mod file;
pub mod folder;
pub mod navigation;
pub mod notification;
pub mod workspace;

pub use events::EventBus;
pub use file::{FileFilter, FileService, KindFilter, Selection, StorageUsage};
pub use folder::FolderService;
pub use navigation::{FolderView, Navigator, ViewWatcher};
pub use notification::NotificationCenter;
pub use workspace::Workspace;
