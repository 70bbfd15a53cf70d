//! # filedesk-entity
//!
//! Domain entity models for FileDesk. Every struct in this crate is a plain
//! value: file and folder records held by the stores, the blobs handed to an
//! upload, folder tree views, and user-facing notifications. All entities
//! derive `Debug`, `Clone`, `Serialize`, and `Deserialize` where the
//! payload allows it.

pub mod file;
pub mod folder;
pub mod notification;

pub use file::{ContentRef, FileKind, FileRecord, UploadBlob, format_size};
pub use folder::{Folder, FolderNode, FolderTree};
pub use notification::Notification;
