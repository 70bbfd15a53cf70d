//! # filedesk-store
//!
//! The in-memory state model behind FileDesk. Two stores own the two record
//! collections and republish a full snapshot after every mutation:
//!
//! - [`FileStore`] owns file records and the bytes behind them.
//! - [`FolderStore`] owns folders, resolves breadcrumbs, and keeps derived
//!   file counts in step with the file store.
//!
//! Snapshots are published through [`Observable`], a thin layer over a
//! `tokio::sync::watch` channel. A mutation always derives a new collection;
//! records it does not touch are carried over as the same `Arc`.

pub mod blob;
pub mod file;
pub mod folder;
pub mod observable;

pub use blob::MemoryBlobStorage;
pub use file::FileStore;
pub use folder::{FolderDeletion, FolderStore};
pub use observable::{Observable, Snapshot};
