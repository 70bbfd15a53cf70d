//! Core traits defined in `filedesk-core` and implemented by other crates.

pub mod notification;
pub mod storage;

pub use notification::{NotificationLevel, NotificationSink};
pub use storage::BlobStorage;
