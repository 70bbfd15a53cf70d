//! Domain events emitted by FileDesk operations.
//!
//! Events are published on the event bus after each successful mutation
//! and consumed by whoever subscribes (the CLI echoes them at debug level).

pub mod file;
pub mod folder;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use file::FileEvent;
pub use folder::FolderEvent;

/// Wrapper for all domain events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The event payload.
    pub payload: EventPayload,
}

/// Union of all domain event types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event")]
pub enum EventPayload {
    /// A file-related event.
    File(FileEvent),
    /// A folder-related event.
    Folder(FolderEvent),
}

impl DomainEvent {
    /// Create a new domain event.
    pub fn new(payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            payload,
        }
    }
}

impl From<FileEvent> for EventPayload {
    fn from(event: FileEvent) -> Self {
        Self::File(event)
    }
}

impl From<FolderEvent> for EventPayload {
    fn from(event: FolderEvent) -> Self {
        Self::Folder(event)
    }
}
