//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use filedesk_core::types::FolderId;

/// A folder in the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Parent folder ID (`None` for root-level folders). May dangle after
    /// the parent is deleted.
    pub parent_id: Option<FolderId>,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// Number of files directly inside. Derived from the file store; only as
    /// fresh as the last recount.
    pub file_count: u64,
}

impl Folder {
    /// Check if this is a root-level folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Copy of this folder with a different file count.
    pub fn with_file_count(&self, file_count: u64) -> Self {
        Self {
            file_count,
            ..self.clone()
        }
    }
}
