//! Folder-related domain events.

use serde::{Deserialize, Serialize};

use crate::types::FolderId;

/// Events related to folder operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FolderEvent {
    /// A folder was created.
    Created {
        /// The folder ID.
        folder_id: FolderId,
        /// Parent folder (`None` = root level).
        parent_id: Option<FolderId>,
        /// The folder name.
        name: String,
    },
    /// A folder was deleted.
    Deleted {
        /// The folder ID.
        folder_id: FolderId,
        /// Files moved to root because they lived in the folder.
        reparented_files: usize,
        /// Child folders left pointing at the deleted id.
        orphaned_children: usize,
    },
}
