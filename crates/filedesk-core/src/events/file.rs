//! File-related domain events.

use serde::{Deserialize, Serialize};

use crate::types::{FileId, FolderId};

/// Events related to file operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FileEvent {
    /// A batch of files was uploaded.
    Uploaded {
        /// Ids of the new records, in upload order.
        file_ids: Vec<FileId>,
        /// Total size of the batch in bytes.
        total_bytes: u64,
    },
    /// Files were deleted.
    Deleted {
        /// Ids that were actually removed.
        file_ids: Vec<FileId>,
    },
    /// A file was moved.
    Moved {
        /// The file ID.
        file_id: FileId,
        /// The source folder (`None` = root).
        from_folder_id: Option<FolderId>,
        /// The destination folder (`None` = root).
        to_folder_id: Option<FolderId>,
    },
}
