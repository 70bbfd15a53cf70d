//! File entity model.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use filedesk_core::types::{FileId, FolderId};

use super::kind::FileKind;

/// Opaque handle to the bytes behind a file record.
///
/// The record never carries its bytes; a preview or download resolves the
/// handle through the blob storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentRef(String);

impl ContentRef {
    /// Wrap a handle returned by the blob storage.
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    /// The raw handle string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A file held by the file store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Unique file identifier.
    pub id: FileId,
    /// The file name (including extension).
    pub name: String,
    /// File size in bytes.
    pub size: u64,
    /// MIME type as reported by the blob source. Free-form, may be empty.
    pub mime_type: String,
    /// When the file was uploaded.
    pub uploaded_at: DateTime<Utc>,
    /// Handle to the file bytes.
    pub content: ContentRef,
    /// Containing folder (`None` = root).
    pub folder_id: Option<FolderId>,
}

impl FileRecord {
    /// Whether the file sits at the root.
    pub fn is_at_root(&self) -> bool {
        self.folder_id.is_none()
    }

    /// Broad category derived from the MIME type.
    pub fn kind(&self) -> FileKind {
        FileKind::from_mime(&self.mime_type)
    }

    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit('.')
            .next()
            .filter(|ext| *ext != self.name)
            .map(|ext| ext.to_lowercase())
    }

    /// Copy of this record placed in another folder.
    pub fn relocated(&self, folder_id: Option<FolderId>) -> Self {
        Self {
            folder_id,
            ..self.clone()
        }
    }
}

/// A raw blob handed to an upload.
#[derive(Debug, Clone)]
pub struct UploadBlob {
    /// File name reported by the source.
    pub name: String,
    /// Size in bytes reported by the source.
    pub size: u64,
    /// MIME type reported by the source.
    pub mime_type: String,
    /// The blob bytes.
    pub bytes: Bytes,
}

impl UploadBlob {
    /// Build a blob whose size is the length of its bytes.
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            mime_type: mime_type.into(),
            bytes,
        }
    }
}
