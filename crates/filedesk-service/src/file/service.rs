//! File operations: upload, delete, move, and the queries built on them.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};

use filedesk_core::config::storage::StorageConfig;
use filedesk_core::error::AppError;
use filedesk_core::events::FileEvent;
use filedesk_core::traits::NotificationSink;
use filedesk_core::types::{FileId, FolderId};
use filedesk_entity::file::{FileRecord, UploadBlob, format_size};
use filedesk_store::{FileStore, FolderStore};

use crate::events::EventBus;

use super::search::FileFilter;
use super::usage::StorageUsage;

/// Handles file mutations and keeps folder file counts current.
///
/// Every mutating call publishes one domain event and sends one
/// notification to the sink.
#[derive(Clone)]
pub struct FileService {
    /// File store.
    files: Arc<FileStore>,
    /// Folder store (for file count refreshes).
    folders: Arc<FolderStore>,
    /// Domain event bus.
    events: EventBus,
    /// Where success and failure messages go.
    notifier: Arc<dyn NotificationSink>,
    /// Quota and per-blob limits.
    limits: StorageConfig,
    /// Default count for `recent`.
    recent_default: usize,
}

impl std::fmt::Debug for FileService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileService")
            .field("files", &self.files.len())
            .field("limits", &self.limits)
            .finish_non_exhaustive()
    }
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        files: Arc<FileStore>,
        folders: Arc<FolderStore>,
        events: EventBus,
        notifier: Arc<dyn NotificationSink>,
        limits: StorageConfig,
        recent_default: usize,
    ) -> Self {
        Self {
            files,
            folders,
            events,
            notifier,
            limits,
            recent_default,
        }
    }

    /// Uploads a batch of blobs to the root, all or nothing.
    ///
    /// The batch is rejected before reaching the store if any blob exceeds
    /// the per-file limit or the batch would overflow the quota.
    pub async fn upload(&self, blobs: Vec<UploadBlob>) -> Result<Vec<FileRecord>, AppError> {
        if let Err(e) = self.check_limits(&blobs) {
            warn!(error = %e, "Upload rejected");
            self.notifier
                .error(format!("Upload failed: {}", e.message))
                .await;
            return Err(e);
        }

        let created = self.files.upload(blobs);
        self.folders.refresh_file_counts();

        let total_bytes: u64 = created.iter().map(|f| f.size).sum();
        self.events.publish(FileEvent::Uploaded {
            file_ids: created.iter().map(|f| f.id).collect(),
            total_bytes,
        });

        info!(count = created.len(), total_bytes, "Files uploaded");
        self.notifier
            .success(format!(
                "Uploaded {} ({})",
                plural(created.len(), "file"),
                format_size(total_bytes)
            ))
            .await;

        Ok(created)
    }

    /// Deletes files by id. Unknown ids are ignored.
    ///
    /// Returns how many files were removed.
    pub async fn delete(&self, ids: &[FileId]) -> Result<usize, AppError> {
        let removed = self.files.delete(ids);
        self.folders.refresh_file_counts();

        let removed_ids: Vec<FileId> = removed.iter().map(|f| f.id).collect();
        self.events.publish(FileEvent::Deleted {
            file_ids: removed_ids.clone(),
        });

        info!(requested = ids.len(), removed = removed_ids.len(), "Files deleted");
        self.notifier
            .success(format!("Deleted {}", plural(removed_ids.len(), "file")))
            .await;

        Ok(removed_ids.len())
    }

    /// Deletes a single file.
    pub async fn delete_one(&self, id: FileId) -> Result<bool, AppError> {
        Ok(self.delete(&[id]).await? == 1)
    }

    /// Moves a file to another folder (`None` = root).
    ///
    /// The target is trusted. An unknown file id changes nothing and
    /// returns `Ok(None)`.
    pub async fn move_to(
        &self,
        id: FileId,
        target: Option<FolderId>,
    ) -> Result<Option<FileRecord>, AppError> {
        let from = self.files.get(id).and_then(|f| f.folder_id);
        let Some(moved) = self.files.move_to(id, target) else {
            warn!(file_id = %id, "Move requested for unknown file");
            return Ok(None);
        };
        self.folders.refresh_file_counts();

        self.events.publish(FileEvent::Moved {
            file_id: id,
            from_folder_id: from,
            to_folder_id: target,
        });

        let destination = match target {
            None => "root".to_string(),
            Some(t) => self
                .folders
                .get(t)
                .map(|folder| format!("'{}'", folder.name))
                .unwrap_or_else(|| format!("folder {t}")),
        };
        info!(file_id = %id, from = ?from, to = ?target, "File moved");
        self.notifier
            .success(format!("Moved '{}' to {destination}", moved.name))
            .await;

        Ok(Some(moved))
    }

    /// Files directly in a folder (`None` = root).
    pub fn files_in(&self, folder_id: Option<FolderId>) -> Vec<Arc<FileRecord>> {
        self.files.files_in(folder_id)
    }

    /// The first `count` files in insertion order, or the configured
    /// default count.
    pub fn recent(&self, count: Option<usize>) -> Vec<Arc<FileRecord>> {
        self.files.recent(count.unwrap_or(self.recent_default))
    }

    /// Every file matching the filter, across all folders.
    pub fn search(&self, filter: &FileFilter) -> Vec<Arc<FileRecord>> {
        filter.apply(&self.files.snapshot())
    }

    /// Looks up one file.
    pub fn get(&self, id: FileId) -> Result<Arc<FileRecord>, AppError> {
        self.files
            .get(id)
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }

    /// Reads the bytes of a file for preview or download.
    pub async fn read_content(&self, id: FileId) -> Result<Bytes, AppError> {
        let record = self.get(id)?;
        self.files.read_content(&record).await
    }

    /// Bytes used against the quota.
    pub fn storage_usage(&self) -> StorageUsage {
        StorageUsage {
            used_bytes: self.files.total_size(),
            quota_bytes: self.limits.quota_bytes,
        }
    }

    fn check_limits(&self, blobs: &[UploadBlob]) -> Result<(), AppError> {
        if let Some(big) = blobs
            .iter()
            .find(|b| b.size > self.limits.max_upload_size_bytes)
        {
            return Err(AppError::validation(format!(
                "'{}' is {} which exceeds the {} limit",
                big.name,
                format_size(big.size),
                format_size(self.limits.max_upload_size_bytes)
            )));
        }

        let batch: u64 = blobs.iter().map(|b| b.size).sum();
        let usage = self.storage_usage();
        if usage.would_exceed(batch) {
            return Err(AppError::validation(format!(
                "Upload of {} exceeds remaining quota of {}",
                format_size(batch),
                format_size(usage.remaining_bytes())
            )));
        }
        Ok(())
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
