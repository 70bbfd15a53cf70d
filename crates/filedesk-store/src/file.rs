//! File store: the single source of truth for file records.

use std::collections::HashSet;
use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use tokio::sync::watch;
use tracing::debug;

use filedesk_core::result::AppResult;
use filedesk_core::traits::BlobStorage;
use filedesk_core::types::{FileId, FolderId, IdSequence};
use filedesk_entity::file::{ContentRef, FileRecord, UploadBlob};

use crate::observable::{Observable, Snapshot};

/// Owns every file record and publishes the full collection after each
/// mutation.
///
/// None of the operations fail. Unknown ids are ignored and target folders
/// are trusted as given.
#[derive(Debug)]
pub struct FileStore {
    records: Observable<FileRecord>,
    ids: IdSequence<FileId>,
    blobs: Arc<dyn BlobStorage>,
}

impl FileStore {
    /// Create an empty store whose first file id is `first_id`.
    pub fn new(blobs: Arc<dyn BlobStorage>, first_id: u64) -> Self {
        Self {
            records: Observable::new(),
            ids: IdSequence::starting_at(first_id),
            blobs,
        }
    }

    /// The current collection, in insertion order.
    pub fn snapshot(&self) -> Snapshot<FileRecord> {
        self.records.snapshot()
    }

    /// Subscribe to every future publish.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot<FileRecord>> {
        self.records.subscribe()
    }

    /// Number of files.
    pub fn len(&self) -> usize {
        self.records.snapshot().len()
    }

    /// Whether the store holds no files.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up one file.
    pub fn get(&self, id: FileId) -> Option<Arc<FileRecord>> {
        self.records.snapshot().iter().find(|f| f.id == id).cloned()
    }

    /// Append a batch of blobs as new root-level records in one publish.
    ///
    /// Returns the committed records in blob order.
    pub fn upload(&self, blobs: Vec<UploadBlob>) -> Vec<FileRecord> {
        let uploaded_at = Utc::now();
        let created: Vec<FileRecord> = blobs
            .into_iter()
            .map(|blob| FileRecord {
                id: self.ids.next(),
                name: blob.name,
                size: blob.size,
                mime_type: blob.mime_type,
                uploaded_at,
                content: ContentRef::new(self.blobs.put(blob.bytes)),
                folder_id: None,
            })
            .collect();

        let total = self.records.publish_with(|current| {
            let mut next = current.to_vec();
            next.extend(created.iter().cloned().map(Arc::new));
            let total = next.len();
            (next, total)
        });

        debug!(added = created.len(), total, "File store published upload");
        created
    }

    /// Remove every record whose id is in `ids`. Unknown ids are ignored.
    ///
    /// Publishes once and returns the removed records.
    pub fn delete(&self, ids: &[FileId]) -> Vec<Arc<FileRecord>> {
        let wanted: HashSet<FileId> = ids.iter().copied().collect();

        let removed = self.records.publish_with(|current| {
            let (gone, kept): (Vec<_>, Vec<_>) =
                current.iter().cloned().partition(|f| wanted.contains(&f.id));
            (kept, gone)
        });

        for record in &removed {
            self.blobs.release(record.content.as_str());
        }

        debug!(
            requested = wanted.len(),
            removed = removed.len(),
            "File store published delete"
        );
        removed
    }

    /// Point one file at a different folder (`None` = root).
    ///
    /// The target is not checked against the folder store. Returns the updated
    /// record, or `None` when no file matched, in which case nothing is
    /// published.
    pub fn move_to(&self, id: FileId, target: Option<FolderId>) -> Option<FileRecord> {
        let mut moved = None;
        self.records.publish_if_changed(|current| {
            let index = current.iter().position(|f| f.id == id)?;
            let updated = current[index].relocated(target);
            moved = Some(updated.clone());

            let mut next = current.to_vec();
            next[index] = Arc::new(updated);
            Some(next)
        });

        if moved.is_some() {
            debug!(file_id = %id, target = ?target, "File store published move");
        }
        moved
    }

    /// Move every file in folder `from` to `to` in one publish.
    ///
    /// Returns how many records changed. Nothing is published when none did.
    pub fn reassign_folder(&self, from: FolderId, to: Option<FolderId>) -> usize {
        let mut changed = 0;
        self.records.publish_if_changed(|current| {
            let next: Vec<Arc<FileRecord>> = current
                .iter()
                .map(|f| {
                    if f.folder_id == Some(from) {
                        changed += 1;
                        Arc::new(f.relocated(to))
                    } else {
                        Arc::clone(f)
                    }
                })
                .collect();
            (changed > 0).then_some(next)
        });

        if changed > 0 {
            debug!(from = %from, to = ?to, changed, "File store published reassignment");
        }
        changed
    }

    /// Files whose folder is exactly `folder_id`.
    pub fn files_in(&self, folder_id: Option<FolderId>) -> Vec<Arc<FileRecord>> {
        in_folder(&self.records.snapshot(), folder_id)
    }

    /// The first `count` files in insertion order.
    ///
    /// This is not sorted by upload date: the oldest uploads come first.
    pub fn recent(&self, count: usize) -> Vec<Arc<FileRecord>> {
        self.records.snapshot().iter().take(count).cloned().collect()
    }

    /// Sum of all file sizes in bytes.
    pub fn total_size(&self) -> u64 {
        self.records.snapshot().iter().map(|f| f.size).sum()
    }

    /// Read the bytes behind a file.
    pub async fn read_content(&self, record: &FileRecord) -> AppResult<Bytes> {
        self.blobs.read(record.content.as_str()).await
    }
}

/// Files in the snapshot whose folder is exactly `folder_id`.
pub fn in_folder(files: &[Arc<FileRecord>], folder_id: Option<FolderId>) -> Vec<Arc<FileRecord>> {
    files
        .iter()
        .filter(|f| f.folder_id == folder_id)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::MemoryBlobStorage;

    fn make_store(first_id: u64) -> (FileStore, Arc<MemoryBlobStorage>) {
        let blobs = Arc::new(MemoryBlobStorage::new());
        (FileStore::new(blobs.clone(), first_id), blobs)
    }

    fn blob(name: &str) -> UploadBlob {
        UploadBlob::new(name, "text/plain", name.as_bytes().to_vec())
    }

    #[test]
    fn test_upload_assigns_ids_and_root() {
        let (store, blobs) = make_store(200);
        let created = store.upload(vec![blob("a.txt"), blob("b.txt")]);

        assert_eq!(created.len(), 2);
        assert_eq!(created[0].id, FileId(200));
        assert_eq!(created[1].id, FileId(201));
        assert!(created.iter().all(|f| f.folder_id.is_none()));
        assert_eq!(created[0].size, 5);
        assert_eq!(created[0].mime_type, "text/plain");
        assert_ne!(created[0].content, created[1].content);
        assert_eq!(blobs.len(), 2);
    }

    #[tokio::test]
    async fn test_upload_publishes_once() {
        let (store, _) = make_store(1);
        let mut rx = store.subscribe();

        store.upload(vec![blob("a"), blob("b"), blob("c")]);

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().len(), 3);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_upload_empty_batch() {
        let (store, _) = make_store(1);
        assert!(store.upload(Vec::new()).is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_ignores_unknown_and_is_idempotent() {
        let (store, blobs) = make_store(1);
        let created = store.upload(vec![blob("a"), blob("b"), blob("c")]);

        let removed = store.delete(&[created[1].id, FileId(999)]);
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].id, created[1].id);
        assert_eq!(store.len(), 2);
        assert_eq!(blobs.len(), 2);

        let before = store.snapshot();
        let removed_again = store.delete(&[created[1].id, FileId(999)]);
        assert!(removed_again.is_empty());
        let after = store.snapshot();
        assert_eq!(before.len(), after.len());
        assert!(before.iter().zip(after.iter()).all(|(a, b)| Arc::ptr_eq(a, b)));
    }

    #[test]
    fn test_move_changes_exactly_one_record() {
        let (store, _) = make_store(1);
        let created = store.upload(vec![blob("a"), blob("b"), blob("c")]);
        let before = store.snapshot();

        let moved = store.move_to(created[1].id, Some(FolderId(7))).expect("moved");
        assert_eq!(moved.folder_id, Some(FolderId(7)));

        let after = store.snapshot();
        assert!(Arc::ptr_eq(&before[0], &after[0]));
        assert!(!Arc::ptr_eq(&before[1], &after[1]));
        assert!(Arc::ptr_eq(&before[2], &after[2]));
        assert_eq!(after[1].name, before[1].name);
        assert_eq!(after[1].id, before[1].id);
    }

    #[test]
    fn test_move_unknown_is_noop() {
        let (store, _) = make_store(1);
        store.upload(vec![blob("a")]);
        let rx = store.subscribe();

        assert!(store.move_to(FileId(42), Some(FolderId(1))).is_none());
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_reassign_folder() {
        let (store, _) = make_store(1);
        let created = store.upload(vec![blob("a"), blob("b"), blob("c")]);
        store.move_to(created[0].id, Some(FolderId(9)));
        store.move_to(created[2].id, Some(FolderId(9)));

        assert_eq!(store.reassign_folder(FolderId(9), None), 2);
        assert_eq!(store.files_in(None).len(), 3);
        assert_eq!(store.reassign_folder(FolderId(9), None), 0);
    }

    #[test]
    fn test_files_in_partitions_collection() {
        let (store, _) = make_store(1);
        let created = store.upload(vec![blob("a"), blob("b"), blob("c"), blob("d")]);
        store.move_to(created[0].id, Some(FolderId(1)));
        store.move_to(created[3].id, Some(FolderId(2)));

        let mut seen: Vec<FileId> = [None, Some(FolderId(1)), Some(FolderId(2))]
            .into_iter()
            .flat_map(|folder| store.files_in(folder))
            .map(|f| f.id)
            .collect();
        seen.sort();
        let mut all: Vec<FileId> = created.iter().map(|f| f.id).collect();
        all.sort();
        assert_eq!(seen, all);
    }

    #[test]
    fn test_recent_is_insertion_order_prefix() {
        let (store, _) = make_store(1);
        let created = store.upload(vec![blob("first"), blob("second")]);
        store.upload(vec![blob("third")]);

        let recent = store.recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id, created[0].id);
        assert_eq!(recent[1].id, created[1].id);
        assert_eq!(store.recent(10).len(), 3);
        assert!(store.recent(0).is_empty());
    }

    #[tokio::test]
    async fn test_read_content_and_release_on_delete() {
        let (store, _) = make_store(1);
        let created = store.upload(vec![blob("hello")]);
        let bytes = store.read_content(&created[0]).await.unwrap();
        assert_eq!(&bytes[..], b"hello");

        store.delete(&[created[0].id]);
        assert!(store.read_content(&created[0]).await.is_err());
    }

    #[test]
    fn test_total_size() {
        let (store, _) = make_store(1);
        store.upload(vec![blob("abc"), blob("de")]);
        assert_eq!(store.total_size(), 5);
    }
}
