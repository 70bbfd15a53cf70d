//! The derived view of one folder.

use std::sync::Arc;

use filedesk_core::types::FolderId;
use filedesk_entity::file::FileRecord;
use filedesk_entity::folder::Folder;
use filedesk_store::file::in_folder;
use filedesk_store::folder::{ancestry, children};
use filedesk_store::{FileStore, FolderStore};

/// Everything the presentation layer needs to render the current folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderView {
    /// The folder being shown (`None` = root).
    pub cursor: Option<FolderId>,
    /// Whether the cursor names an existing folder (always true at root).
    pub exists: bool,
    /// Ancestors down to and including the current folder, root first.
    pub breadcrumb: Vec<Arc<Folder>>,
    /// Folders directly inside the current one.
    pub folders: Vec<Arc<Folder>>,
    /// Files directly inside the current one.
    pub files: Vec<Arc<FileRecord>>,
}

impl FolderView {
    /// Derive the view for `cursor` from the stores' current snapshots.
    ///
    /// A cursor naming a folder that does not exist yields an empty view
    /// rather than an error.
    pub fn compose(files: &FileStore, folders: &FolderStore, cursor: Option<FolderId>) -> Self {
        Self::from_snapshots(&files.snapshot(), &folders.snapshot(), cursor)
    }

    /// Derive the view from one snapshot of each collection.
    pub fn from_snapshots(
        files: &[Arc<FileRecord>],
        folders: &[Arc<Folder>],
        cursor: Option<FolderId>,
    ) -> Self {
        if let Some(id) = cursor {
            if !folders.iter().any(|f| f.id == id) {
                return Self::missing(id);
            }
        }

        Self {
            cursor,
            exists: true,
            breadcrumb: ancestry(folders, cursor),
            folders: children(folders, cursor),
            files: in_folder(files, cursor),
        }
    }

    fn missing(id: FolderId) -> Self {
        Self {
            cursor: Some(id),
            exists: false,
            breadcrumb: Vec::new(),
            folders: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Whether the view has neither folders nor files.
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.files.is_empty()
    }

    /// Breadcrumb rendered as `/A/B`. Root is `/`.
    pub fn path_string(&self) -> String {
        if self.breadcrumb.is_empty() {
            return "/".to_string();
        }
        self.breadcrumb
            .iter()
            .map(|f| format!("/{}", f.name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filedesk_entity::file::UploadBlob;
    use filedesk_store::MemoryBlobStorage;

    #[test]
    fn test_view_comes_from_one_snapshot_of_each_store() {
        let files = Arc::new(FileStore::new(Arc::new(MemoryBlobStorage::new()), 200));
        let folders = FolderStore::new(files.clone(), 100);
        let docs = folders.create("Docs", None);
        let uploaded = files.upload(vec![UploadBlob::new("a.txt", "text/plain", vec![0u8; 2])]);
        files.move_to(uploaded[0].id, Some(docs.id));

        let file_snapshot = files.snapshot();
        let folder_snapshot = folders.snapshot();

        folders.create("Later", Some(docs.id));
        files.move_to(uploaded[0].id, None);

        let view = FolderView::from_snapshots(&file_snapshot, &folder_snapshot, Some(docs.id));
        assert!(view.exists);
        assert_eq!(view.path_string(), "/Docs");
        assert!(view.folders.is_empty());
        assert_eq!(view.files.len(), 1);

        let live = FolderView::compose(&files, &folders, Some(docs.id));
        assert_eq!(live.folders.len(), 1);
        assert!(live.files.is_empty());
    }

    #[test]
    fn test_missing_cursor_is_empty() {
        let view = FolderView::from_snapshots(&[], &[], Some(FolderId(7)));
        assert!(!view.exists);
        assert!(view.is_empty());
        assert_eq!(view.path_string(), "/");
    }
}
