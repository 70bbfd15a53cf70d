//! The navigation cursor and the views derived from it.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use filedesk_core::types::FolderId;
use filedesk_entity::file::FileRecord;
use filedesk_entity::folder::Folder;
use filedesk_store::{FileStore, FolderStore};

use super::view::FolderView;
use super::watcher::ViewWatcher;

/// Holds the "current folder" cursor and derives everything else on demand.
///
/// Nothing is cached: every accessor reads the stores' latest snapshots, so
/// results always reflect the most recent publish.
#[derive(Debug)]
pub struct Navigator {
    files: Arc<FileStore>,
    folders: Arc<FolderStore>,
    cursor: watch::Sender<Option<FolderId>>,
}

impl Navigator {
    /// Create a navigator positioned at root.
    pub fn new(files: Arc<FileStore>, folders: Arc<FolderStore>) -> Self {
        let (cursor, _rx) = watch::channel(None);
        Self {
            files,
            folders,
            cursor,
        }
    }

    /// The current folder (`None` = root).
    pub fn cursor(&self) -> Option<FolderId> {
        *self.cursor.borrow()
    }

    /// Move the cursor to any folder id, existing or not.
    pub fn enter(&self, folder_id: Option<FolderId>) -> FolderView {
        self.cursor.send_replace(folder_id);
        let view = self.view();
        if view.exists {
            debug!(cursor = ?folder_id, "Entered folder");
        } else {
            warn!(cursor = ?folder_id, "Entered folder that does not exist, showing empty view");
        }
        view
    }

    /// Go to the parent of the current folder.
    ///
    /// Root stays at root. A folder whose parent is gone leads to root.
    pub fn up(&self) -> FolderView {
        let parent = self
            .cursor()
            .and_then(|id| self.folders.get(id))
            .and_then(|folder| folder.parent_id)
            .filter(|parent| self.folders.get(*parent).is_some());
        self.enter(parent)
    }

    /// The full derived view for the current cursor.
    pub fn view(&self) -> FolderView {
        FolderView::compose(&self.files, &self.folders, self.cursor())
    }

    /// Ancestors of the current folder, root first.
    pub fn breadcrumb(&self) -> Vec<Arc<Folder>> {
        self.folders.path_to(self.cursor())
    }

    /// Folders directly inside the current one.
    pub fn visible_folders(&self) -> Vec<Arc<Folder>> {
        self.view().folders
    }

    /// Files directly inside the current one.
    pub fn visible_files(&self) -> Vec<Arc<FileRecord>> {
        self.view().files
    }

    /// Watch for store publishes and cursor moves.
    pub fn watch(&self) -> ViewWatcher {
        ViewWatcher::new(
            self.files.clone(),
            self.folders.clone(),
            self.cursor.subscribe(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filedesk_entity::file::UploadBlob;
    use filedesk_store::MemoryBlobStorage;

    fn make_navigator() -> (Arc<FileStore>, Arc<FolderStore>, Navigator) {
        let files = Arc::new(FileStore::new(Arc::new(MemoryBlobStorage::new()), 200));
        let folders = Arc::new(FolderStore::new(files.clone(), 100));
        let nav = Navigator::new(files.clone(), folders.clone());
        (files, folders, nav)
    }

    #[test]
    fn test_starts_at_root() {
        let (files, folders, nav) = make_navigator();
        folders.create("A", None);
        files.upload(vec![UploadBlob::new("x", "", Vec::new())]);

        let view = nav.view();
        assert_eq!(view.cursor, None);
        assert!(view.exists);
        assert!(view.breadcrumb.is_empty());
        assert_eq!(view.folders.len(), 1);
        assert_eq!(view.files.len(), 1);
        assert_eq!(view.path_string(), "/");
    }

    #[test]
    fn test_enter_derives_children_and_breadcrumb() {
        let (_, folders, nav) = make_navigator();
        let a = folders.create("A", None);
        let b = folders.create("B", Some(a.id));
        folders.create("C", Some(b.id));

        let view = nav.enter(Some(b.id));
        assert_eq!(nav.cursor(), Some(b.id));
        assert_eq!(view.path_string(), "/A/B");
        assert_eq!(view.folders.len(), 1);
        assert_eq!(view.folders[0].name, "C");
    }

    #[test]
    fn test_views_are_not_cached() {
        let (files, folders, nav) = make_navigator();
        let a = folders.create("A", None);
        nav.enter(Some(a.id));
        assert!(nav.visible_files().is_empty());

        let created = files.upload(vec![UploadBlob::new("x", "", Vec::new())]);
        files.move_to(created[0].id, Some(a.id));
        assert_eq!(nav.visible_files().len(), 1);

        folders.create("Sub", Some(a.id));
        assert_eq!(nav.visible_folders().len(), 1);
    }

    #[test]
    fn test_enter_missing_folder_is_empty_not_error() {
        let (_, folders, nav) = make_navigator();
        let a = folders.create("A", None);
        folders.create("B", Some(a.id));
        folders.delete(a.id);

        let view = nav.enter(Some(a.id));
        assert!(!view.exists);
        assert!(view.is_empty());
        assert!(view.breadcrumb.is_empty());
        assert!(nav.breadcrumb().is_empty());
    }

    #[test]
    fn test_up() {
        let (_, folders, nav) = make_navigator();
        let a = folders.create("A", None);
        let b = folders.create("B", Some(a.id));

        nav.enter(Some(b.id));
        assert_eq!(nav.up().cursor, Some(a.id));
        assert_eq!(nav.up().cursor, None);
        assert_eq!(nav.up().cursor, None);

        nav.enter(Some(b.id));
        folders.delete(a.id);
        assert_eq!(nav.up().cursor, None);
    }
}
