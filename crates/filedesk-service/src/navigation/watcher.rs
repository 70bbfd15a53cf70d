//! Async stream of recomputed views.

use std::sync::Arc;

use tokio::sync::watch;

use filedesk_core::types::FolderId;
use filedesk_entity::file::FileRecord;
use filedesk_entity::folder::Folder;
use filedesk_store::{FileStore, FolderStore, Snapshot};

use super::view::FolderView;

/// Yields a fresh [`FolderView`] each time either store publishes or the
/// cursor moves.
///
/// Changes that land together (a folder delete publishes both stores) are
/// coalesced into a single view.
#[derive(Debug)]
pub struct ViewWatcher {
    files: Arc<FileStore>,
    folders: Arc<FolderStore>,
    file_rx: watch::Receiver<Snapshot<FileRecord>>,
    folder_rx: watch::Receiver<Snapshot<Folder>>,
    cursor_rx: watch::Receiver<Option<FolderId>>,
}

impl ViewWatcher {
    pub(crate) fn new(
        files: Arc<FileStore>,
        folders: Arc<FolderStore>,
        cursor_rx: watch::Receiver<Option<FolderId>>,
    ) -> Self {
        let file_rx = files.subscribe();
        let folder_rx = folders.subscribe();
        Self {
            files,
            folders,
            file_rx,
            folder_rx,
            cursor_rx,
        }
    }

    /// Wait for the next change and return the recomputed view.
    ///
    /// Returns `None` once the navigator has been dropped.
    pub async fn next(&mut self) -> Option<FolderView> {
        tokio::select! {
            changed = self.file_rx.changed() => changed.ok()?,
            changed = self.folder_rx.changed() => changed.ok()?,
            changed = self.cursor_rx.changed() => changed.ok()?,
        }

        let _ = self.file_rx.borrow_and_update();
        let _ = self.folder_rx.borrow_and_update();
        let cursor = *self.cursor_rx.borrow_and_update();

        Some(FolderView::compose(&self.files, &self.folders, cursor))
    }
}
