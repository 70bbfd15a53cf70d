//! Folder CRUD with name validation.

use std::sync::Arc;

use tracing::info;

use filedesk_core::error::AppError;
use filedesk_core::events::FolderEvent;
use filedesk_core::traits::NotificationSink;
use filedesk_core::types::FolderId;
use filedesk_entity::folder::{Folder, FolderTree};
use filedesk_store::{FolderDeletion, FolderStore};

use crate::events::EventBus;

/// Manages folder creation and deletion.
#[derive(Clone)]
pub struct FolderService {
    /// Folder store.
    folders: Arc<FolderStore>,
    /// Domain event bus.
    events: EventBus,
    /// Where success and failure messages go.
    notifier: Arc<dyn NotificationSink>,
}

impl std::fmt::Debug for FolderService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FolderService")
            .field("folders", &self.folders.len())
            .finish_non_exhaustive()
    }
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        folders: Arc<FolderStore>,
        events: EventBus,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            folders,
            events,
            notifier,
        }
    }

    /// Creates a new folder under `parent_id` (`None` = root level).
    ///
    /// Blank names are rejected before the store is touched. The parent id is
    /// not checked for existence.
    pub async fn create(
        &self,
        name: &str,
        parent_id: Option<FolderId>,
    ) -> Result<Folder, AppError> {
        if name.trim().is_empty() {
            let err = AppError::validation("Folder name cannot be empty");
            self.notifier
                .error(format!("Could not create folder: {}", err.message))
                .await;
            return Err(err);
        }

        let folder = self.folders.create(name, parent_id);

        self.events.publish(FolderEvent::Created {
            folder_id: folder.id,
            parent_id,
            name: folder.name.clone(),
        });

        info!(folder_id = %folder.id, parent_id = ?parent_id, name = %folder.name, "Folder created");
        self.notifier
            .success(format!("Folder '{}' created", folder.name))
            .await;

        Ok(folder)
    }

    /// Deletes a folder, moving its files to root.
    ///
    /// Child folders are not deleted and keep their now-dangling parent id.
    /// Deleting an unknown id is a no-op that still reports success.
    pub async fn delete(&self, id: FolderId) -> Result<FolderDeletion, AppError> {
        let outcome = self.folders.delete(id);

        self.events.publish(FolderEvent::Deleted {
            folder_id: id,
            reparented_files: outcome.reparented_files,
            orphaned_children: outcome.orphaned_children,
        });

        info!(
            folder_id = %id,
            existed = outcome.removed.is_some(),
            reparented_files = outcome.reparented_files,
            orphaned_children = outcome.orphaned_children,
            "Folder deleted"
        );

        let label = outcome
            .removed
            .as_ref()
            .map(|f| format!("'{}'", f.name))
            .unwrap_or_else(|| format!("{id}"));
        self.notifier
            .success(format!("Folder {label} deleted"))
            .await;

        Ok(outcome)
    }

    /// Looks up one folder.
    pub fn get(&self, id: FolderId) -> Result<Arc<Folder>, AppError> {
        self.folders
            .get(id)
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))
    }

    /// Breadcrumb to a folder, root first.
    pub fn path_to(&self, id: Option<FolderId>) -> Vec<Arc<Folder>> {
        self.folders.path_to(id)
    }

    /// Direct children of a folder (`None` = root level).
    pub fn children_of(&self, parent_id: Option<FolderId>) -> Vec<Arc<Folder>> {
        self.folders.children_of(parent_id)
    }

    /// Nested view of the whole hierarchy.
    pub fn tree(&self) -> FolderTree {
        self.folders.tree()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filedesk_core::config::notification::NotificationConfig;
    use filedesk_store::{FileStore, MemoryBlobStorage};

    use crate::notification::NotificationCenter;

    fn make_service() -> (FolderService, Arc<NotificationCenter>) {
        let files = Arc::new(FileStore::new(Arc::new(MemoryBlobStorage::new()), 1));
        let folders = Arc::new(FolderStore::new(files, 100));
        let center = Arc::new(NotificationCenter::new(&NotificationConfig::default()));
        (
            FolderService::new(folders, EventBus::new(16), center.clone()),
            center,
        )
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let (service, center) = make_service();

        for name in ["", "   ", "\t\n"] {
            let err = service.create(name, None).await.unwrap_err();
            assert!(err.is_validation());
        }

        assert!(service.children_of(None).is_empty());
        assert_eq!(center.history().await.len(), 3);
        assert!(center.history().await.iter().all(|n| n.is_error()));
    }

    #[tokio::test]
    async fn test_create_keeps_name_verbatim() {
        let (service, _) = make_service();
        let folder = service.create(" Reports ", None).await.unwrap();
        assert_eq!(folder.name, " Reports ");
        assert_eq!(folder.id, FolderId(100));
    }

    #[tokio::test]
    async fn test_delete_reports_outcome() {
        let (service, center) = make_service();
        let a = service.create("A", None).await.unwrap();
        service.create("B", Some(a.id)).await.unwrap();

        let outcome = service.delete(a.id).await.unwrap();
        assert_eq!(outcome.orphaned_children, 1);
        assert!(service.get(a.id).is_err());

        let last = center.history().await.pop().unwrap();
        assert_eq!(last.message, "Folder 'A' deleted");
    }
}
