//! The wired-up set of stores and services shared by every front end.

use std::sync::Arc;

use tracing::info;

use filedesk_core::config::AppConfig;
use filedesk_core::traits::BlobStorage;
use filedesk_store::{FileStore, FolderStore, MemoryBlobStorage};

use crate::events::EventBus;
use crate::file::FileService;
use crate::folder::FolderService;
use crate::navigation::Navigator;
use crate::notification::NotificationCenter;

/// Every shared dependency, constructed once from configuration.
///
/// All fields are `Arc`-wrapped (or cheap to clone) so a front end can hand
/// them to as many tasks as it likes.
#[derive(Debug, Clone)]
pub struct Workspace {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Stores ───────────────────────────────────────────────
    /// Byte storage behind every file record
    pub blobs: Arc<dyn BlobStorage>,
    /// File records
    pub file_store: Arc<FileStore>,
    /// Folder records
    pub folder_store: Arc<FolderStore>,

    // ── Fan-out ──────────────────────────────────────────────
    /// Domain event bus
    pub events: EventBus,
    /// User-facing notification center
    pub notifications: Arc<NotificationCenter>,

    // ── Services ─────────────────────────────────────────────
    /// File operations
    pub files: Arc<FileService>,
    /// Folder operations
    pub folders: Arc<FolderService>,
    /// Current-folder cursor
    pub navigator: Arc<Navigator>,
}

impl Workspace {
    /// Build an empty workspace from configuration.
    pub fn new(config: &AppConfig) -> Self {
        let blobs: Arc<dyn BlobStorage> = Arc::new(MemoryBlobStorage::new());
        let file_store = Arc::new(FileStore::new(blobs.clone(), config.store.file_id_start));
        let folder_store = Arc::new(FolderStore::new(
            file_store.clone(),
            config.store.folder_id_start,
        ));

        let events = EventBus::new(config.events.channel_capacity);
        let notifications = Arc::new(NotificationCenter::new(&config.notifications));

        let files = Arc::new(FileService::new(
            file_store.clone(),
            folder_store.clone(),
            events.clone(),
            notifications.clone(),
            config.storage.clone(),
            config.store.recent_default,
        ));
        let folders = Arc::new(FolderService::new(
            folder_store.clone(),
            events.clone(),
            notifications.clone(),
        ));
        let navigator = Arc::new(Navigator::new(file_store.clone(), folder_store.clone()));

        info!(
            file_id_start = config.store.file_id_start,
            folder_id_start = config.store.folder_id_start,
            quota_bytes = config.storage.quota_bytes,
            "Workspace initialized"
        );

        Self {
            config: Arc::new(config.clone()),
            blobs,
            file_store,
            folder_store,
            events,
            notifications,
            files,
            folders,
            navigator,
        }
    }
}
