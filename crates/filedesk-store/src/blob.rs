//! In-memory blob storage.

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use filedesk_core::error::AppError;
use filedesk_core::result::AppResult;
use filedesk_core::traits::BlobStorage;

/// Handle prefix for blobs held by [`MemoryBlobStorage`].
const HANDLE_PREFIX: &str = "blob:filedesk/";

/// Keeps blob bytes in process memory, keyed by `blob:filedesk/<uuid>`.
///
/// Contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryBlobStorage {
    blobs: DashMap<String, Bytes>,
}

impl MemoryBlobStorage {
    /// Create an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blobs currently held.
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    /// Whether no blobs are held.
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

#[async_trait]
impl BlobStorage for MemoryBlobStorage {
    fn put(&self, data: Bytes) -> String {
        let handle = format!("{HANDLE_PREFIX}{}", Uuid::new_v4());
        self.blobs.insert(handle.clone(), data);
        handle
    }

    async fn read(&self, handle: &str) -> AppResult<Bytes> {
        self.blobs
            .get(handle)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::not_found(format!("No content behind '{handle}'")))
    }

    fn release(&self, handle: &str) {
        if self.blobs.remove(handle).is_some() {
            debug!(handle, "Released blob");
        }
    }

    fn bytes_held(&self) -> u64 {
        self.blobs.iter().map(|entry| entry.value().len() as u64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_read_release() {
        let storage = MemoryBlobStorage::new();
        let handle = storage.put(Bytes::from_static(b"hello"));
        assert!(handle.starts_with(HANDLE_PREFIX));
        assert_eq!(storage.read(&handle).await.unwrap(), Bytes::from_static(b"hello"));
        assert_eq!(storage.bytes_held(), 5);

        storage.release(&handle);
        assert!(storage.is_empty());
        assert!(storage.read(&handle).await.is_err());
    }

    #[test]
    fn test_handles_are_unique() {
        let storage = MemoryBlobStorage::new();
        let a = storage.put(Bytes::new());
        let b = storage.put(Bytes::new());
        assert_ne!(a, b);
        assert_eq!(storage.len(), 2);
    }

    #[test]
    fn test_release_unknown_is_noop() {
        let storage = MemoryBlobStorage::new();
        storage.release("blob:filedesk/missing");
        assert!(storage.is_empty());
    }
}
