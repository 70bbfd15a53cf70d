//! Byte storage behind opaque content handles.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Holds the bytes of uploaded blobs, addressed by opaque handle strings.
///
/// The file store never looks inside the bytes. It asks the storage for a
/// handle on upload and releases the handle when the file is deleted.
#[async_trait]
pub trait BlobStorage: Send + Sync + std::fmt::Debug + 'static {
    /// Store `data` and return a fresh handle for it.
    fn put(&self, data: Bytes) -> String;

    /// Read the bytes behind a handle.
    async fn read(&self, handle: &str) -> AppResult<Bytes>;

    /// Drop the bytes behind a handle. Unknown handles are ignored.
    fn release(&self, handle: &str);

    /// Total bytes currently held.
    fn bytes_held(&self) -> u64;
}
