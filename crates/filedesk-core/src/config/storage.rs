//! Storage quota configuration.

use serde::{Deserialize, Serialize};

/// Limits applied by the service layer before blobs reach the file store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Total bytes the workspace is allowed to hold (default 10 GB).
    #[serde(default = "default_quota")]
    pub quota_bytes: u64,
    /// Maximum size of a single uploaded blob in bytes (default 5 GB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            quota_bytes: default_quota(),
            max_upload_size_bytes: default_max_upload(),
        }
    }
}

fn default_quota() -> u64 {
    10 * 1024 * 1024 * 1024
}

fn default_max_upload() -> u64 {
    5 * 1024 * 1024 * 1024
}
