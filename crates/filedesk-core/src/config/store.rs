//! In-memory store configuration.

use serde::{Deserialize, Serialize};

/// Settings for the file and folder stores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// First id handed out to an uploaded file.
    #[serde(default = "default_id_start")]
    pub file_id_start: u64,
    /// First id handed out to a created folder.
    #[serde(default = "default_id_start")]
    pub folder_id_start: u64,
    /// How many files `recent` returns when the caller gives no count.
    #[serde(default = "default_recent")]
    pub recent_default: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            file_id_start: default_id_start(),
            folder_id_start: default_id_start(),
            recent_default: default_recent(),
        }
    }
}

fn default_id_start() -> u64 {
    1
}

fn default_recent() -> usize {
    6
}
