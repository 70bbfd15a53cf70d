//! Notification sink configuration.

use serde::{Deserialize, Serialize};

/// Settings for the in-process notification center.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Number of notifications kept in history. Oldest are dropped first.
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    /// Broadcast channel capacity for live subscribers.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            history_capacity: default_history_capacity(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

fn default_history_capacity() -> usize {
    50
}

fn default_channel_capacity() -> usize {
    64
}
