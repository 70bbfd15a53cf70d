//! Notification sink trait.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    /// Neutral information.
    Info,
    /// An operation completed.
    Success,
    /// Something the user should look at.
    Warning,
    /// An operation failed.
    Error,
}

impl NotificationLevel {
    /// Return the level as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Receives one human-readable message per mutating service call.
///
/// Delivery is fire-and-forget: a sink that cannot deliver drops the
/// message rather than failing the operation that produced it.
#[async_trait]
pub trait NotificationSink: Send + Sync + 'static {
    /// Deliver a message at the given level.
    async fn notify(&self, level: NotificationLevel, message: String);

    /// Deliver a success message.
    async fn success(&self, message: String) {
        self.notify(NotificationLevel::Success, message).await;
    }

    /// Deliver an error message.
    async fn error(&self, message: String) {
        self.notify(NotificationLevel::Error, message).await;
    }
}
