//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use filedesk_core::traits::NotificationLevel;
use filedesk_core::types::NotificationId;

/// A message shown to the user after an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: NotificationId,
    /// Severity.
    pub level: NotificationLevel,
    /// Notification body text.
    pub message: String,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
    /// Whether the user dismissed this notification.
    pub dismissed: bool,
}

impl Notification {
    /// Create a fresh, undismissed notification.
    pub fn new(id: NotificationId, level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            id,
            level,
            message: message.into(),
            created_at: Utc::now(),
            dismissed: false,
        }
    }

    /// Whether the notification reports a failure.
    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}
