//! In-process notification center.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::{RwLock, broadcast};
use tracing::debug;

use filedesk_core::config::notification::NotificationConfig;
use filedesk_core::traits::{NotificationLevel, NotificationSink};
use filedesk_core::types::{IdSequence, NotificationId};
use filedesk_entity::notification::Notification;

/// Keeps a bounded history of notifications and fans each one out to live
/// subscribers.
///
/// There are no timers here: hiding a notification after a delay is the
/// presentation layer's business, done through [`NotificationCenter::dismiss`].
#[derive(Debug)]
pub struct NotificationCenter {
    history: RwLock<VecDeque<Notification>>,
    capacity: usize,
    ids: IdSequence<NotificationId>,
    tx: broadcast::Sender<Notification>,
}

impl NotificationCenter {
    /// Create a center from configuration.
    pub fn new(config: &NotificationConfig) -> Self {
        let (tx, _rx) = broadcast::channel(config.channel_capacity.max(1));
        Self {
            history: RwLock::new(VecDeque::with_capacity(config.history_capacity)),
            capacity: config.history_capacity,
            ids: IdSequence::default(),
            tx,
        }
    }

    /// Record a notification and broadcast it.
    pub async fn push(&self, level: NotificationLevel, message: impl Into<String>) -> Notification {
        let notification = Notification::new(self.ids.next(), level, message);

        {
            let mut history = self.history.write().await;
            if self.capacity > 0 {
                while history.len() >= self.capacity {
                    history.pop_front();
                }
                history.push_back(notification.clone());
            }
        }

        let _ = self.tx.send(notification.clone());
        debug!(
            notification_id = %notification.id,
            level = %level,
            message = %notification.message,
            "Notification pushed"
        );
        notification
    }

    /// Every notification still in history, oldest first.
    pub async fn history(&self) -> Vec<Notification> {
        self.history.read().await.iter().cloned().collect()
    }

    /// Notifications not yet dismissed, oldest first.
    pub async fn active(&self) -> Vec<Notification> {
        self.history
            .read()
            .await
            .iter()
            .filter(|n| !n.dismissed)
            .cloned()
            .collect()
    }

    /// Mark one notification dismissed. Returns whether it was found.
    pub async fn dismiss(&self, id: NotificationId) -> bool {
        let mut history = self.history.write().await;
        match history.iter_mut().find(|n| n.id == id) {
            Some(n) => {
                n.dismissed = true;
                true
            }
            None => false,
        }
    }

    /// Subscribe to notifications pushed from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }
}

#[async_trait]
impl NotificationSink for NotificationCenter {
    async fn notify(&self, level: NotificationLevel, message: String) {
        self.push(level, message).await;
    }
}
