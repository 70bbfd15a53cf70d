//! Broadcast bus carrying [`DomainEvent`]s to any number of subscribers.

use tokio::sync::broadcast;
use tracing::trace;

use filedesk_core::events::{DomainEvent, EventPayload};

/// Publishes domain events after successful mutations.
///
/// Publishing never fails: with no subscribers the event is dropped, and a
/// subscriber that falls more than `capacity` events behind sees a lag error
/// on its next receive.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    /// Create a bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Wrap a payload in a [`DomainEvent`] and publish it.
    pub fn publish(&self, payload: impl Into<EventPayload>) -> DomainEvent {
        let event = DomainEvent::new(payload.into());
        let delivered = self.tx.send(event.clone()).unwrap_or(0);
        trace!(event_id = %event.id, delivered, "Published domain event");
        event
    }

    /// Subscribe to events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filedesk_core::events::FolderEvent;
    use filedesk_core::types::FolderId;

    #[tokio::test]
    async fn test_subscriber_receives_event() {
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe();

        let sent = bus.publish(FolderEvent::Created {
            folder_id: FolderId(1),
            parent_id: None,
            name: "A".to_string(),
        });

        let received = rx.recv().await.unwrap();
        assert_eq!(received.id, sent.id);
        assert_eq!(received.payload, sent.payload);
    }

    #[test]
    fn test_publish_without_subscribers() {
        let bus = EventBus::new(8);
        bus.publish(FolderEvent::Deleted {
            folder_id: FolderId(1),
            reparented_files: 0,
            orphaned_children: 0,
        });
    }
}
