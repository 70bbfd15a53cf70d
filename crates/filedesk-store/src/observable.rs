//! Snapshot publisher shared by both stores.

use std::sync::Arc;

use tokio::sync::watch;

/// An immutable, shareable view of a whole collection.
pub type Snapshot<T> = Arc<Vec<Arc<T>>>;

/// Holds the latest snapshot of a collection and notifies subscribers
/// whenever a new one is published.
///
/// Updates run inside the channel's write lock, so two concurrent
/// mutations serialize and no reader observes a half-applied change.
#[derive(Debug)]
pub struct Observable<T> {
    tx: watch::Sender<Snapshot<T>>,
}

impl<T> Observable<T> {
    /// Create an observable holding an empty collection.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Arc::new(Vec::new()));
        Self { tx }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Snapshot<T> {
        self.tx.borrow().clone()
    }

    /// Subscribe to future snapshots. The receiver starts out seeing the
    /// current one as already observed.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot<T>> {
        self.tx.subscribe()
    }

    /// Derive and publish a new collection from the current one.
    ///
    /// The closure sees the current records and returns the replacement
    /// plus a result for the caller. The replacement is always published.
    pub fn publish_with<R>(&self, derive: impl FnOnce(&[Arc<T>]) -> (Vec<Arc<T>>, R)) -> R {
        let mut out = None;
        self.tx.send_modify(|current| {
            let (next, result) = derive(current.as_slice());
            *current = Arc::new(next);
            out = Some(result);
        });
        // send_modify runs the closure exactly once
        out.unwrap_or_else(|| unreachable!("send_modify skipped its closure"))
    }

    /// Like [`Observable::publish_with`], but the closure may return `None`
    /// to leave the collection untouched and notify nobody.
    pub fn publish_if_changed(&self, derive: impl FnOnce(&[Arc<T>]) -> Option<Vec<Arc<T>>>) -> bool {
        self.tx.send_if_modified(|current| match derive(current.as_slice()) {
            Some(next) => {
                *current = Arc::new(next);
                true
            }
            None => false,
        })
    }
}

impl<T> Default for Observable<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_notifies_subscribers() {
        let obs: Observable<u32> = Observable::new();
        let mut rx = obs.subscribe();
        assert!(!rx.has_changed().unwrap());

        let len = obs.publish_with(|current| {
            let mut next = current.to_vec();
            next.push(Arc::new(7));
            let len = next.len();
            (next, len)
        });

        assert_eq!(len, 1);
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().len(), 1);
    }

    #[test]
    fn test_old_snapshot_is_isolated() {
        let obs: Observable<u32> = Observable::new();
        obs.publish_with(|_| (vec![Arc::new(1)], ()));
        let before = obs.snapshot();

        obs.publish_with(|current| {
            let mut next = current.to_vec();
            next.push(Arc::new(2));
            (next, ())
        });

        assert_eq!(before.len(), 1);
        assert_eq!(obs.snapshot().len(), 2);
        assert!(Arc::ptr_eq(&before[0], &obs.snapshot()[0]));
    }

    #[test]
    fn test_publish_if_changed_skips_noop() {
        let obs: Observable<u32> = Observable::new();
        let rx = obs.subscribe();
        assert!(!obs.publish_if_changed(|_| None));
        assert!(!rx.has_changed().unwrap());
        assert!(obs.publish_if_changed(|_| Some(vec![Arc::new(3)])));
        assert!(rx.has_changed().unwrap());
    }
}
