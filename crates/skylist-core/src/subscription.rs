//! Live Query Subscription
//!
//! A cancellable snapshot feed: the producer side publishes the full ordered
//! collection after every change, consumers always see complete lists, never
//! diffs. A failed read arrives as a terminal `Listen` error snapshot.

use tokio::sync::watch;

use crate::domain::{StoreResult, Todo};

/// One emission of the live query: the whole result set, or a terminal error
pub type Snapshot = StoreResult<Vec<Todo>>;

/// Producer side of the live feed
///
/// A watch channel keeps only the latest snapshot, which is exactly the live
/// query contract: a new subscriber immediately sees the current result set.
#[derive(Clone)]
pub struct TodoFeed {
    tx: watch::Sender<Snapshot>,
}

impl TodoFeed {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Ok(Vec::new()));
        Self { tx }
    }

    /// Replace the current snapshot and wake all subscribers
    pub fn publish(&self, snapshot: Snapshot) {
        // send_replace delivers even while no subscriber is attached yet
        self.tx.send_replace(snapshot);
    }

    /// Open a subscription starting at the current snapshot
    pub fn subscribe(&self) -> SnapshotStream {
        SnapshotStream {
            rx: Some(self.tx.subscribe()),
        }
    }
}

impl Default for TodoFeed {
    fn default() -> Self {
        Self::new()
    }
}

/// Consumer side of the live feed
///
/// Cancelled exactly once, either explicitly through [`cancel`](Self::cancel)
/// or implicitly on drop; after cancellation `next` yields `None`.
pub struct SnapshotStream {
    rx: Option<watch::Receiver<Snapshot>>,
}

impl SnapshotStream {
    /// The snapshot as of right now
    pub fn current(&self) -> Snapshot {
        match &self.rx {
            Some(rx) => rx.borrow().clone(),
            None => Ok(Vec::new()),
        }
    }

    /// Wait for the next snapshot; `None` once cancelled or the feed is gone
    pub async fn next(&mut self) -> Option<Snapshot> {
        let rx = self.rx.as_mut()?;
        match rx.changed().await {
            Ok(()) => Some(rx.borrow_and_update().clone()),
            Err(_) => None,
        }
    }

    /// Release the subscription; further calls are no-ops
    pub fn cancel(&mut self) {
        self.rx.take();
    }

    pub fn is_cancelled(&self) -> bool {
        self.rx.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscriber_sees_current_snapshot() {
        let feed = TodoFeed::new();
        feed.publish(Ok(vec![Todo::new("one".to_string())]));

        let stream = feed.subscribe();
        let current = stream.current().expect("snapshot should be ok");
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].text, "one");
    }

    #[tokio::test]
    async fn test_next_wakes_on_publish() {
        let feed = TodoFeed::new();
        let mut stream = feed.subscribe();

        feed.publish(Ok(vec![Todo::new("later".to_string())]));
        let snapshot = stream.next().await.expect("feed alive").expect("ok");
        assert_eq!(snapshot.len(), 1);
    }

    #[tokio::test]
    async fn test_cancel_is_idempotent() {
        let feed = TodoFeed::new();
        let mut stream = feed.subscribe();

        stream.cancel();
        stream.cancel();
        assert!(stream.is_cancelled());
        assert!(stream.next().await.is_none());
        assert!(stream.current().expect("empty after cancel").is_empty());
    }

    #[tokio::test]
    async fn test_error_snapshot_is_delivered() {
        use crate::domain::StoreError;

        let feed = TodoFeed::new();
        let mut stream = feed.subscribe();

        feed.publish(Err(StoreError::Listen("dropped".to_string())));
        let snapshot = stream.next().await.expect("feed alive");
        assert!(matches!(snapshot, Err(StoreError::Listen(_))));
    }
}
