//! Observable collection cell shared by both repositories.
//!
//! # Responsibility
//! - Hold the latest published snapshot of one collection.
//! - Fan every subsequent snapshot out to subscribers in publish order.
//!
//! # Invariants
//! - Readers always see a fully materialized snapshot, never a partial one.
//! - Only the latest value is retained; intermediate snapshots missed by a
//!   slow subscriber are conflated away.
//! - Publishing succeeds with zero subscribers; the cell itself is the
//!   source of truth for `snapshot()`.

use tokio::sync::watch;

/// Subscription handle delivering each published snapshot.
///
/// `borrow_and_update()` yields the current value synchronously;
/// `changed().await` waits for the next publish when a runtime is present.
pub type Subscription<T> = watch::Receiver<Vec<T>>;

/// Current-value container broadcasting full-collection snapshots.
///
/// One repository owns the writing side; any number of readers may hold a
/// [`Subscription`] or query [`SnapshotCell::snapshot`] directly.
#[derive(Debug)]
pub struct SnapshotCell<T> {
    tx: watch::Sender<Vec<T>>,
}

impl<T: Clone> SnapshotCell<T> {
    /// Creates a cell holding an empty collection.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Vec::new());
        Self { tx }
    }

    /// Returns a copy of the latest published snapshot.
    pub fn snapshot(&self) -> Vec<T> {
        self.tx.borrow().clone()
    }

    /// Registers a new subscriber starting at the current snapshot.
    pub fn subscribe(&self) -> Subscription<T> {
        self.tx.subscribe()
    }

    /// Replaces the published snapshot and notifies subscribers.
    pub fn publish(&self, items: Vec<T>) {
        // send_replace updates the held value even when no subscriber is
        // attached; plain send would drop the snapshot in that case.
        self.tx.send_replace(items);
    }
}

impl<T: Clone> Default for SnapshotCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::SnapshotCell;

    #[test]
    fn starts_empty_and_holds_latest_publish() {
        let cell: SnapshotCell<i64> = SnapshotCell::new();
        assert!(cell.snapshot().is_empty());

        cell.publish(vec![1, 2]);
        cell.publish(vec![1, 2, 3]);
        assert_eq!(cell.snapshot(), vec![1, 2, 3]);
    }

    #[test]
    fn publish_lands_without_subscribers() {
        let cell: SnapshotCell<&str> = SnapshotCell::new();
        cell.publish(vec!["only"]);

        let mut sub = cell.subscribe();
        assert_eq!(*sub.borrow_and_update(), vec!["only"]);
    }

    #[test]
    fn subscriber_sees_current_then_conflated_latest() {
        let cell: SnapshotCell<i64> = SnapshotCell::new();
        cell.publish(vec![1]);

        let mut sub = cell.subscribe();
        assert_eq!(*sub.borrow_and_update(), vec![1]);
        assert!(!sub.has_changed().unwrap());

        cell.publish(vec![1, 2]);
        cell.publish(vec![2]);
        assert!(sub.has_changed().unwrap());
        // Intermediate [1, 2] was conflated away.
        assert_eq!(*sub.borrow_and_update(), vec![2]);
        assert!(!sub.has_changed().unwrap());
    }
}
