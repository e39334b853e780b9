//! Reload signalling between writers and cached readers.
//!
//! Components that change backend data fire the trigger; components that
//! cache reads subscribe and re-fetch when it fires. Neither side knows
//! about the other. Delivery is level-triggered: rapid fires coalesce, a
//! subscriber is guaranteed to observe "something changed" at least once,
//! not once per fire.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Broadcast trigger for "reload your data" signals.
///
/// Cloning is cheap; clones share the same counter and subscriber set, so a
/// trigger can be handed to every writer in the application.
#[derive(Clone)]
pub struct RefreshTrigger {
    counter: Arc<watch::Sender<u64>>,
}

impl RefreshTrigger {
    /// Create a trigger with the counter at zero and no subscribers.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self {
            counter: Arc::new(tx),
        }
    }

    /// Signal that backend data changed.
    ///
    /// Increments the counter and wakes every listener. Firing with no
    /// subscribers is valid and does nothing beyond the increment.
    pub fn fire(&self) {
        self.counter.send_modify(|n| *n += 1);
        tracing::trace!(counter = *self.counter.borrow(), "refresh trigger fired");
    }

    /// Current value of the fire counter.
    ///
    /// Only changes are meaningful; the magnitude exists for tests and
    /// diagnostics.
    pub fn counter(&self) -> u64 {
        *self.counter.borrow()
    }

    /// Register a listener that can await future fires.
    ///
    /// The listener sees only fires that happen after subscription; earlier
    /// fires are not replayed.
    pub fn subscribe(&self) -> RefreshListener {
        RefreshListener {
            rx: self.counter.subscribe(),
        }
    }

    /// Spawn a task that invokes `handler` after every future fire.
    ///
    /// Fires that land while the handler is running coalesce into a single
    /// follow-up invocation. Dropping the returned [`Subscription`] (or
    /// calling [`Subscription::unsubscribe`]) stops delivery; other
    /// subscribers are unaffected.
    pub fn watch_with<F>(&self, mut handler: F) -> Subscription
    where
        F: FnMut() + Send + 'static,
    {
        let mut listener = self.subscribe();
        let handle = tokio::spawn(async move {
            while listener.changed().await {
                handler();
            }
        });
        Subscription { handle }
    }
}

impl Default for RefreshTrigger {
    fn default() -> Self {
        Self::new()
    }
}

/// Awaitable subscription to a [`RefreshTrigger`].
pub struct RefreshListener {
    rx: watch::Receiver<u64>,
}

impl RefreshListener {
    /// Wait until the trigger fires.
    ///
    /// Returns `true` when at least one fire happened since the last call
    /// (multiple fires coalesce), `false` once every trigger handle has been
    /// dropped and no further fire can come.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    /// Counter value as last published by the trigger.
    pub fn counter(&self) -> u64 {
        *self.rx.borrow()
    }
}

/// Handle to a handler task spawned by [`RefreshTrigger::watch_with`].
///
/// The handler stops when this is dropped, so callers must hold onto it for
/// as long as they want deliveries.
pub struct Subscription {
    handle: JoinHandle<()>,
}

impl Subscription {
    /// Stop the handler task immediately.
    pub fn unsubscribe(self) {
        self.handle.abort();
    }

    /// Whether the handler task is still running.
    pub fn is_active(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[test]
    fn test_counter_starts_at_zero() {
        let trigger = RefreshTrigger::new();
        assert_eq!(trigger.counter(), 0);
    }

    #[test]
    fn test_fire_increments_counter() {
        let trigger = RefreshTrigger::new();
        trigger.fire();
        trigger.fire();
        trigger.fire();
        assert_eq!(trigger.counter(), 3);
    }

    #[test]
    fn test_fire_without_subscribers_is_harmless() {
        let trigger = RefreshTrigger::new();
        trigger.fire();
        assert_eq!(trigger.counter(), 1);
    }

    #[test]
    fn test_clones_share_counter() {
        let trigger = RefreshTrigger::new();
        let clone = trigger.clone();
        trigger.fire();
        clone.fire();
        assert_eq!(trigger.counter(), 2);
        assert_eq!(clone.counter(), 2);
    }

    #[tokio::test]
    async fn test_listener_sees_fire() {
        let trigger = RefreshTrigger::new();
        let mut listener = trigger.subscribe();
        trigger.fire();
        assert!(listener.changed().await);
        assert_eq!(listener.counter(), 1);
    }

    #[tokio::test]
    async fn test_rapid_fires_coalesce_for_listener() {
        let trigger = RefreshTrigger::new();
        let mut listener = trigger.subscribe();
        for _ in 0..5 {
            trigger.fire();
        }
        // One wakeup covers all five fires; the counter carries the total.
        assert!(listener.changed().await);
        assert_eq!(listener.counter(), 5);
    }

    #[tokio::test]
    async fn test_listener_does_not_replay_old_fires() {
        let trigger = RefreshTrigger::new();
        trigger.fire();
        trigger.fire();
        let mut listener = trigger.subscribe();

        let pending =
            tokio::time::timeout(Duration::from_millis(20), listener.changed()).await;
        assert!(pending.is_err(), "listener should not wake for pre-subscription fires");

        trigger.fire();
        assert!(listener.changed().await);
        assert_eq!(listener.counter(), 3);
    }

    #[tokio::test]
    async fn test_changed_returns_false_after_trigger_dropped() {
        let trigger = RefreshTrigger::new();
        let mut listener = trigger.subscribe();
        drop(trigger);
        assert!(!listener.changed().await);
    }

    #[tokio::test]
    async fn test_watch_with_invokes_handler() {
        let trigger = RefreshTrigger::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = Arc::clone(&hits);
        let _sub = trigger.watch_with(move || {
            hits_clone.fetch_add(1, Ordering::SeqCst);
        });

        // Give the handler task a chance to park on the channel first.
        tokio::time::sleep(Duration::from_millis(10)).await;
        trigger.fire();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_watch_with_multiple_subscribers_all_notified() {
        let trigger = RefreshTrigger::new();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let first_clone = Arc::clone(&first);
        let second_clone = Arc::clone(&second);
        let _sub_a = trigger.watch_with(move || {
            first_clone.fetch_add(1, Ordering::SeqCst);
        });
        let _sub_b = trigger.watch_with(move || {
            second_clone.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(10)).await;
        trigger.fire();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unsubscribe_stops_delivery() {
        let trigger = RefreshTrigger::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = Arc::clone(&hits);
        let sub = trigger.watch_with(move || {
            hits_clone.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(10)).await;
        sub.unsubscribe();
        tokio::time::sleep(Duration::from_millis(10)).await;
        trigger.fire();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_dropping_subscription_stops_delivery() {
        let trigger = RefreshTrigger::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = Arc::clone(&hits);
        let sub = trigger.watch_with(move || {
            hits_clone.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(10)).await;
        drop(sub);
        tokio::time::sleep(Duration::from_millis(10)).await;
        trigger.fire();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_subscription_is_active_lifecycle() {
        let trigger = RefreshTrigger::new();
        let sub = trigger.watch_with(|| {});
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(sub.is_active());

        // The handler loop exits once no trigger handle remains.
        drop(trigger);
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!sub.is_active());
    }
}
