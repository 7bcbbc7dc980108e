//! Single-open popover coordination.
//!
//! Pickers on one page form a mutually exclusive group: opening one closes
//! every other. [`PopoverCoordinator`] is the broadcast channel that makes this
//! happen. It is an explicit object shared through an `Arc`, not ambient
//! global state.
//!
//! The protocol is fire-and-forget:
//! - [`PopoverCoordinator::announce_open`] delivers a [`CLOSE_OTHERS`] signal
//!   naming the instance that just opened to every subscriber.
//! - Each picker closes itself when the named instance is not its own.
//! - There is no acknowledgement and no queue. The last announcement wins.
//!
//! Anything can subscribe, not only pickers:
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use edgy_color_picker::coordinator::PopoverCoordinator;
//!
//! let coordinator = Arc::new(PopoverCoordinator::new());
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let sink = Arc::clone(&seen);
//! let subscription = coordinator.subscribe(move |opened| sink.lock().unwrap().push(opened));
//!
//! let id = coordinator.register();
//! coordinator.announce_open(id);
//! assert_eq!(*seen.lock().unwrap(), vec![id]);
//!
//! drop(subscription);
//! coordinator.announce_open(id);
//! assert_eq!(seen.lock().unwrap().len(), 1);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use crate::sync::lock_recover;

/// Name of the exclusivity broadcast.
pub const CLOSE_OTHERS: &str = "close-others";

/// Identity of one picker instance within a coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u64);

impl InstanceId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "picker#{}", self.0)
    }
}

type Listener = Arc<dyn Fn(InstanceId) + Send + Sync>;

/// Broadcast channel for [`CLOSE_OTHERS`] signals.
pub struct PopoverCoordinator {
    next_id: AtomicU64,
    next_token: AtomicU64,
    listeners: Mutex<Vec<(u64, Listener)>>,
    open: Mutex<Option<InstanceId>>,
}

impl Default for PopoverCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PopoverCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PopoverCoordinator")
            .field("subscribers", &self.subscriber_count())
            .field("open", &self.open_instance())
            .finish()
    }
}

impl PopoverCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            next_token: AtomicU64::new(1),
            listeners: Mutex::new(Vec::new()),
            open: Mutex::new(None),
        }
    }

    /// Allocate a fresh instance id.
    pub fn register(&self) -> InstanceId {
        InstanceId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Receive every [`CLOSE_OTHERS`] broadcast until the returned
    /// [`Subscription`] is dropped.
    pub fn subscribe<F>(self: &Arc<Self>, listener: F) -> Subscription
    where
        F: Fn(InstanceId) + Send + Sync + 'static,
    {
        let token = self.next_token.fetch_add(1, Ordering::Relaxed);
        lock_recover(&self.listeners).push((token, Arc::new(listener)));
        Subscription {
            coordinator: Arc::downgrade(self),
            token,
        }
    }

    /// Broadcast that `id` has opened.
    ///
    /// Listeners run synchronously, in subscription order, after the
    /// subscriber lock is released, so a listener may subscribe or announce.
    pub fn announce_open(&self, id: InstanceId) {
        *lock_recover(&self.open) = Some(id);

        let listeners: Vec<Listener> = lock_recover(&self.listeners)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        log::debug!(
            "{CLOSE_OTHERS}: {id} opened, notifying {} subscribers",
            listeners.len()
        );
        for listener in listeners {
            listener(id);
        }
    }

    /// Record that `id` closed on its own. Other instances are not notified.
    pub fn release(&self, id: InstanceId) {
        let mut open = lock_recover(&self.open);
        if *open == Some(id) {
            *open = None;
        }
    }

    /// The instance most recently announced and not yet released.
    #[must_use]
    pub fn open_instance(&self) -> Option<InstanceId> {
        *lock_recover(&self.open)
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        lock_recover(&self.listeners).len()
    }

    fn unsubscribe(&self, token: u64) {
        lock_recover(&self.listeners).retain(|(t, _)| *t != token);
    }
}

/// Handle for a coordinator subscription. Unsubscribes on drop.
#[derive(Debug)]
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    coordinator: Weak<PopoverCoordinator>,
    token: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(coordinator) = self.coordinator.upgrade() {
            coordinator.unsubscribe(self.token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder(coordinator: &Arc<PopoverCoordinator>) -> (Arc<Mutex<Vec<InstanceId>>>, Subscription) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let subscription = coordinator.subscribe(move |id| sink.lock().unwrap().push(id));
        (seen, subscription)
    }

    #[test]
    fn test_register_allocates_distinct_ids() {
        let coordinator = PopoverCoordinator::new();
        let a = coordinator.register();
        let b = coordinator.register();
        assert_ne!(a, b);
        assert_eq!(a.to_string(), "picker#1");
    }

    #[test]
    fn test_announce_reaches_every_subscriber() {
        let coordinator = Arc::new(PopoverCoordinator::new());
        let (first, _s1) = recorder(&coordinator);
        let (second, _s2) = recorder(&coordinator);

        let id = coordinator.register();
        coordinator.announce_open(id);

        assert_eq!(*first.lock().unwrap(), vec![id]);
        assert_eq!(*second.lock().unwrap(), vec![id]);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let coordinator = Arc::new(PopoverCoordinator::new());
        let (seen, subscription) = recorder(&coordinator);
        assert_eq!(coordinator.subscriber_count(), 1);

        drop(subscription);
        assert_eq!(coordinator.subscriber_count(), 0);

        coordinator.announce_open(coordinator.register());
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_subscription_outliving_coordinator() {
        let coordinator = Arc::new(PopoverCoordinator::new());
        let (_seen, subscription) = recorder(&coordinator);
        drop(coordinator);
        drop(subscription);
    }

    #[test]
    fn test_last_announcement_wins() {
        let coordinator = PopoverCoordinator::new();
        let a = coordinator.register();
        let b = coordinator.register();
        coordinator.announce_open(a);
        coordinator.announce_open(b);
        assert_eq!(coordinator.open_instance(), Some(b));
    }

    #[test]
    fn test_release_only_clears_matching_instance() {
        let coordinator = PopoverCoordinator::new();
        let a = coordinator.register();
        let b = coordinator.register();
        coordinator.announce_open(b);

        coordinator.release(a);
        assert_eq!(coordinator.open_instance(), Some(b));

        coordinator.release(b);
        assert_eq!(coordinator.open_instance(), None);
    }

    #[test]
    fn test_listener_may_subscribe_during_broadcast() {
        let coordinator = Arc::new(PopoverCoordinator::new());
        let late = Arc::new(Mutex::new(Vec::new()));

        let inner = Arc::clone(&coordinator);
        let keep = Arc::clone(&late);
        let _outer = coordinator.subscribe(move |_| {
            let subscription = inner.subscribe(|_| {});
            keep.lock().unwrap().push(subscription);
        });

        coordinator.announce_open(coordinator.register());
        assert_eq!(coordinator.subscriber_count(), 2);
        late.lock().unwrap().clear();
        assert_eq!(coordinator.subscriber_count(), 1);
    }
}
