//! Subscription management for view changes.
//!
//! Subscribers are notified in subscription order.

use crate::change::ViewChange;
use alloc::boxed::Box;
use alloc::vec::Vec;

/// Unique identifier for a subscription.
pub type SubscriptionId = u64;

/// Callback type for change notifications.
pub type ChangeCallback = Box<dyn Fn(&ViewChange)>;

/// A subscription to view changes.
pub struct Subscription {
    id: SubscriptionId,
    callback: ChangeCallback,
    /// Paused subscriptions stay registered but receive nothing.
    paused: bool,
}

impl Subscription {
    /// Creates a new subscription.
    pub fn new<F>(id: SubscriptionId, callback: F) -> Self
    where
        F: Fn(&ViewChange) + 'static,
    {
        Self {
            id,
            callback: Box::new(callback),
            paused: false,
        }
    }

    #[inline]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Delivers a change unless paused.
    pub fn notify(&self, change: &ViewChange) {
        if !self.paused {
            (self.callback)(change);
        }
    }
}

/// Manages the subscriptions of a table view.
pub struct SubscriptionManager {
    /// Subscriptions in ascending id order.
    subscriptions: Vec<Subscription>,
    next_id: SubscriptionId,
}

impl Default for SubscriptionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SubscriptionManager {
    /// Creates a new subscription manager.
    pub fn new() -> Self {
        Self {
            subscriptions: Vec::new(),
            next_id: 1,
        }
    }

    /// Subscribes to changes with the given callback.
    ///
    /// Returns the subscription ID that can be used to unsubscribe.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&ViewChange) + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.subscriptions.push(Subscription::new(id, callback));
        id
    }

    /// Unsubscribes by ID.
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        match self.position(id) {
            Some(pos) => {
                self.subscriptions.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Pauses or resumes a subscription. Returns false for an unknown ID.
    pub fn set_paused(&mut self, id: SubscriptionId, paused: bool) -> bool {
        match self.position(id) {
            Some(pos) => {
                self.subscriptions[pos].set_paused(paused);
                true
            }
            None => false,
        }
    }

    /// Notifies every subscription in subscription order.
    pub fn notify_all(&self, change: &ViewChange) {
        for sub in &self.subscriptions {
            sub.notify(change);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Returns all subscription IDs in subscription order.
    pub fn subscription_ids(&self) -> Vec<SubscriptionId> {
        self.subscriptions.iter().map(Subscription::id).collect()
    }

    /// Clears all subscriptions.
    pub fn clear(&mut self) {
        self.subscriptions.clear();
    }

    fn position(&self, id: SubscriptionId) -> Option<usize> {
        // Ids are assigned in increasing order.
        self.subscriptions.binary_search_by_key(&id, Subscription::id).ok()
    }
}
