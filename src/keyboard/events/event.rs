//! # Event
//!
//! Minimal publish/subscribe primitive used for decoupled state propagation
//! between keyboard components.
//!
//! Subscribers identify themselves with an [`Owner`] token. The event only
//! keeps a weak reference to that token, so a subscriber that goes away is
//! pruned on the next publish without any bookkeeping on its side. A
//! [`Subscription`] handle allows explicit early removal.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

/// Type alias for event handlers to reduce complexity
pub type EventHandler<T> = Rc<dyn Fn(&T)>;

static NEXT_OWNER_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug)]
struct OwnerIdentity {
    id: u64,
}

/// Identity of a subscriber
///
/// Clones share the same identity. The identity is released once the last
/// clone is dropped, after which every handler registered under it stops
/// being invoked.
#[derive(Clone)]
pub struct Owner {
    identity: Rc<OwnerIdentity>,
}

impl Owner {
    pub fn new() -> Self {
        Self {
            identity: Rc::new(OwnerIdentity {
                id: NEXT_OWNER_ID.fetch_add(1, Ordering::Relaxed),
            }),
        }
    }

    /// Numeric id, only meaningful for logging
    pub fn id(&self) -> u64 {
        self.identity.id
    }

    fn downgrade(&self) -> Weak<OwnerIdentity> {
        Rc::downgrade(&self.identity)
    }
}

impl Default for Owner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Owner").field(&self.identity.id).finish()
    }
}

struct SubscriberEntry<T> {
    subscription_id: u64,
    owner: Weak<OwnerIdentity>,
    handler: EventHandler<T>,
}

/// Type-erased access to a subscriber list so that handles do not carry
/// the event's value type
trait SubscriptionRegistry {
    fn remove(&self, subscription_id: u64) -> bool;
}

impl<T> SubscriptionRegistry for RefCell<Vec<SubscriberEntry<T>>> {
    fn remove(&self, subscription_id: u64) -> bool {
        let mut entries = self.borrow_mut();
        let before = entries.len();
        entries.retain(|entry| entry.subscription_id != subscription_id);
        entries.len() != before
    }
}

/// Handle for a registered handler
///
/// Dropping the handle does not unsubscribe; releasing the [`Owner`] or
/// calling [`Subscription::dispose`] does.
pub struct Subscription {
    id: u64,
    registry: Weak<dyn SubscriptionRegistry>,
}

impl Subscription {
    /// Remove the handler now. Returns false if it was already gone
    /// (replaced, pruned, or the event itself was dropped).
    pub fn dispose(self) -> bool {
        match self.registry.upgrade() {
            Some(registry) => registry.remove(self.id),
            None => false,
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

/// Typed publish point with at most one handler per owner
pub struct Event<T> {
    subscribers: Rc<RefCell<Vec<SubscriberEntry<T>>>>,
    next_subscription_id: Cell<u64>,
}

impl<T: 'static> Event<T> {
    pub fn new() -> Self {
        Self {
            subscribers: Rc::new(RefCell::new(Vec::new())),
            next_subscription_id: Cell::new(1),
        }
    }

    /// Register `handler` for `owner`, replacing any handler that owner
    /// registered before. A replaced handler keeps its position in the
    /// invocation order.
    pub fn subscribe<F>(&self, owner: &Owner, handler: F) -> Subscription
    where
        F: Fn(&T) + 'static,
    {
        self.subscribe_handler(owner, Rc::new(handler))
    }

    pub(crate) fn subscribe_handler(
        &self,
        owner: &Owner,
        handler: EventHandler<T>,
    ) -> Subscription {
        let subscription_id = self.next_subscription_id.get();
        self.next_subscription_id.set(subscription_id + 1);

        let owner_ref = owner.downgrade();
        {
            let mut entries = self.subscribers.borrow_mut();
            match entries
                .iter_mut()
                .find(|entry| Weak::ptr_eq(&entry.owner, &owner_ref))
            {
                Some(entry) => {
                    entry.subscription_id = subscription_id;
                    entry.handler = handler;
                }
                None => entries.push(SubscriberEntry {
                    subscription_id,
                    owner: owner_ref,
                    handler,
                }),
            }
        }

        let registry: Rc<dyn SubscriptionRegistry> = self.subscribers.clone();
        Subscription {
            id: subscription_id,
            registry: Rc::downgrade(&registry),
        }
    }

    /// Invoke every live handler with `value`, in subscription order
    pub fn publish(&self, value: T) {
        self.notify(&value);
    }

    pub(crate) fn notify(&self, value: &T) {
        // Snapshot before invoking so handlers may subscribe, dispose or
        // publish again without tripping over the borrow.
        let snapshot: Vec<(u64, Weak<OwnerIdentity>, EventHandler<T>)> = {
            let mut entries = self.subscribers.borrow_mut();
            entries.retain(|entry| entry.owner.strong_count() > 0);
            entries
                .iter()
                .map(|entry| {
                    (
                        entry.subscription_id,
                        entry.owner.clone(),
                        Rc::clone(&entry.handler),
                    )
                })
                .collect()
        };

        for (subscription_id, owner, handler) in snapshot {
            // An earlier handler may have released the owner, or disposed
            // or replaced this subscription
            if owner.strong_count() > 0 && self.is_registered(subscription_id) {
                handler(value);
            }
        }
    }

    fn is_registered(&self, subscription_id: u64) -> bool {
        self.subscribers
            .borrow()
            .iter()
            .any(|entry| entry.subscription_id == subscription_id)
    }

    /// Explicit early removal, same as [`Subscription::dispose`]
    pub fn dispose(&self, subscription: Subscription) -> bool {
        subscription.dispose()
    }

    /// Number of stored entries, including released owners that have not
    /// been pruned by a publish yet
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

impl<T: 'static> Default for Event<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Event<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("subscribers", &self.subscribers.borrow().len())
            .finish()
    }
}
