//! # Hot Event
//!
//! An [`Event`] that remembers the last published value and replays it to
//! every new subscriber synchronously, before any later publish.
//!
//! A publish made from inside a handler is stored immediately but delivered
//! only after the running delivery finishes, so every subscriber's last
//! observed value is the current one.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use super::event::{Event, EventHandler, Owner, Subscription};

pub struct HotEvent<T> {
    event: Event<T>,
    current: RefCell<T>,
    delivering: Cell<bool>,
    pending: Cell<bool>,
}

impl<T: Clone + 'static> HotEvent<T> {
    pub fn new(initial: T) -> Self {
        Self {
            event: Event::new(),
            current: RefCell::new(initial),
            delivering: Cell::new(false),
            pending: Cell::new(false),
        }
    }

    /// Current value
    pub fn value(&self) -> T {
        self.current.borrow().clone()
    }

    /// Register `handler` for `owner` and invoke it right away with the
    /// current value
    pub fn subscribe<F>(&self, owner: &Owner, handler: F) -> Subscription
    where
        F: Fn(&T) + 'static,
    {
        let handler: EventHandler<T> = Rc::new(handler);
        let subscription = self.event.subscribe_handler(owner, Rc::clone(&handler));
        let current = self.value();
        handler(&current);
        subscription
    }

    /// Store `value` and deliver it to every live subscriber
    pub fn publish(&self, value: T) {
        *self.current.borrow_mut() = value;
        if self.delivering.replace(true) {
            self.pending.set(true);
            return;
        }

        loop {
            self.pending.set(false);
            let current = self.value();
            self.event.notify(&current);
            if !self.pending.get() {
                break;
            }
        }
        self.delivering.set(false);
    }

    pub fn dispose(&self, subscription: Subscription) -> bool {
        self.event.dispose(subscription)
    }

    pub fn subscriber_count(&self) -> usize {
        self.event.subscriber_count()
    }
}

impl<T: fmt::Debug> fmt::Debug for HotEvent<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HotEvent")
            .field("current", &*self.current.borrow())
            .field("event", &self.event)
            .finish()
    }
}
