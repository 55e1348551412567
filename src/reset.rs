//! Gesture-reset broadcast between carousel instances on one page.
//!
//! Any input landing outside a carousel's own track must cancel that
//! carousel's in-progress drag. Instances stay independent: each holds a
//! [`ResetSubscription`] and checks it at its next entry point, and anyone
//! holding the [`ResetBus`] can ask every other subscriber to reset.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Identifies a subscriber on a bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

#[derive(Debug, Default)]
struct BusInner {
    next_id: u64,
    subscribers: Vec<(SubscriberId, Rc<Cell<u64>>)>,
}

impl BusInner {
    fn broadcast(&self, origin: Option<SubscriberId>) -> usize {
        let mut reached = 0;
        for (id, signal) in &self.subscribers {
            if Some(*id) != origin {
                signal.set(signal.get().wrapping_add(1));
                reached += 1;
            }
        }
        reached
    }
}

/// Shared reset channel. Cloning yields another handle to the same bus.
#[derive(Clone, Debug, Default)]
pub struct ResetBus {
    inner: Rc<RefCell<BusInner>>,
}

impl ResetBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber.
    #[must_use]
    pub fn subscribe(&self) -> ResetSubscription {
        let mut inner = self.inner.borrow_mut();
        let id = SubscriberId(inner.next_id);
        inner.next_id += 1;
        let signal = Rc::new(Cell::new(0));
        inner.subscribers.push((id, Rc::clone(&signal)));
        ResetSubscription {
            id,
            bus: Rc::downgrade(&self.inner),
            signal,
            seen: 0,
        }
    }

    /// Ask every subscriber except `origin` to reset.
    ///
    /// Returns how many subscribers were signalled.
    pub fn broadcast(&self, origin: Option<SubscriberId>) -> usize {
        self.inner.borrow().broadcast(origin)
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

/// One instance's end of a [`ResetBus`]. Unsubscribes on drop.
#[derive(Debug)]
pub struct ResetSubscription {
    id: SubscriberId,
    bus: Weak<RefCell<BusInner>>,
    signal: Rc<Cell<u64>>,
    seen: u64,
}

impl ResetSubscription {
    #[must_use]
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Consume pending reset requests. True if at least one arrived.
    pub fn take(&mut self) -> bool {
        let current = self.signal.get();
        let pending = current != self.seen;
        self.seen = current;
        pending
    }

    /// Ask every other subscriber to reset.
    pub fn announce(&self) -> usize {
        let Some(bus) = self.bus.upgrade() else {
            return 0;
        };
        let inner = bus.borrow();
        inner.broadcast(Some(self.id))
    }
}

impl Drop for ResetSubscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            if let Ok(mut inner) = bus.try_borrow_mut() {
                inner.subscribers.retain(|(id, _)| *id != self.id);
            }
        }
    }
}
