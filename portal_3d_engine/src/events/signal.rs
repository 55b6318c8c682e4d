/// Signal — typed, single-threaded publish/subscribe channel.
///
/// A `Signal<T>` is a cheap handle; clones share the same subscriber list,
/// so the emitter keeps one handle and consumers subscribe through another.
/// Handlers run synchronously, in subscription order, on the publishing
/// thread.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use crate::engine_warn;

/// Subscription ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Handler<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct Subscribers<T> {
    next_id: Cell<u64>,
    handlers: RefCell<Vec<(SubscriptionId, Handler<T>)>>,
}

pub struct Signal<T> {
    inner: Rc<Subscribers<T>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Signal<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(Subscribers {
                next_id: Cell::new(1),
                handlers: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Register a handler. It runs on every subsequent `publish`.
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: FnMut(&T) + 'static,
    {
        let id = SubscriptionId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        let handler: Handler<T> = Rc::new(RefCell::new(handler));
        self.inner.handlers.borrow_mut().push((id, handler));
        id
    }

    /// Remove a handler. Returns false if the ID is unknown.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.inner.handlers.borrow_mut();
        match handlers.iter().position(|(sid, _)| *sid == id) {
            Some(pos) => {
                handlers.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Deliver `event` to every handler, returning how many ran.
    ///
    /// Handlers may subscribe or unsubscribe while running; changes apply
    /// from the next publish. A handler that re-enters its own signal is
    /// skipped for the nested delivery.
    pub fn publish(&self, event: &T) -> usize {
        let snapshot: Vec<Handler<T>> = self.inner.handlers
            .borrow()
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();

        let mut delivered = 0;
        for handler in snapshot {
            match handler.try_borrow_mut() {
                Ok(mut handler) => {
                    (&mut *handler)(event);
                    delivered += 1;
                }
                Err(_) => {
                    engine_warn!("portal3d::Signal", "Skipped re-entrant handler");
                }
            }
        }
        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.handlers.borrow().len()
    }
}

#[cfg(test)]
#[path = "signal_tests.rs"]
mod tests;
