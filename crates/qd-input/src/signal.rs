//! Observer registry for typed events.
//!
//! A [`Signal`] is an ordered list of subscriber callbacks dispatched
//! synchronously, in registration order. Subscriptions are keyed by an
//! [`OwnerToken`] so a whole bundle can be revoked at once; a revoked owner
//! never receives another callback, even when revocation happens in the
//! middle of a dispatch from another subscriber.
//!
//! Signals are `Rc`-shared and single-threaded by design — all input state
//! mutation happens on the UI/event thread.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Shared alive-flag revoking every subscription made under it.
#[derive(Debug, Clone)]
pub struct OwnerToken {
    alive: Rc<Cell<bool>>,
}

impl OwnerToken {
    pub fn new() -> Self {
        Self {
            alive: Rc::new(Cell::new(true)),
        }
    }

    /// Marks every subscription under this owner dead. Idempotent.
    pub fn revoke(&self) {
        self.alive.set(false);
    }

    pub fn is_alive(&self) -> bool {
        self.alive.get()
    }
}

impl Default for OwnerToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle for removing a single subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

struct Entry<T> {
    id: u64,
    owner: Rc<Cell<bool>>,
    callback: Box<dyn FnMut(&T)>,
}

struct SignalInner<T> {
    entries: Vec<Entry<T>>,
    /// Ids unsubscribed while their entry was swapped out for dispatch.
    dead: Vec<u64>,
    next_id: u64,
    dispatching: bool,
}

/// A typed event emitter. Cloning shares the subscriber list.
pub struct Signal<T> {
    inner: Rc<RefCell<SignalInner<T>>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
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
            inner: Rc::new(RefCell::new(SignalInner {
                entries: Vec::new(),
                dead: Vec::new(),
                next_id: 0,
                dispatching: false,
            })),
        }
    }

    /// Registers `callback` under `owner`. Callbacks registered during a
    /// dispatch are first heard on the next emission.
    pub fn subscribe(&self, owner: &OwnerToken, callback: impl FnMut(&T) + 'static) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.entries.push(Entry {
            id,
            owner: Rc::clone(&owner.alive),
            callback: Box::new(callback),
        });
        SubscriptionId(id)
    }

    /// Removes a single subscription. Safe during dispatch; safe to call
    /// with an id that was already removed.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        let mut inner = self.inner.borrow_mut();
        if let Some(pos) = inner.entries.iter().position(|e| e.id == id.0) {
            inner.entries.remove(pos);
        } else if inner.dispatching {
            inner.dead.push(id.0);
        }
    }

    /// Dispatches `payload` to every live subscriber, in registration
    /// order. Reentrant emission of the same signal is a no-op.
    pub fn emit(&self, payload: &T) {
        // Swap the list out so callbacks may subscribe/unsubscribe freely.
        let mut entries = {
            let mut inner = self.inner.borrow_mut();
            if inner.dispatching {
                return;
            }
            inner.dispatching = true;
            std::mem::take(&mut inner.entries)
        };

        for entry in entries.iter_mut() {
            // Checked per call: an owner revoked by an earlier subscriber
            // in this very dispatch must not be invoked.
            let killed = self.inner.borrow().dead.contains(&entry.id);
            if entry.owner.get() && !killed {
                (entry.callback)(payload);
            }
        }

        let mut inner = self.inner.borrow_mut();
        inner.dispatching = false;
        let dead = std::mem::take(&mut inner.dead);
        entries.retain(|e| e.owner.get() && !dead.contains(&e.id));
        // Entries added during dispatch go after the surviving originals.
        let added = std::mem::take(&mut inner.entries);
        inner.entries = entries;
        inner.entries.extend(added);
    }

    /// Number of registered (not yet purged) subscriptions.
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.iter().filter(|e| e.owner.get()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn collector() -> (Rc<RefCell<Vec<i32>>>, impl Fn(i32) -> Box<dyn FnMut(&i32)>) {
        let seen: Rc<RefCell<Vec<i32>>> = Rc::new(RefCell::new(Vec::new()));
        let seen2 = Rc::clone(&seen);
        let make = move |tag: i32| -> Box<dyn FnMut(&i32)> {
            let seen = Rc::clone(&seen2);
            Box::new(move |v: &i32| seen.borrow_mut().push(tag * 1000 + v))
        };
        (seen, make)
    }

    #[test]
    fn dispatch_runs_in_registration_order() {
        let signal = Signal::new();
        let owner = OwnerToken::new();
        let (seen, make) = collector();

        signal.subscribe(&owner, make(1));
        signal.subscribe(&owner, make(2));
        signal.emit(&7);

        assert_eq!(*seen.borrow(), vec![1007, 2007]);
    }

    #[test]
    fn revoked_owner_is_skipped() {
        let signal = Signal::new();
        let owner = OwnerToken::new();
        let (seen, make) = collector();

        signal.subscribe(&owner, make(1));
        owner.revoke();
        signal.emit(&1);

        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn owner_revoked_mid_dispatch_suppresses_later_callbacks() {
        let signal: Signal<i32> = Signal::new();
        let first = OwnerToken::new();
        let second = OwnerToken::new();
        let (seen, make) = collector();

        let second_clone = second.clone();
        signal.subscribe(&first, move |_| second_clone.revoke());
        signal.subscribe(&second, make(9));

        signal.emit(&5);
        assert!(
            seen.borrow().is_empty(),
            "revoked mid-dispatch but still called"
        );
    }

    #[test]
    fn unsubscribe_mid_dispatch_suppresses_later_callbacks() {
        let signal: Signal<i32> = Signal::new();
        let owner = OwnerToken::new();
        let (seen, make) = collector();

        // The first subscriber removes the second by id.
        let signal_clone = signal.clone();
        let target: Rc<Cell<Option<SubscriptionId>>> = Rc::new(Cell::new(None));
        let target_clone = Rc::clone(&target);
        signal.subscribe(&owner, move |_| {
            if let Some(id) = target_clone.get() {
                signal_clone.unsubscribe(id);
            }
        });
        let id = signal.subscribe(&owner, make(4));
        target.set(Some(id));

        signal.emit(&1);
        assert!(seen.borrow().is_empty());

        // And it stays removed.
        signal.emit(&2);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn subscribe_during_dispatch_is_heard_next_time() {
        let signal: Signal<i32> = Signal::new();
        let owner = OwnerToken::new();
        let (seen, make) = collector();

        let signal_clone = signal.clone();
        let owner_clone = owner.clone();
        let make_clone = make(8);
        let late: Rc<RefCell<Option<Box<dyn FnMut(&i32)>>>> =
            Rc::new(RefCell::new(Some(make_clone)));
        signal.subscribe(&owner, move |_| {
            if let Some(cb) = late.borrow_mut().take() {
                signal_clone.subscribe(&owner_clone, cb);
            }
        });

        signal.emit(&1);
        assert!(seen.borrow().is_empty(), "heard during its own registration");
        signal.emit(&2);
        assert_eq!(*seen.borrow(), vec![8002]);
    }

    #[test]
    fn reentrant_emit_is_a_no_op() {
        let signal: Signal<i32> = Signal::new();
        let owner = OwnerToken::new();
        let (seen, make) = collector();

        let signal_clone = signal.clone();
        signal.subscribe(&owner, move |v| {
            if *v < 10 {
                signal_clone.emit(&100);
            }
        });
        signal.subscribe(&owner, make(3));

        signal.emit(&1);
        // The nested emit did not re-run the list.
        assert_eq!(*seen.borrow(), vec![3001]);
    }

    #[test]
    fn len_counts_live_subscriptions() {
        let signal: Signal<i32> = Signal::new();
        let a = OwnerToken::new();
        let b = OwnerToken::new();
        signal.subscribe(&a, |_| {});
        signal.subscribe(&b, |_| {});
        assert_eq!(signal.len(), 2);
        a.revoke();
        assert_eq!(signal.len(), 1);
    }
}
