#![forbid(unsafe_code)]

//! Shared observable values with RAII subscriptions.
//!
//! [`Observable<T>`] wraps a value in `Rc<RefCell<..>>` shared ownership and
//! notifies subscriber callbacks on every real change. Cloning an observable
//! shares the same underlying state.
//!
//! # Invariants
//!
//! 1. Version increments exactly once per mutation that changes the value.
//! 2. Subscribers are notified in registration order.
//! 3. [`Observable::set`] with a value equal to the current one is a no-op
//!    (no version bump, no notifications). [`Observable::replace`] bypasses
//!    the equality check and always notifies.
//! 4. Dropping a [`Subscription`] removes the callback before the next
//!    notification cycle.
//!
//! # Failure Modes
//!
//! - Callback panic: propagates to the caller of the mutating operation.
//! - A callback that mutates the same observable re-enters notification;
//!   the subscriber list is snapshotted per cycle, so the set of callbacks
//!   invoked is the one registered when the cycle started.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

struct Subscriber<T> {
    id: u64,
    callback: Rc<dyn Fn(&T)>,
}

struct Inner<T> {
    value: RefCell<T>,
    version: Cell<u64>,
    subscribers: RefCell<Vec<Subscriber<T>>>,
    next_id: Cell<u64>,
}

/// A shared, version-tracked value with change notification.
///
/// # Example
///
/// ```
/// use fbind_reactive::Observable;
///
/// let count = Observable::new(0);
/// let seen = std::rc::Rc::new(std::cell::Cell::new(0));
/// let s = std::rc::Rc::clone(&seen);
/// let _sub = count.subscribe(move |v| s.set(*v));
///
/// count.set(5);
/// assert_eq!(seen.get(), 5);
/// count.set(5); // equal value: no notification
/// assert_eq!(count.version(), 1);
/// ```
pub struct Observable<T> {
    inner: Rc<Inner<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.inner.value.borrow())
            .field("version", &self.inner.version.get())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Create a new observable holding `value`.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(Inner {
                value: RefCell::new(value),
                version: Cell::new(0),
                subscribers: RefCell::new(Vec::new()),
                next_id: Cell::new(1),
            }),
        }
    }

    /// Clone out the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Borrow the current value without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Set a new value, notifying subscribers.
    ///
    /// Setting a value equal to the current one is a no-op: no version bump,
    /// no notifications.
    pub fn set(&self, value: T) {
        let changed = {
            let mut slot = self.inner.value.borrow_mut();
            if *slot == value {
                false
            } else {
                *slot = value;
                true
            }
        };
        if changed {
            self.bump_and_notify();
        }
    }

    /// Set a new value unconditionally, skipping the equality check.
    pub fn replace(&self, value: T) {
        *self.inner.value.borrow_mut() = value;
        self.bump_and_notify();
    }

    /// Number of value changes since construction.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.version.get()
    }

    /// Subscribe to changes. The callback receives the new value and fires
    /// until the returned [`Subscription`] is dropped.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner.subscribers.borrow_mut().push(Subscriber {
            id,
            callback: Rc::new(callback),
        });

        let weak: Weak<Inner<T>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.subscribers.borrow_mut().retain(|s| s.id != id);
            }
        })
    }

    fn bump_and_notify(&self) {
        self.inner.version.set(self.inner.version.get() + 1);
        tracing::trace!(version = self.inner.version.get(), "observable changed");
        let current = self.get();
        // Snapshot the callback list so subscriber mutation during
        // notification cannot invalidate the iteration.
        let callbacks: Vec<Rc<dyn Fn(&T)>> = self
            .inner
            .subscribers
            .borrow()
            .iter()
            .map(|s| Rc::clone(&s.callback))
            .collect();
        for callback in callbacks {
            callback(&current);
        }
    }
}

/// RAII guard for a subscriber registration.
///
/// Dropping the subscription removes the callback; it will not fire in any
/// later notification cycle.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub(crate) fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_current_value() {
        let obs = Observable::new(42);
        assert_eq!(obs.get(), 42);
        obs.set(100);
        assert_eq!(obs.get(), 100);
    }

    #[test]
    fn clone_shares_state() {
        let a = Observable::new(1);
        let b = a.clone();
        b.set(99);
        assert_eq!(a.get(), 99);
    }

    #[test]
    fn equal_set_is_no_op() {
        let obs = Observable::new(5);
        let fired = Rc::new(Cell::new(0));
        let f = Rc::clone(&fired);
        let _sub = obs.subscribe(move |_| f.set(f.get() + 1));

        obs.set(5);
        assert_eq!(obs.version(), 0);
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn replace_always_notifies() {
        let obs = Observable::new(5);
        let fired = Rc::new(Cell::new(0));
        let f = Rc::clone(&fired);
        let _sub = obs.subscribe(move |_| f.set(f.get() + 1));

        obs.replace(5);
        assert_eq!(obs.version(), 1);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn version_bumps_once_per_change() {
        let obs = Observable::new(0);
        obs.set(1);
        obs.set(2);
        obs.set(2);
        assert_eq!(obs.version(), 2);
    }

    #[test]
    fn subscribers_fire_in_registration_order() {
        let obs = Observable::new(0);
        let order = Rc::new(RefCell::new(Vec::new()));

        let o1 = Rc::clone(&order);
        let _s1 = obs.subscribe(move |_| o1.borrow_mut().push("first"));
        let o2 = Rc::clone(&order);
        let _s2 = obs.subscribe(move |_| o2.borrow_mut().push("second"));

        obs.set(1);
        assert_eq!(*order.borrow(), ["first", "second"]);
    }

    #[test]
    fn dropped_subscription_stops_callbacks() {
        let obs = Observable::new(0);
        let fired = Rc::new(Cell::new(0));
        {
            let f = Rc::clone(&fired);
            let _sub = obs.subscribe(move |_| f.set(f.get() + 1));
            obs.set(1);
            assert_eq!(fired.get(), 1);
        }
        obs.set(2);
        assert_eq!(fired.get(), 1, "callback fired after subscription drop");
    }

    #[test]
    fn subscription_outliving_observable_is_harmless() {
        let sub = {
            let obs = Observable::new(0);
            obs.subscribe(|_| {})
        };
        drop(sub);
    }

    #[test]
    fn callback_receives_new_value() {
        let obs = Observable::new(String::new());
        let seen = Rc::new(RefCell::new(String::new()));
        let s = Rc::clone(&seen);
        let _sub = obs.subscribe(move |v: &String| *s.borrow_mut() = v.clone());

        obs.set("hello".to_string());
        assert_eq!(*seen.borrow(), "hello");
    }

    #[test]
    fn subscribe_during_notification_does_not_fire_same_cycle() {
        let obs = Observable::new(0);
        let late_fired = Rc::new(Cell::new(false));

        let obs2 = obs.clone();
        let lf = Rc::clone(&late_fired);
        let held = Rc::new(RefCell::new(Vec::new()));
        let h = Rc::clone(&held);
        let _sub = obs.subscribe(move |_| {
            let lf = Rc::clone(&lf);
            h.borrow_mut()
                .push(obs2.subscribe(move |_| lf.set(true)));
        });

        obs.set(1);
        assert!(!late_fired.get(), "late subscriber fired in the same cycle");
    }
}
