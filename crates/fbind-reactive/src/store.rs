#![forbid(unsafe_code)]

//! Mutable tree store with notify-on-write.
//!
//! [`TreeStore`] owns a `serde_json::Value` root and is the single mutation
//! point for path-addressed writes. Mutations happen in place — sibling
//! fields written by other holders of the same store survive — and every
//! write notifies subscribers, so identity games (shallow-copying the root to
//! signal change) are unnecessary.
//!
//! Cloning a `TreeStore` is cheap and shares the same node; the host that
//! constructed the store owns the data, and clones held by bindings are
//! non-owning collaborators that must not be used after the host tears the
//! owning control down.
//!
//! # Invariants
//!
//! 1. `write` mutates in place, bumps the version, and always notifies —
//!    there is no equality dedup, matching the binding layer's at-least-once
//!    notification policy.
//! 2. Subscribers are notified in registration order with the post-write
//!    root.
//! 3. `read` never mutates; an unreachable path is `None`, not an error.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use serde_json::Value;

use fbind_core::{PathExpr, assign, resolve};

use crate::observable::Subscription;

struct Subscriber {
    id: u64,
    callback: Rc<dyn Fn(&Value)>,
}

struct Inner {
    root: RefCell<Value>,
    version: Cell<u64>,
    subscribers: RefCell<Vec<Subscriber>>,
    next_id: Cell<u64>,
}

/// A shared mutable `Value` tree with path-addressed, notify-on-write access.
///
/// # Example
///
/// ```
/// use fbind_core::PathExpr;
/// use fbind_reactive::TreeStore;
/// use serde_json::json;
///
/// let store = TreeStore::new(json!({"user": {"name": "ada"}}));
/// let path = PathExpr::parse("user.name").unwrap();
///
/// store.write(&path, json!("grace"));
/// assert_eq!(store.read(&path), Some(json!("grace")));
/// ```
pub struct TreeStore {
    inner: Rc<Inner>,
}

impl Clone for TreeStore {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl std::fmt::Debug for TreeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeStore")
            .field("version", &self.inner.version.get())
            .field("root", &self.inner.root.borrow())
            .finish()
    }
}

impl TreeStore {
    /// Create a store owning `root`.
    #[must_use]
    pub fn new(root: Value) -> Self {
        Self {
            inner: Rc::new(Inner {
                root: RefCell::new(root),
                version: Cell::new(0),
                subscribers: RefCell::new(Vec::new()),
                next_id: Cell::new(1),
            }),
        }
    }

    /// Clone out the value at `path`, or `None` on a lookup miss.
    #[must_use]
    pub fn read(&self, path: &PathExpr) -> Option<Value> {
        resolve(&self.inner.root.borrow(), path).cloned()
    }

    /// Borrow the root without cloning.
    pub fn with_root<R>(&self, f: impl FnOnce(&Value) -> R) -> R {
        f(&self.inner.root.borrow())
    }

    /// Clone out the whole root — the state snapshot handed to the host's
    /// render trigger.
    #[must_use]
    pub fn snapshot(&self) -> Value {
        self.inner.root.borrow().clone()
    }

    /// Assign `value` at `path`, then notify every subscriber.
    ///
    /// The mutation is in place: unrelated fields keep their identity and
    /// other live holders of this store observe the new field value
    /// immediately. Notification is unconditional.
    pub fn write(&self, path: &PathExpr, value: Value) {
        {
            let mut root = self.inner.root.borrow_mut();
            assign(&mut root, path, value);
        }
        self.inner.version.set(self.inner.version.get() + 1);
        tracing::debug!(path = %path, version = self.inner.version.get(), "tree store write");
        self.notify();
    }

    /// Number of writes since construction.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.version.get()
    }

    /// Subscribe to writes. The callback receives the post-write root and
    /// fires until the returned [`Subscription`] is dropped.
    pub fn subscribe(&self, callback: impl Fn(&Value) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner.subscribers.borrow_mut().push(Subscriber {
            id,
            callback: Rc::new(callback),
        });

        let weak: Weak<Inner> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.subscribers.borrow_mut().retain(|s| s.id != id);
            }
        })
    }

    fn notify(&self) {
        let current = self.snapshot();
        let callbacks: Vec<Rc<dyn Fn(&Value)>> = self
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
