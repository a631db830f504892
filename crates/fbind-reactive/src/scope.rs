#![forbid(unsafe_code)]

//! Subscription wiring for a control's host lifetime.
//!
//! Construction builds state; attaching to the host is a separate concern.
//! A [`BindingScope`] collects the subscriptions one mounted control needs
//! and releases them all when the control unmounts (the scope drops), so
//! "build state once" and "wire to the host" stay decoupled.
//!
//! # Invariants
//!
//! 1. After the scope drops, no callback held by it fires again.
//! 2. `clear()` releases every subscription immediately; the scope stays
//!    reusable.
//! 3. `binding_count` is always accurate.

use serde_json::Value;

use crate::observable::{Observable, Subscription};
use crate::store::TreeStore;

/// Collects subscriptions for a logical scope (one mounted control).
///
/// # Example
///
/// ```
/// use fbind_reactive::{BindingScope, TreeStore};
/// use serde_json::json;
///
/// let store = TreeStore::new(json!({}));
/// let mut scope = BindingScope::new();
/// scope.watch_store(&store, |root| { let _ = root; });
/// assert_eq!(scope.binding_count(), 1);
///
/// drop(scope); // unmount: all subscriptions released
/// ```
pub struct BindingScope {
    subscriptions: Vec<Subscription>,
}

impl BindingScope {
    /// Create an empty scope.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscriptions: Vec::new(),
        }
    }

    /// Hold an externally-created subscription until the scope drops.
    pub fn hold(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    /// Subscribe to an observable for the lifetime of this scope.
    pub fn watch<T: Clone + PartialEq + 'static>(
        &mut self,
        source: &Observable<T>,
        callback: impl Fn(&T) + 'static,
    ) -> &mut Self {
        let subscription = source.subscribe(callback);
        self.subscriptions.push(subscription);
        self
    }

    /// Subscribe to a tree store for the lifetime of this scope.
    pub fn watch_store(
        &mut self,
        store: &TreeStore,
        callback: impl Fn(&Value) + 'static,
    ) -> &mut Self {
        let subscription = store.subscribe(callback);
        self.subscriptions.push(subscription);
        self
    }

    /// Number of held subscriptions.
    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Whether the scope holds no subscriptions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Release every subscription immediately; the scope stays reusable.
    pub fn clear(&mut self) {
        self.subscriptions.clear();
    }
}

impl Default for BindingScope {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BindingScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingScope")
            .field("binding_count", &self.subscriptions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fbind_core::PathExpr;
    use serde_json::json;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn scope_holds_subscriptions() {
        let obs = Observable::new(0);
        let seen = Rc::new(Cell::new(0));

        let mut scope = BindingScope::new();
        let s = Rc::clone(&seen);
        scope.watch(&obs, move |v| s.set(*v));
        assert_eq!(scope.binding_count(), 1);

        obs.set(42);
        assert_eq!(seen.get(), 42);
    }

    #[test]
    fn scope_drop_releases_subscriptions() {
        let obs = Observable::new(0);
        let seen = Rc::new(Cell::new(0));

        {
            let mut scope = BindingScope::new();
            let s = Rc::clone(&seen);
            scope.watch(&obs, move |v| s.set(*v));
            obs.set(1);
            assert_eq!(seen.get(), 1);
        }

        obs.set(99);
        assert_eq!(seen.get(), 1, "callback fired after scope drop");
    }

    #[test]
    fn scope_clear_is_reusable() {
        let obs = Observable::new(0);
        let first = Rc::new(Cell::new(false));
        let second = Rc::new(Cell::new(false));

        let mut scope = BindingScope::new();
        let f = Rc::clone(&first);
        scope.watch(&obs, move |_| f.set(true));
        scope.clear();
        assert!(scope.is_empty());

        let s = Rc::clone(&second);
        scope.watch(&obs, move |_| s.set(true));

        obs.set(1);
        assert!(!first.get(), "cleared subscription fired");
        assert!(second.get());
    }

    #[test]
    fn scope_watches_tree_stores_too() {
        let store = TreeStore::new(json!({}));
        let fired = Rc::new(Cell::new(0));

        let mut scope = BindingScope::new();
        let f = Rc::clone(&fired);
        scope.watch_store(&store, move |_| f.set(f.get() + 1));

        store.write(&PathExpr::parse("a").unwrap(), json!(1));
        assert_eq!(fired.get(), 1);

        drop(scope);
        store.write(&PathExpr::parse("a").unwrap(), json!(2));
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn scope_hold_external_subscription() {
        let obs = Observable::new(0);
        let fired = Rc::new(Cell::new(0));

        let mut scope = BindingScope::new();
        let f = Rc::clone(&fired);
        let subscription = obs.subscribe(move |_| f.set(f.get() + 1));
        scope.hold(subscription);

        obs.set(5);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn scope_debug_reports_count() {
        let obs = Observable::new(0);
        let mut scope = BindingScope::new();
        scope.watch(&obs, |_| {});
        scope.watch(&obs, |_| {});
        assert!(format!("{scope:?}").contains("binding_count: 2"));
    }
}
