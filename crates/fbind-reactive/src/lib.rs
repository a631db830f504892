#![forbid(unsafe_code)]

//! Reactive state for formbind.
//!
//! This crate provides the change-tracking primitives the binding layer sits
//! on:
//!
//! - [`Observable`]: a shared, version-tracked value wrapper with change
//!   notification via subscriber callbacks.
//! - [`Subscription`]: RAII guard that automatically unsubscribes on drop.
//! - [`TreeStore`]: a shared `serde_json::Value` tree with path-addressed,
//!   notify-on-write mutation.
//! - [`BindingScope`]: subscription wiring scoped to one mounted control,
//!   released as a unit on unmount.
//! - [`RenderTrigger`]: the host framework's re-render hook, called after
//!   every binding mutation.
//!
//! # Architecture
//!
//! Everything here is single-threaded: `Rc<RefCell<..>>` shared ownership,
//! synchronous notification, no locks. All state transitions are reactions
//! to discrete UI input events; the host's render scheduler serializes the
//! resulting callbacks.
//!
//! # Invariants
//!
//! 1. `Observable` version increments exactly once per mutation that changes
//!    the value; setting an equal value is a no-op (no version bump, no
//!    notifications).
//! 2. `TreeStore::write` mutates the tree in place (sibling fields survive),
//!    bumps the version, and ALWAYS notifies — a tree write is a
//!    UI-initiated mutation and must reach the render trigger even when the
//!    new value equals the old one.
//! 3. Subscribers are notified in registration order.
//! 4. Dropping a [`Subscription`] removes the callback before the next
//!    notification cycle.

pub mod observable;
pub mod scope;
pub mod store;
pub mod trigger;

pub use observable::{Observable, Subscription};
pub use scope::BindingScope;
pub use store::TreeStore;
pub use trigger::{NullTrigger, RenderTrigger, SharedTrigger};

#[cfg(any(test, feature = "test-helpers"))]
pub use trigger::RecordingTrigger;
