#![forbid(unsafe_code)]

//! The host framework's re-render hook.
//!
//! After every mutation a binding hands the host a fresh state snapshot
//! through [`RenderTrigger::request_update`]. The host must tolerate being
//! called when no visual difference results (at-least-once policy: an
//! idempotent re-select still requests a render).
//!
//! Any `Fn(&Value)` closure is a trigger, so hosts can pass their scheduler
//! directly. [`NullTrigger`] discards updates; [`RecordingTrigger`] (behind
//! the `test-helpers` feature) records them for assertions.

use std::rc::Rc;

use serde_json::Value;

/// Host-provided re-render scheduling, called after every mutation.
pub trait RenderTrigger {
    /// Schedule a re-render with the updated state snapshot.
    fn request_update(&self, snapshot: &Value);
}

/// Shared handle to a render trigger, as held by each binding.
pub type SharedTrigger = Rc<dyn RenderTrigger>;

impl<F: Fn(&Value)> RenderTrigger for F {
    fn request_update(&self, snapshot: &Value) {
        self(snapshot);
    }
}

/// A trigger that discards updates. Useful for headless use of bindings.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTrigger;

impl RenderTrigger for NullTrigger {
    fn request_update(&self, _snapshot: &Value) {}
}

/// Records every requested update for test assertions.
#[cfg(any(test, feature = "test-helpers"))]
#[derive(Debug, Default)]
pub struct RecordingTrigger {
    snapshots: std::cell::RefCell<Vec<Value>>,
}

#[cfg(any(test, feature = "test-helpers"))]
impl RecordingTrigger {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty recorder already wrapped for handing to bindings.
    #[must_use]
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::new())
    }

    /// Number of updates requested so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.snapshots.borrow().len()
    }

    /// The most recent snapshot, if any update was requested.
    #[must_use]
    pub fn last(&self) -> Option<Value> {
        self.snapshots.borrow().last().cloned()
    }

    /// All snapshots in request order.
    #[must_use]
    pub fn snapshots(&self) -> Vec<Value> {
        self.snapshots.borrow().clone()
    }
}

#[cfg(any(test, feature = "test-helpers"))]
impl RenderTrigger for RecordingTrigger {
    fn request_update(&self, snapshot: &Value) {
        self.snapshots.borrow_mut().push(snapshot.clone());
    }
}
