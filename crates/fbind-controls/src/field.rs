#![forbid(unsafe_code)]

//! Field bindings for text and select controls.
//!
//! A [`FieldBinding`] wraps a [`BindingSource`] plus the host's render
//! trigger and captures the initial value exactly once at construction. It
//! exposes two cheap, cloneable views over one shared inner:
//!
//! - [`ControlView`] — what the rendered element binds to: the current
//!   `value()` and an `on_change` handler for UI change events.
//! - [`ControllerView`] — the imperative face: `set_value(v)` and `reset()`.
//!
//! # Invariants
//!
//! 1. Every write is immediately followed by a render-trigger update with a
//!    fresh snapshot of the backing state — no buffering, no batching.
//! 2. `reset()` restores the literal value captured at construction time,
//!    regardless of how many writes happened in between.
//! 3. Constructor validation is eager: a tree- or context-backed binding
//!    without a non-empty path fails at construction with
//!    [`BindingError::MissingParameter`], never at first use.

use std::rc::Rc;

use serde_json::Value;

use fbind_core::PathExpr;
use fbind_reactive::{SharedTrigger, TreeStore};

use crate::error::BindingError;
use crate::event::ChangeEvent;
use crate::source::{BindingSource, ContextPair};

struct FieldInner {
    source: BindingSource,
    initial: Value,
    trigger: SharedTrigger,
}

impl FieldInner {
    fn write_and_notify(&self, value: Value) {
        self.source.write(value);
        let snapshot = self.source.snapshot();
        self.trigger.request_update(&snapshot);
    }
}

/// A live association between one rendered control and a piece of state.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use fbind_controls::{ChangeEvent, FieldBinding};
/// use fbind_reactive::{NullTrigger, TreeStore};
/// use serde_json::json;
///
/// let store = TreeStore::new(json!({"user": {"name": "ada"}}));
/// let binding = FieldBinding::path(store.clone(), "user.name", Rc::new(NullTrigger)).unwrap();
///
/// binding.control().on_change(&ChangeEvent::new("grace"));
/// assert_eq!(binding.control().value(), json!("grace"));
///
/// binding.controller().reset();
/// assert_eq!(binding.control().value(), json!("ada"));
/// ```
pub struct FieldBinding {
    inner: Rc<FieldInner>,
}

impl Clone for FieldBinding {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl std::fmt::Debug for FieldBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldBinding")
            .field("value", &self.inner.source.read())
            .field("initial", &self.inner.initial)
            .finish()
    }
}

impl FieldBinding {
    /// Bind an ephemeral local value owned by the binding itself.
    #[must_use]
    pub fn local(initial: impl Into<Value>, trigger: SharedTrigger) -> Self {
        let initial = initial.into();
        Self::from_source(BindingSource::local(initial.clone()), initial, trigger)
    }

    /// Bind a field inside a host-owned tree, addressed by a dotted path.
    ///
    /// Fails fast: a blank path is [`BindingError::MissingParameter`], a
    /// malformed one surfaces the underlying [`PathError`](fbind_core::PathError).
    pub fn path(
        store: TreeStore,
        path: &str,
        trigger: SharedTrigger,
    ) -> Result<Self, BindingError> {
        if path.trim().is_empty() {
            return Err(BindingError::MissingParameter("path"));
        }
        let path = PathExpr::parse(path)?;
        let source = BindingSource::Path { store, path };
        let initial = source.read();
        Ok(Self::from_source(source, initial, trigger))
    }

    /// Bind a field inside an externally-owned context value.
    ///
    /// Same eager validation as [`FieldBinding::path`]; ownership of the
    /// context stays with the caller.
    pub fn shared(
        pair: ContextPair,
        field: &str,
        trigger: SharedTrigger,
    ) -> Result<Self, BindingError> {
        if field.trim().is_empty() {
            return Err(BindingError::MissingParameter("field"));
        }
        let path = PathExpr::parse(field)?;
        let source = BindingSource::Shared { pair, path };
        let initial = source.read();
        Ok(Self::from_source(source, initial, trigger))
    }

    fn from_source(source: BindingSource, initial: Value, trigger: SharedTrigger) -> Self {
        Self {
            inner: Rc::new(FieldInner {
                source,
                initial,
                trigger,
            }),
        }
    }

    /// The view a rendered element binds to.
    #[must_use]
    pub fn control(&self) -> ControlView {
        ControlView {
            inner: Rc::clone(&self.inner),
        }
    }

    /// The imperative view for programmatic updates.
    #[must_use]
    pub fn controller(&self) -> ControllerView {
        ControllerView {
            inner: Rc::clone(&self.inner),
        }
    }

    /// The value captured at construction time, as restored by `reset()`.
    #[must_use]
    pub fn initial(&self) -> &Value {
        &self.inner.initial
    }
}

/// Read side + change handler, bindable to a control's value/onChange pair.
pub struct ControlView {
    inner: Rc<FieldInner>,
}

impl Clone for ControlView {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl std::fmt::Debug for ControlView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlView")
            .field("value", &self.inner.source.read())
            .finish()
    }
}

impl ControlView {
    /// The current value of the bound field.
    #[must_use]
    pub fn value(&self) -> Value {
        self.inner.source.read()
    }

    /// Handle a UI change event: write its payload, then request a render.
    pub fn on_change(&self, event: &ChangeEvent) {
        self.inner.write_and_notify(event.value().clone());
    }
}

/// Imperative controller: set a raw value, or reset to the initial one.
pub struct ControllerView {
    inner: Rc<FieldInner>,
}

impl Clone for ControllerView {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl std::fmt::Debug for ControllerView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerView").finish()
    }
}

impl ControllerView {
    /// Write a raw value, then request a render.
    pub fn set_value(&self, value: impl Into<Value>) {
        self.inner.write_and_notify(value.into());
    }

    /// Restore the value captured at construction, then request a render.
    pub fn reset(&self) {
        self.inner.write_and_notify(self.inner.initial.clone());
    }
}
