#![forbid(unsafe_code)]

//! Backing stores for field bindings.
//!
//! [`BindingSource`] gives a [`FieldBinding`](crate::FieldBinding) one
//! read/write surface over three kinds of state:
//!
//! - [`BindingSource::Local`] — a scalar owned by the binding itself; its
//!   lifetime is the binding's lifetime.
//! - [`BindingSource::Path`] — a field inside a host-owned [`TreeStore`]
//!   tree, addressed by a dotted path. The store handle is non-owning;
//!   writes mutate the shared tree in place so every other live holder
//!   observes the new field value immediately.
//! - [`BindingSource::Shared`] — a field inside an externally-owned value
//!   reached through a caller-supplied [`ContextPair`] (getter/setter).
//!   Identical mutation discipline to `Path`; ownership stays with the
//!   caller and the binding must not outlive it.
//!
//! The render notification that must follow every write lives one layer up,
//! in the owning binding — sources only read and write state.

use std::rc::Rc;

use serde_json::Value;

use fbind_core::{PathExpr, assign, resolve};
use fbind_reactive::{Observable, TreeStore};

/// Externally-owned context access: a getter/setter pair over a root value.
///
/// The caller keeps ownership of the underlying state; the setter receives
/// the whole mutated root, which is how the owner learns about the change.
#[derive(Clone)]
pub struct ContextPair {
    read: Rc<dyn Fn() -> Value>,
    write: Rc<dyn Fn(Value)>,
}

impl ContextPair {
    /// Create a pair from a getter and a setter.
    pub fn new(read: impl Fn() -> Value + 'static, write: impl Fn(Value) + 'static) -> Self {
        Self {
            read: Rc::new(read),
            write: Rc::new(write),
        }
    }

    /// Read the current context root.
    #[must_use]
    pub fn read(&self) -> Value {
        (self.read)()
    }

    /// Hand a new context root back to the owner.
    pub fn write(&self, root: Value) {
        (self.write)(root);
    }
}

impl std::fmt::Debug for ContextPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextPair").finish()
    }
}

/// The three backing stores a field binding can sit on.
#[derive(Debug, Clone)]
pub enum BindingSource {
    /// A value owned by the binding.
    Local(Observable<Value>),
    /// A field inside a host-owned tree.
    Path {
        /// Non-owning handle to the host's tree store.
        store: TreeStore,
        /// The addressed field.
        path: PathExpr,
    },
    /// A field inside an externally-owned context value.
    Shared {
        /// Caller-supplied getter/setter over the context root.
        pair: ContextPair,
        /// The addressed field.
        path: PathExpr,
    },
}

impl BindingSource {
    /// Create a binding-owned local source holding `initial`.
    #[must_use]
    pub fn local(initial: Value) -> Self {
        Self::Local(Observable::new(initial))
    }

    /// Read the current value. A lookup miss reads as `Value::Null`.
    #[must_use]
    pub fn read(&self) -> Value {
        match self {
            Self::Local(value) => value.get(),
            Self::Path { store, path } => store.read(path).unwrap_or(Value::Null),
            Self::Shared { pair, path } => resolve(&pair.read(), path)
                .cloned()
                .unwrap_or(Value::Null),
        }
    }

    /// Write a new value into the backing store.
    pub fn write(&self, value: Value) {
        match self {
            Self::Local(slot) => slot.replace(value),
            Self::Path { store, path } => store.write(path, value),
            Self::Shared { pair, path } => {
                let mut root = pair.read();
                assign(&mut root, path, value);
                pair.write(root);
            }
        }
    }

    /// The state snapshot handed to the render trigger after a write: the
    /// whole backing root for tree-backed sources, the value itself for a
    /// local source.
    #[must_use]
    pub fn snapshot(&self) -> Value {
        match self {
            Self::Local(value) => value.get(),
            Self::Path { store, .. } => store.snapshot(),
            Self::Shared { pair, .. } => pair.read(),
        }
    }
}
