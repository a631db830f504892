#![forbid(unsafe_code)]

//! Public facade for formbind.
//!
//! Re-exports the three layers:
//!
//! - [`fbind_core`] — path expressions and tree access.
//! - [`fbind_reactive`] — observables, the tree store, render triggering.
//! - [`fbind_controls`] — field bindings, option groups, overlays, dialogs.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use fbind::prelude::*;
//! use serde_json::json;
//!
//! let store = TreeStore::new(json!({"profile": {"name": ""}}));
//! let binding =
//!     FieldBinding::path(store.clone(), "profile.name", Rc::new(NullTrigger)).unwrap();
//!
//! binding.control().on_change(&ChangeEvent::new("ada"));
//! assert_eq!(store.read(&"profile.name".parse().unwrap()), Some(json!("ada")));
//! ```

pub use fbind_controls as controls;
pub use fbind_core as core;
pub use fbind_reactive as reactive;

/// The commonly-used surface in one import.
pub mod prelude {
    pub use fbind_controls::{
        BindingError, BindingSource, ChangeEvent, ContextPair, ControlView, ControllerView,
        DialogBinding, DialogOutcome, DialogSpec, ExclusiveGroup, FieldBinding, MultiGroup,
        OptionHandle, OptionSpec, OptionView, OverlayEntry, OverlayId, OverlayStack,
    };
    pub use fbind_core::{PathError, PathExpr};
    pub use fbind_reactive::{
        BindingScope, NullTrigger, Observable, RenderTrigger, SharedTrigger, Subscription,
        TreeStore,
    };
}
