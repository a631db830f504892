#![forbid(unsafe_code)]

//! Form-control bindings for formbind.
//!
//! A binding is a live association between a rendered control and a piece of
//! application state, with explicit read/write/reset operations:
//!
//! - [`FieldBinding`]: a text/select control bound to a [`BindingSource`]
//!   (an owned local value, a field inside a shared [`TreeStore`] tree, or
//!   an externally-owned context pair).
//! - [`ExclusiveGroup`] / [`MultiGroup`]: radio and checkbox option groups
//!   with derived per-option selection flags.
//! - [`OverlayStack`]: the coordinator-owned store of stacked overlay
//!   layers.
//! - [`DialogBinding`]: a dialog's open→closed state machine with an
//!   exactly-once completion callback.
//!
//! Every mutation goes through the backing store and is immediately followed
//! by a [`RenderTrigger`](fbind_reactive::RenderTrigger) update with a fresh
//! state snapshot — no buffering, no batching, no deferral.
//!
//! [`TreeStore`]: fbind_reactive::TreeStore

pub mod dialog;
pub mod error;
pub mod event;
pub mod field;
pub mod options;
pub mod overlay;
pub mod source;

pub use dialog::{CompletionFn, DialogBinding, DialogOutcome, DialogSpec};
pub use error::BindingError;
pub use event::ChangeEvent;
pub use field::{ControlView, ControllerView, FieldBinding};
pub use options::{ExclusiveGroup, MultiGroup, OptionHandle, OptionSpec, OptionView};
pub use overlay::{OverlayEntry, OverlayId, OverlayStack};
pub use source::{BindingSource, ContextPair};
