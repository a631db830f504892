#![forbid(unsafe_code)]

//! Dialog binding with an exactly-once completion contract.
//!
//! A [`DialogBinding`] is a guard-flag state machine with two states,
//! {open, closed}, and a single allowed transition open→closed. Whichever of
//! explicit confirm, explicit cancel, or forced dismissal (host navigation
//! or unmount) happens first closes the dialog and fires the completion
//! callback with the terminal outcome; every later close attempt is a no-op.
//!
//! # Failure Modes
//!
//! - Construction without a completion callback fails fast with
//!   [`BindingError::MissingParameter`]: a dialog with no completion path is
//!   a programming error, not a runtime condition to recover from.
//! - Closing an already-closed dialog does nothing (callback never refires).

use std::cell::{Cell, RefCell};

use serde::{Deserialize, Serialize};

use crate::error::BindingError;

/// Terminal outcome handed to the completion callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    /// The primary action was confirmed.
    Confirmed,
    /// The dialog was explicitly cancelled.
    Cancelled,
    /// The host dismissed the dialog (navigation, unmount); no result.
    Dismissed,
}

/// Dialog configuration record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogSpec {
    /// Dialog title.
    pub title: String,
    /// Body message.
    pub message: String,
}

impl DialogSpec {
    /// Create a spec with a title and message.
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Boxed completion callback, fired exactly once with the terminal outcome.
pub type CompletionFn = Box<dyn FnOnce(DialogOutcome)>;

/// A dialog's open→closed lifecycle, with an exactly-once completion
/// callback.
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use fbind_controls::{DialogBinding, DialogOutcome, DialogSpec};
///
/// let outcome = Rc::new(Cell::new(None));
/// let seen = Rc::clone(&outcome);
/// let dialog = DialogBinding::new(
///     DialogSpec::new("Discard draft?", "Unsaved changes will be lost."),
///     move |o| seen.set(Some(o)),
/// );
///
/// dialog.confirm();
/// assert_eq!(outcome.get(), Some(DialogOutcome::Confirmed));
///
/// dialog.cancel(); // already closed: no-op, callback does not refire
/// assert_eq!(outcome.get(), Some(DialogOutcome::Confirmed));
/// ```
pub struct DialogBinding {
    spec: DialogSpec,
    open: Cell<bool>,
    on_complete: RefCell<Option<CompletionFn>>,
}

impl std::fmt::Debug for DialogBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogBinding")
            .field("title", &self.spec.title)
            .field("open", &self.open.get())
            .finish()
    }
}

impl DialogBinding {
    /// Create an open dialog with its completion callback.
    pub fn new(spec: DialogSpec, on_complete: impl FnOnce(DialogOutcome) + 'static) -> Self {
        Self {
            spec,
            open: Cell::new(true),
            on_complete: RefCell::new(Some(Box::new(on_complete))),
        }
    }

    /// Create a dialog from an optional callback, failing fast when it is
    /// absent. For callers assembling dialogs from loosely-typed parts.
    pub fn from_parts(
        spec: DialogSpec,
        on_complete: Option<CompletionFn>,
    ) -> Result<Self, BindingError> {
        let on_complete = on_complete.ok_or(BindingError::MissingParameter("on_complete"))?;
        Ok(Self {
            spec,
            open: Cell::new(true),
            on_complete: RefCell::new(Some(on_complete)),
        })
    }

    /// The dialog's configuration.
    #[must_use]
    pub fn spec(&self) -> &DialogSpec {
        &self.spec
    }

    /// Whether the open→closed transition has not yet happened.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    /// Close with [`DialogOutcome::Confirmed`].
    pub fn confirm(&self) {
        self.close(DialogOutcome::Confirmed);
    }

    /// Close with [`DialogOutcome::Cancelled`].
    pub fn cancel(&self) {
        self.close(DialogOutcome::Cancelled);
    }

    /// Forced dismissal by the host (navigation, unmount): close with
    /// [`DialogOutcome::Dismissed`].
    pub fn force_dismiss(&self) {
        self.close(DialogOutcome::Dismissed);
    }

    fn close(&self, outcome: DialogOutcome) {
        if !self.open.get() {
            return;
        }
        self.open.set(false);
        tracing::debug!(?outcome, title = %self.spec.title, "dialog closed");
        if let Some(callback) = self.on_complete.borrow_mut().take() {
            callback(outcome);
        }
    }
}
