#![forbid(unsafe_code)]

//! Option groups: radio-style exclusive selection and checkbox-style
//! multi-selection.
//!
//! Both group kinds own an ordered list of option rows populated exactly
//! once at construction — lifecycle-scoped initialization, independent of
//! how often the surrounding control re-renders. The list's length and order
//! never change afterward.
//!
//! Selection state is authoritative on the group (a single selected value
//! for [`ExclusiveGroup`], an ordered duplicate-free set for
//! [`MultiGroup`]); each option's `selected` flag is DERIVED from it,
//! recomputed in full on every transition and never patched individually.
//! Per-option [`OptionHandle`]s are built once alongside the rows and route
//! back into the owning group, so every rendered radio/checkbox element gets
//! a live, correctly-scoped change handler.

mod exclusive;
mod multi;

pub use exclusive::ExclusiveGroup;
pub use multi::MultiGroup;

use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Caller-supplied definition of one selectable option.
///
/// An explicit configuration record: `value` is required, `label` optional
/// and defaults to the value itself when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// The option's value, as submitted by the control.
    pub value: String,
    /// Display label; defaults to `value` when not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl OptionSpec {
    /// Define an option whose label defaults to its value.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: None,
        }
    }

    /// Set an explicit display label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    fn into_entry(self, selected: bool) -> OptionEntry {
        let label = self.label.unwrap_or_else(|| self.value.clone());
        OptionEntry {
            value: self.value,
            label,
            selected,
        }
    }
}

/// One option row as held by a group: value, resolved label, derived flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OptionEntry {
    pub(crate) value: String,
    pub(crate) label: String,
    pub(crate) selected: bool,
}

/// The per-option face bound to one radio/checkbox element.
#[derive(Debug, Clone)]
pub struct OptionView {
    value: String,
    label: String,
    selected: bool,
    handle: OptionHandle,
}

impl OptionView {
    pub(crate) fn new(entry: &OptionEntry, handle: OptionHandle) -> Self {
        Self {
            value: entry.value.clone(),
            label: entry.label.clone(),
            selected: entry.selected,
            handle,
        }
    }

    /// The option's value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The display label (the value itself when no label was given).
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether this option is selected, per the group's authoritative state
    /// at the time this view was taken.
    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// The change handler wired to this option's element.
    #[must_use]
    pub fn handle(&self) -> &OptionHandle {
        &self.handle
    }
}

/// A live change handler scoped to one option of one group.
///
/// Built exactly once per option at group construction; `activate()` runs
/// the group's transition for this option (select for radio groups, toggle
/// for checkbox groups).
#[derive(Clone)]
pub struct OptionHandle {
    activate: Rc<dyn Fn()>,
}

impl OptionHandle {
    pub(crate) fn new(activate: impl Fn() + 'static) -> Self {
        Self {
            activate: Rc::new(activate),
        }
    }

    /// Run this option's change transition.
    pub fn activate(&self) {
        (self.activate)();
    }
}

impl std::fmt::Debug for OptionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionHandle").finish()
    }
}
