#![forbid(unsafe_code)]

//! Radio-semantics option group: at most one selected value.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::{Value, json};

use fbind_reactive::SharedTrigger;

use crate::error::BindingError;
use crate::options::{OptionEntry, OptionHandle, OptionSpec, OptionView};

struct ExclusiveInner {
    entries: RefCell<Vec<OptionEntry>>,
    selected: RefCell<String>,
    trigger: SharedTrigger,
}

impl ExclusiveInner {
    fn select(&self, value: &str) {
        *self.selected.borrow_mut() = value.to_string();
        // Re-derive every flag from the authoritative value; a stale flag on
        // a non-matching option must be impossible.
        for entry in self.entries.borrow_mut().iter_mut() {
            entry.selected = entry.value == value;
        }
        tracing::debug!(selected = value, "exclusive group select");
        self.notify();
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        self.trigger.request_update(&snapshot);
    }

    fn snapshot(&self) -> Value {
        let entries = self.entries.borrow();
        json!({
            "selected": *self.selected.borrow(),
            "options": entries
                .iter()
                .map(|e| json!({"value": e.value, "label": e.label, "selected": e.selected}))
                .collect::<Vec<_>>(),
        })
    }
}

/// A radio-style group: a single authoritative selected value plus an
/// ordered, construction-time option list.
///
/// # Invariants
///
/// 1. The option list is populated exactly once, here; no later call adds,
///    removes, or reorders options.
/// 2. After any sequence of `select` calls, exactly one option (or zero,
///    when the selected value matches no option) has `selected == true` —
///    the one whose value equals [`selected`](ExclusiveGroup::selected).
/// 3. Re-selecting the current value is an idempotent transition that still
///    requests a render (at-least-once notification).
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use fbind_controls::{ExclusiveGroup, OptionSpec};
/// use fbind_reactive::NullTrigger;
///
/// let group = ExclusiveGroup::new(
///     vec![OptionSpec::new("red"), OptionSpec::new("blue")],
///     Some("red"),
///     Rc::new(NullTrigger),
/// )
/// .unwrap();
///
/// group.select("blue");
/// assert_eq!(group.selected(), "blue");
/// assert!(group.options()[1].is_selected());
/// ```
pub struct ExclusiveGroup {
    inner: Rc<ExclusiveInner>,
    handles: Vec<OptionHandle>,
}

impl std::fmt::Debug for ExclusiveGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExclusiveGroup")
            .field("selected", &self.inner.selected.borrow())
            .field("options", &self.inner.entries.borrow().len())
            .finish()
    }
}

impl ExclusiveGroup {
    /// Build the group, populating the option list exactly once.
    ///
    /// `initial` is the initially selected value; absent means no selection
    /// (the empty string). An empty `specs` list fails fast with
    /// [`BindingError::MissingParameter`].
    pub fn new(
        specs: Vec<OptionSpec>,
        initial: Option<&str>,
        trigger: SharedTrigger,
    ) -> Result<Self, BindingError> {
        if specs.is_empty() {
            return Err(BindingError::MissingParameter("options"));
        }
        let selected = initial.unwrap_or("").to_string();
        let entries: Vec<OptionEntry> = specs
            .into_iter()
            .map(|spec| {
                let is_selected = spec.value == selected;
                spec.into_entry(is_selected)
            })
            .collect();

        let inner = Rc::new(ExclusiveInner {
            entries: RefCell::new(entries),
            selected: RefCell::new(selected),
            trigger,
        });

        let handles = inner
            .entries
            .borrow()
            .iter()
            .map(|entry| {
                let owner = Rc::clone(&inner);
                let value = entry.value.clone();
                OptionHandle::new(move || owner.select(&value))
            })
            .collect();

        Ok(Self { inner, handles })
    }

    /// Select `value`, re-deriving every option flag, then request a render.
    pub fn select(&self, value: &str) {
        self.inner.select(value);
    }

    /// The authoritative selected value (empty string = no selection).
    #[must_use]
    pub fn selected(&self) -> String {
        self.inner.selected.borrow().clone()
    }

    /// Current views of the option rows, in construction order.
    #[must_use]
    pub fn options(&self) -> Vec<OptionView> {
        self.inner
            .entries
            .borrow()
            .iter()
            .zip(&self.handles)
            .map(|(entry, handle)| OptionView::new(entry, handle.clone()))
            .collect()
    }

    /// Number of options. Fixed at construction.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Always false: construction rejects an empty option list.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fbind_reactive::RecordingTrigger;

    fn specs() -> Vec<OptionSpec> {
        vec![
            OptionSpec::new("a"),
            OptionSpec::new("b").label("B"),
            OptionSpec::new("c"),
        ]
    }

    fn selected_values(group: &ExclusiveGroup) -> Vec<String> {
        group
            .options()
            .iter()
            .filter(|o| o.is_selected())
            .map(|o| o.value().to_string())
            .collect()
    }

    #[test]
    fn empty_options_fail_fast() {
        let err = ExclusiveGroup::new(vec![], None, RecordingTrigger::shared()).unwrap_err();
        assert_eq!(err, BindingError::MissingParameter("options"));
    }

    #[test]
    fn no_initial_means_no_selection() {
        let group = ExclusiveGroup::new(specs(), None, RecordingTrigger::shared()).unwrap();
        assert_eq!(group.selected(), "");
        assert!(selected_values(&group).is_empty());
    }

    #[test]
    fn initial_selection_is_derived() {
        let group = ExclusiveGroup::new(specs(), Some("b"), RecordingTrigger::shared()).unwrap();
        assert_eq!(selected_values(&group), ["b"]);
    }

    #[test]
    fn select_moves_the_single_flag() {
        let group = ExclusiveGroup::new(specs(), Some("a"), RecordingTrigger::shared()).unwrap();
        group.select("c");
        assert_eq!(group.selected(), "c");
        assert_eq!(selected_values(&group), ["c"]);
    }

    #[test]
    fn exactly_one_selected_after_any_sequence() {
        let group = ExclusiveGroup::new(specs(), None, RecordingTrigger::shared()).unwrap();
        for value in ["a", "c", "b", "b", "a"] {
            group.select(value);
            assert_eq!(selected_values(&group), [value]);
        }
    }

    #[test]
    fn idempotent_select_still_notifies() {
        let trigger = RecordingTrigger::shared();
        let group = ExclusiveGroup::new(specs(), Some("a"), trigger.clone()).unwrap();
        group.select("a");
        group.select("a");
        assert_eq!(trigger.count(), 2);
        assert_eq!(selected_values(&group), ["a"]);
    }

    #[test]
    fn select_unknown_value_clears_all_flags() {
        let group = ExclusiveGroup::new(specs(), Some("a"), RecordingTrigger::shared()).unwrap();
        group.select("zzz");
        assert_eq!(group.selected(), "zzz");
        assert!(selected_values(&group).is_empty());
    }

    #[test]
    fn handles_route_to_their_own_option() {
        let group = ExclusiveGroup::new(specs(), None, RecordingTrigger::shared()).unwrap();
        let options = group.options();
        options[1].handle().activate();
        assert_eq!(group.selected(), "b");
        assert_eq!(selected_values(&group), ["b"]);
    }

    #[test]
    fn option_order_and_labels_are_stable() {
        let group = ExclusiveGroup::new(specs(), None, RecordingTrigger::shared()).unwrap();
        group.select("b");
        group.select("c");
        let options = group.options();
        let values: Vec<&str> = options.iter().map(|o| o.value()).collect();
        let labels: Vec<&str> = options.iter().map(|o| o.label()).collect();
        assert_eq!(values, ["a", "b", "c"]);
        assert_eq!(labels, ["a", "B", "c"]);
    }

    #[test]
    fn snapshot_reaches_the_trigger() {
        let trigger = RecordingTrigger::shared();
        let group = ExclusiveGroup::new(specs(), None, trigger.clone()).unwrap();
        group.select("a");
        let snapshot = trigger.last().unwrap();
        assert_eq!(snapshot["selected"], "a");
        assert_eq!(snapshot["options"][0]["selected"], true);
        assert_eq!(snapshot["options"][1]["selected"], false);
    }
}
