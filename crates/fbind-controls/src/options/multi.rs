#![forbid(unsafe_code)]

//! Checkbox-semantics option group: any subset selected.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::{Value, json};

use fbind_reactive::SharedTrigger;

use crate::error::BindingError;
use crate::options::{OptionEntry, OptionHandle, OptionSpec, OptionView};

struct MultiInner {
    entries: RefCell<Vec<OptionEntry>>,
    // Authoritative selected set: distinct values, insertion-ordered.
    selected: RefCell<Vec<String>>,
    trigger: SharedTrigger,
}

impl MultiInner {
    fn toggle(&self, value: &str) {
        {
            let known = self.entries.borrow().iter().any(|e| e.value == value);
            let mut selected = self.selected.borrow_mut();
            if let Some(position) = selected.iter().position(|v| v == value) {
                selected.remove(position);
            } else if known {
                selected.push(value.to_string());
            }
            // An unknown value changes nothing but still notifies below.
        }
        self.recompute_flags();
        tracing::debug!(value, "multi group toggle");
        self.notify();
    }

    fn select_all(&self, checked: bool) {
        // One atomic transition: the selected set is rebuilt wholesale, not
        // toggled option by option.
        {
            let entries = self.entries.borrow();
            let mut selected = self.selected.borrow_mut();
            selected.clear();
            if checked {
                selected.extend(entries.iter().map(|e| e.value.clone()));
            }
        }
        for entry in self.entries.borrow_mut().iter_mut() {
            entry.selected = checked;
        }
        tracing::debug!(checked, "multi group select_all");
        self.notify();
    }

    fn recompute_flags(&self) {
        let selected = self.selected.borrow();
        for entry in self.entries.borrow_mut().iter_mut() {
            entry.selected = selected.iter().any(|v| v == &entry.value);
        }
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

/// A checkbox-style group: an ordered duplicate-free selected set plus a
/// construction-time option list.
///
/// # Invariants
///
/// 1. The option list is populated exactly once, here; later calls never
///    re-populate or reorder it.
/// 2. The selected set never contains duplicates — toggling the same value
///    twice in succession restores the previous set exactly.
/// 3. `select_all` is a single bulk transition with a single notification,
///    never expressed as N toggles.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use fbind_controls::{MultiGroup, OptionSpec};
/// use fbind_reactive::NullTrigger;
///
/// let group = MultiGroup::new(
///     vec![OptionSpec::new("a"), OptionSpec::new("b").label("B")],
///     &["a".to_string()],
///     Rc::new(NullTrigger),
/// )
/// .unwrap();
///
/// group.toggle("b");
/// assert_eq!(group.selected(), ["a", "b"]);
///
/// group.select_all(false);
/// assert!(group.selected().is_empty());
/// ```
pub struct MultiGroup {
    inner: Rc<MultiInner>,
    handles: Vec<OptionHandle>,
}

impl std::fmt::Debug for MultiGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiGroup")
            .field("selected", &self.inner.selected.borrow())
            .field("options", &self.inner.entries.borrow().len())
            .finish()
    }
}

impl MultiGroup {
    /// Build the group, populating the option list exactly once.
    ///
    /// `initial_checked` seeds the selected set; it is deduplicated and
    /// filtered to known option values, kept in option order. An empty
    /// `specs` list fails fast with [`BindingError::MissingParameter`].
    pub fn new(
        specs: Vec<OptionSpec>,
        initial_checked: &[String],
        trigger: SharedTrigger,
    ) -> Result<Self, BindingError> {
        if specs.is_empty() {
            return Err(BindingError::MissingParameter("options"));
        }
        let entries: Vec<OptionEntry> = specs
            .into_iter()
            .map(|spec| {
                let is_checked = initial_checked.contains(&spec.value);
                spec.into_entry(is_checked)
            })
            .collect();
        let selected: Vec<String> = entries
            .iter()
            .filter(|e| e.selected)
            .map(|e| e.value.clone())
            .collect();

        let inner = Rc::new(MultiInner {
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
                OptionHandle::new(move || owner.toggle(&value))
            })
            .collect();

        Ok(Self { inner, handles })
    }

    /// Flip membership of `value` in the selected set, then request a
    /// render. Never creates duplicates; a value not in the option list
    /// changes nothing (the render is still requested).
    pub fn toggle(&self, value: &str) {
        self.inner.toggle(value);
    }

    /// Set every option's flag to `checked` in one atomic transition:
    /// `true` selects exactly the full option-value list in option order,
    /// `false` empties the selected set. One notification total.
    pub fn select_all(&self, checked: bool) {
        self.inner.select_all(checked);
    }

    /// The authoritative selected values: distinct, insertion-ordered.
    #[must_use]
    pub fn selected(&self) -> Vec<String> {
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
