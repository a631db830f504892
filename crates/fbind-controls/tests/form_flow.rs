//! End-to-end binding flows: a form tree shared by several bindings, option
//! groups driving renders, and a dialog layered on the overlay stack.

use std::cell::RefCell;
use std::rc::Rc;

use fbind_controls::{
    ChangeEvent, DialogBinding, DialogOutcome, DialogSpec, ExclusiveGroup, FieldBinding,
    MultiGroup, OptionSpec, OverlayEntry, OverlayStack,
};
use fbind_reactive::{BindingScope, RecordingTrigger, TreeStore};
use serde_json::json;

#[test]
fn two_bindings_share_one_tree_without_losing_siblings() {
    let trigger = RecordingTrigger::shared();
    let store = TreeStore::new(json!({"profile": {"name": "", "email": ""}}));

    let name = FieldBinding::path(store.clone(), "profile.name", trigger.clone()).unwrap();
    let email = FieldBinding::path(store.clone(), "profile.email", trigger.clone()).unwrap();

    name.control().on_change(&ChangeEvent::new("ada"));
    email.control().on_change(&ChangeEvent::new("ada@lovelace.dev"));

    assert_eq!(
        store.snapshot(),
        json!({"profile": {"name": "ada", "email": "ada@lovelace.dev"}})
    );
    // One render request per keystroke, each carrying the full tree.
    assert_eq!(trigger.count(), 2);
    assert_eq!(
        trigger.last(),
        Some(json!({"profile": {"name": "ada", "email": "ada@lovelace.dev"}}))
    );
}

#[test]
fn reset_after_other_bindings_wrote_restores_only_this_field() {
    let trigger = RecordingTrigger::shared();
    let store = TreeStore::new(json!({"form": {"a": "one", "b": "two"}}));

    let a = FieldBinding::path(store.clone(), "form.a", trigger.clone()).unwrap();
    let b = FieldBinding::path(store.clone(), "form.b", trigger.clone()).unwrap();

    a.controller().set_value("changed-a");
    b.controller().set_value("changed-b");
    a.controller().reset();

    assert_eq!(
        store.snapshot(),
        json!({"form": {"a": "one", "b": "changed-b"}})
    );
}

#[test]
fn binding_to_a_missing_field_materializes_it_on_write() {
    let trigger = RecordingTrigger::shared();
    let store = TreeStore::new(json!({}));

    let binding = FieldBinding::path(store.clone(), "draft.body", trigger.clone()).unwrap();
    assert_eq!(binding.control().value(), serde_json::Value::Null);

    binding.controller().set_value("text");
    assert_eq!(store.snapshot(), json!({"draft": {"body": "text"}}));
}

#[test]
fn unmounting_a_control_scope_detaches_its_store_wiring() {
    let trigger = RecordingTrigger::shared();
    let store = TreeStore::new(json!({"form": {"city": ""}}));
    let binding = FieldBinding::path(store.clone(), "form.city", trigger.clone()).unwrap();

    let observed = Rc::new(RefCell::new(Vec::new()));
    let mut scope = BindingScope::new();
    let sink = Rc::clone(&observed);
    scope.watch_store(&store, move |root| sink.borrow_mut().push(root.clone()));

    binding.controller().set_value("Paris");
    assert_eq!(observed.borrow().len(), 1);

    // Unmount: the scope drops, the binding's writes still work but no
    // longer reach the control's subscription.
    drop(scope);
    binding.controller().set_value("Lyon");
    assert_eq!(observed.borrow().len(), 1);
    assert_eq!(store.snapshot(), json!({"form": {"city": "Lyon"}}));
}

#[test]
fn radio_and_checkbox_groups_drive_renders_independently() {
    let trigger = RecordingTrigger::shared();

    let sizes = ExclusiveGroup::new(
        vec![OptionSpec::new("s"), OptionSpec::new("m"), OptionSpec::new("l")],
        Some("m"),
        trigger.clone(),
    )
    .unwrap();

    let toppings = MultiGroup::new(
        vec![OptionSpec::new("olives"), OptionSpec::new("basil").label("Basil")],
        &["olives".to_string()],
        trigger.clone(),
    )
    .unwrap();

    sizes.select("l");
    toppings.toggle("basil");
    toppings.select_all(false);

    assert_eq!(sizes.selected(), "l");
    assert!(toppings.selected().is_empty());
    assert_eq!(trigger.count(), 3);
}

#[test]
fn option_handles_work_from_cloned_views() {
    let trigger = RecordingTrigger::shared();
    let group = ExclusiveGroup::new(
        vec![OptionSpec::new("yes"), OptionSpec::new("no")],
        None,
        trigger.clone(),
    )
    .unwrap();

    // A host renders the views, then the user clicks one of them.
    let rendered: Vec<_> = group.options();
    let clicked = rendered[0].handle().clone();
    drop(rendered);

    clicked.activate();
    assert_eq!(group.selected(), "yes");
}

#[test]
fn confirm_dialog_over_the_overlay_stack_completes_once() {
    let mut overlays = OverlayStack::new();
    let outcomes = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&outcomes);
    let dialog = Rc::new(DialogBinding::new(
        DialogSpec::new("Discard draft?", "Unsaved changes will be lost."),
        move |outcome| sink.borrow_mut().push(outcome),
    ));

    let layer = overlays.push(
        OverlayEntry::new("confirm-discard").with_payload(json!({"title": "Discard draft?"})),
    );
    assert!(overlays.is_top(0));

    // The user confirms; the coordinator closes the layer.
    dialog.confirm();
    overlays.remove_id(layer);

    // A late forced dismissal (host unmount) must not refire the callback.
    dialog.force_dismiss();

    assert!(overlays.is_empty());
    assert_eq!(*outcomes.borrow(), [DialogOutcome::Confirmed]);
}

#[test]
fn stacked_dialogs_only_top_layer_visible() {
    let mut overlays = OverlayStack::new();
    overlays.push(OverlayEntry::new("settings"));
    let confirm = overlays.push(OverlayEntry::new("confirm"));

    assert!(overlays.is_top(1));
    assert!(!overlays.is_top(0));
    assert_eq!(overlays.top_id(), Some(confirm));

    overlays.pop();
    assert!(overlays.is_top(0));
    assert_eq!(overlays.top().map(|e| e.label().to_string()).as_deref(), Some("settings"));
}
