//! Tests for the list controller

use jsonform_core::prelude::Error;
use jsonform_core::{FieldEntry, ListValue};
use jsonform_ui::{UiEvent, UiTree};
use serde_json::{json, Value};

use super::*;
use crate::listeners::Listener;
use crate::renderer::Outcome;
use crate::test_utils::TestForm;

fn list_field(id: &str, field: Value) -> Value {
    json!({"id": id, "name": "Items", "type": "field", "field": field})
}

fn stage(form: &mut TestForm, field: &str, slot: &str, value: &str) {
    let node = form.node(&format!("jsonform-test-{}-new-{}", field, slot));
    form.doc.set_value(node, value);
}

fn add(form: &mut TestForm, entry: &FieldEntry) -> Result<Option<u32>> {
    add_item(&mut form.scope(), entry)
}

fn rows(form: &TestForm, field: &str) -> ListValue {
    form.lists.get(field).map(ListState::values).unwrap_or_default()
}

fn counters(form: &TestForm, field: &str) -> Vec<u32> {
    rows(form, field).entries.iter().map(|e| e.counter).collect()
}

#[test]
fn test_initialize_single_slot_list() {
    let mut form = TestForm::new();
    let entry = form.render(list_field("tags", json!({"type": "list"})));

    let state = form.lists.get("tags").unwrap();
    assert_eq!(state.phase, ListPhase::Ready);
    assert_eq!(state.slot_ids().collect::<Vec<_>>(), vec![SINGLE_SLOT]);
    assert!(state.is_empty());

    let staging = form.node("jsonform-test-tags-new-1");
    assert_eq!(form.doc.tag(staging), Some("input"));
    let slot_wrapper = form.node("jsonform-test-tags-new-1-wrapper");
    assert!(form.doc.has_class(slot_wrapper, "col-md-10"));

    let add_button = form.node("jsonform-test-tags-add");
    assert_eq!(form.doc.text(add_button), "Add");
    assert!(form.doc.has_class(form.doc.parent(add_button).unwrap(), "col-md-2"));
    assert_eq!(
        form.listeners.resolve(&form.doc, &UiEvent::click(add_button)),
        Some(&Listener::ListAdd {
            field: "tags".to_string()
        })
    );

    assert!(form.doc.children(form.node("jsonform-test-tags-items")).is_empty());
    assert_eq!(form.value(&entry), FieldValue::List(ListValue::default()));
}

#[test]
fn test_add_moves_staged_value_into_new_row() {
    let mut form = TestForm::new();
    let entry = form.render(list_field("tags", json!({"type": "list"})));

    stage(&mut form, "tags", "1", "rust");
    assert_eq!(add(&mut form, &entry).unwrap(), Some(1));

    let values = rows(&form, "tags");
    assert_eq!(values.len(), 1);
    assert_eq!(values.get(1).and_then(|e| e.get("1")), Some("rust"));

    // Staging cleared, row rendered with its own cell
    assert_eq!(form.doc.value(form.node("jsonform-test-tags-new-1")).as_deref(), Some(""));
    let cell = form.node("jsonform-test-tags-1-1");
    assert_eq!(form.doc.value(cell).as_deref(), Some("rust"));
    let row = form.node("jsonform-test-tags-item-1");
    assert_eq!(form.doc.attribute(row, "data-counter"), Some("1"));
}

#[test]
fn test_rows_are_prepended_but_values_ascend() {
    let mut form = TestForm::new();
    let entry = form.render(list_field("tags", json!({"type": "list"})));

    for word in ["a", "b", "c"] {
        stage(&mut form, "tags", "1", word);
        add(&mut form, &entry).unwrap();
    }

    let items = form.node("jsonform-test-tags-items");
    let shown: Vec<String> = form
        .doc
        .children(items)
        .iter()
        .map(|row| form.doc.attribute(*row, "data-counter").unwrap_or_default().to_string())
        .collect();
    assert_eq!(shown, vec!["3", "2", "1"]);
    assert_eq!(counters(&form, "tags"), vec![1, 2, 3]);
}

#[test]
fn test_incomplete_staging_is_annotated() {
    let mut form = TestForm::new();
    let entry = form.render(list_field("tags", json!({"type": "list"})));

    assert_eq!(add(&mut form, &entry).unwrap(), None);
    assert!(rows(&form, "tags").is_empty());

    let staging = form.node("jsonform-test-tags-new-1");
    assert!(form.doc.has_class(staging, "is-invalid"));
    let feedback = form.node("jsonform-test-tags-new-1-feedback");
    assert_eq!(form.doc.text(feedback), "Please fill out this field.");
    assert!(form.doc.is_visible(feedback));

    stage(&mut form, "tags", "1", "ok");
    add(&mut form, &entry).unwrap();
    assert!(!form.doc.has_class(staging, "is-invalid"));
}

#[test]
fn test_n_adds_m_removes_leaves_gaps() {
    let mut form = TestForm::new();
    let entry = form.render(list_field("tags", json!({"type": "list"})));

    for i in 0..5 {
        stage(&mut form, "tags", "1", &format!("item {}", i));
        add(&mut form, &entry).unwrap();
    }
    remove_item(&mut form.scope(), "tags", 2).unwrap();
    remove_item(&mut form.scope(), "tags", 4).unwrap();

    assert_eq!(counters(&form, "tags"), vec![1, 3, 5]);
    assert!(form.doc.find_by_id("jsonform-test-tags-item-2").is_none());

    // Counters are never reused
    stage(&mut form, "tags", "1", "again");
    assert_eq!(add(&mut form, &entry).unwrap(), Some(6));

    let err = remove_item(&mut form.scope(), "tags", 2).unwrap_err();
    assert!(matches!(err, Error::ListItemNotFound { counter: 2, .. }));
}

#[test]
fn test_add_then_remove_restores_values() {
    let mut form = TestForm::new();
    let entry = form.render(list_field("tags", json!({"type": "list", "default_value": ["x", "y"]})));
    let before = rows(&form, "tags");
    let listeners_before = form.listeners.len();

    stage(&mut form, "tags", "1", "z");
    let counter = add(&mut form, &entry).unwrap().unwrap();
    remove_item(&mut form.scope(), "tags", counter).unwrap();

    assert_eq!(rows(&form, "tags"), before);
    assert_eq!(form.listeners.len(), listeners_before);
}

#[test]
fn test_maximum_entries_is_enforced() {
    let mut form = TestForm::new();
    let entry = form.render(list_field("tags", json!({"type": "list", "maximum_entries": 2})));

    for word in ["a", "b"] {
        stage(&mut form, "tags", "1", word);
        add(&mut form, &entry).unwrap();
    }
    stage(&mut form, "tags", "1", "c");
    let err = add(&mut form, &entry).unwrap_err();
    assert!(matches!(err, Error::ListLimit { limit: 2 }));
    assert_eq!(err.to_string(), "Maximum of 2 entries reached");
    assert_eq!(rows(&form, "tags").len(), 2);
}

#[test]
fn test_seeding_beyond_maximum_is_truncated() {
    let mut form = TestForm::new();
    form.render(list_field(
        "tags",
        json!({"type": "list", "maximum_entries": 2, "default_value": ["a", "b", "c"]}),
    ));
    assert_eq!(counters(&form, "tags"), vec![1, 2]);
}

#[test]
fn test_composite_list_slots_and_seeding() {
    let mut form = TestForm::new();
    let entry = form.render(list_field(
        "people",
        json!({
            "type": "list",
            "fields": [
                {"id": "first", "name": "First", "type": "field", "field": {"type": "text"}},
                {"id": "age", "name": "Age", "type": "field", "field": {"type": "number"}}
            ],
            "default_value": [{"first": "Ada", "age": 36}, {"first": "Alan"}]
        }),
    ));

    let state = form.lists.get("people").unwrap();
    assert_eq!(state.slot_ids().collect::<Vec<_>>(), vec!["first", "age"]);
    assert!(form
        .doc
        .has_class(form.node("jsonform-test-people-new-first-wrapper"), "col-md-5"));

    let values = rows(&form, "people");
    assert_eq!(values.get(1).and_then(|e| e.get("first")), Some("Ada"));
    assert_eq!(values.get(1).and_then(|e| e.get("age")), Some("36"));
    assert_eq!(values.get(2).and_then(|e| e.get("age")), Some(""));

    assert_eq!(
        form.value(&entry).to_json(),
        json!({"1": {"first": "Ada", "age": "36"}, "2": {"first": "Alan", "age": ""}})
    );
}

#[test]
fn test_composite_add_requires_every_slot() {
    let mut form = TestForm::new();
    let entry = form.render(list_field(
        "people",
        json!({
            "type": "list",
            "fields": [
                {"id": "first", "name": "First", "type": "field", "field": {"type": "text"}},
                {"id": "last", "name": "Last", "type": "field", "field": {"type": "text"}}
            ]
        }),
    ));

    stage(&mut form, "people", "first", "Grace");
    assert_eq!(add(&mut form, &entry).unwrap(), None);
    assert!(form
        .doc
        .has_class(form.node("jsonform-test-people-new-last"), "is-invalid"));

    stage(&mut form, "people", "last", "Hopper");
    assert_eq!(add(&mut form, &entry).unwrap(), Some(1));
}

#[test]
fn test_cell_edits_write_back() {
    let mut form = TestForm::new();
    form.render(list_field("tags", json!({"type": "list", "default_value": ["old"]})));

    let cell = form.node("jsonform-test-tags-1-1");
    assert_eq!(
        form.listeners.resolve(&form.doc, &UiEvent::change(cell)),
        Some(&Listener::ListCell {
            field: "tags".to_string(),
            counter: 1,
            sub: "1".to_string(),
        })
    );

    form.doc.set_value(cell, "new");
    update_cell(&mut form.scope(), "tags", 1, "1").unwrap();
    assert_eq!(rows(&form, "tags").get(1).and_then(|e| e.get("1")), Some("new"));
}

#[test]
fn test_remove_listener_targets_its_row() {
    let mut form = TestForm::new();
    form.render(list_field("tags", json!({"type": "list", "default_value": ["a", "b"]})));

    let remove = form.node("jsonform-test-tags-remove-2");
    assert_eq!(form.doc.text(remove), "Remove");
    assert_eq!(
        form.listeners.resolve(&form.doc, &UiEvent::click(remove)),
        Some(&Listener::ListRemove {
            field: "tags".to_string(),
            counter: 2,
        })
    );
}

#[test]
fn test_readonly_list_disables_controls() {
    let mut form = TestForm::new();
    let entry = form.render(list_field("tags", json!({"type": "list", "readonly": true, "default_value": ["a"]})));

    assert!(form.doc.is_disabled(form.node("jsonform-test-tags-add")));
    let remove = form.node("jsonform-test-tags-remove-1");
    assert!(form.doc.is_disabled(remove));
    assert!(form.listeners.resolve(&form.doc, &UiEvent::click(remove)).is_none());

    assert!(add(&mut form, &entry).is_err());
    assert_eq!(rows(&form, "tags").len(), 1);
}

#[test]
fn test_set_rows_replaces_everything() {
    let mut form = TestForm::new();
    let entry = form.render(list_field("tags", json!({"type": "list", "default_value": ["a", "b"]})));

    set_rows(&mut form.scope(), &entry, &json!(["c"])).unwrap();
    assert_eq!(counters(&form, "tags"), vec![3]);
    assert_eq!(rows(&form, "tags").get(3).and_then(|e| e.get("1")), Some("c"));

    // A previously read value feeds back in
    let snapshot = form.value(&entry).to_json();
    set_rows(&mut form.scope(), &entry, &snapshot).unwrap();
    assert_eq!(rows(&form, "tags").get(4).and_then(|e| e.get("1")), Some("c"));
}

#[test]
fn test_list_subtype_picks_slot_kind() {
    let mut form = TestForm::new();
    form.render(list_field("dates", json!({"type": "list", "subtype": "date"})));
    let state = form.lists.get("dates").unwrap();
    assert_eq!(state.slots[0].kind(), "date");
    assert_eq!(
        form.doc.attribute(form.node("jsonform-test-dates-new-1"), "type"),
        Some("date")
    );
}

#[test]
fn test_nested_list_is_rejected() {
    let mut form = TestForm::new();
    let (_, outcome) = form.render_outcome(list_field(
        "outer",
        json!({
            "type": "list",
            "fields": [{"id": "inner", "name": "Inner", "type": "field", "field": {"type": "list"}}]
        }),
    ));

    assert!(matches!(outcome, Outcome::Skipped { placeholder: Some(_) }));
    assert!(form.lists.get("outer").is_none());
    assert!(form.listeners.is_empty());
}
