//! End-to-end tests driving the engine through host events
//!
//! Each test builds a page, attaches an engine and talks to it the way a host
//! would: create forms, forward clicks and changes, observe submit callbacks.

use std::cell::RefCell;
use std::rc::Rc;

use jsonform::{
    Document, EngineSettings, Error, FormData, FormDescriptor, FormEngine, UiEvent, UiTree,
    DEFAULT_KEY,
};
use serde_json::{json, Value};

type Submissions = Rc<RefCell<Vec<(bool, Option<FormData>)>>>;

fn page() -> Document {
    let mut doc = Document::new();
    doc.append_container("host");
    doc
}

fn engine(doc: &mut Document) -> FormEngine {
    FormEngine::init(doc, EngineSettings::default()).unwrap()
}

fn record(engine: &mut FormEngine, key: &str) -> Submissions {
    let seen: Submissions = Rc::default();
    let sink = Rc::clone(&seen);
    engine.register_submit(key, move |valid, data| sink.borrow_mut().push((valid, data)));
    seen
}

fn descriptor(value: Value) -> FormDescriptor {
    FormDescriptor::from_value(value).unwrap()
}

fn id(doc: &Document, id: &str) -> jsonform::NodeId {
    doc.find_by_id(id).unwrap_or_else(|| panic!("no element #{}", id))
}

fn click(engine: &mut FormEngine, doc: &mut Document, element: &str) -> bool {
    let node = id(doc, element);
    engine.handle_event(doc, UiEvent::click(node))
}

fn name_form() -> FormDescriptor {
    descriptor(json!({"fields": [
        {"id": "name", "name": "Name", "type": "field", "field": {"type": "text"}}
    ]}))
}

// ─────────────────────────────────────────────────────────────────
// Submission
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_submit_valid_form_passes_data() {
    let mut doc = page();
    let mut engine = engine(&mut doc);
    let seen = record(&mut engine, DEFAULT_KEY);
    engine.create(&mut doc, "host", &name_form(), DEFAULT_KEY).unwrap();

    let input = id(&doc, "jsonform-default-name");
    doc.set_value(input, "Ada");
    assert!(click(&mut engine, &mut doc, "jsonform-default-submit"));

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    let (valid, data) = &seen[0];
    assert!(*valid);
    assert_eq!(data.clone().map(Value::Object), Some(json!({"name": "Ada"})));
}

#[test]
fn test_submit_empty_required_field_is_flagged() {
    let mut doc = page();
    let mut engine = engine(&mut doc);
    let seen = record(&mut engine, DEFAULT_KEY);
    engine.create(&mut doc, "host", &name_form(), DEFAULT_KEY).unwrap();

    let form = id(&doc, "jsonform-default");
    assert!(engine.handle_event(&mut doc, UiEvent::submit(form)));

    assert_eq!(*seen.borrow(), vec![(false, None)]);
    let input = id(&doc, "jsonform-default-name");
    assert!(doc.has_class(input, "is-invalid"));
    assert_eq!(
        doc.text(id(&doc, "jsonform-default-name-feedback")),
        "Please fill out this field."
    );
}

#[test]
fn test_every_field_is_submitted_once() {
    let mut doc = page();
    let mut engine = engine(&mut doc);
    let seen = record(&mut engine, "signup");
    engine
        .create(
            &mut doc,
            "host",
            &descriptor(json!({"fields": [
                {"id": "email", "name": "Email", "type": "field", "field": {"type": "email"}},
                {"id": "letter", "name": "Letter", "type": "field",
                 "field": {"type": "select", "options": {"a": "Alpha", "b": "Beta"}, "default_value": "b"}},
                {"id": "terms", "name": "Terms", "type": "field", "field": {"type": "checkbox"}},
                {"id": "origin", "name": "", "type": "value", "value": "landing"},
                {"id": "note", "name": "", "type": "html", "html": "<hr>"}
            ]})),
            "signup",
        )
        .unwrap();

    doc.set_value(id(&doc, "jsonform-signup-email"), "ada@example.com");
    let terms = id(&doc, "jsonform-signup-terms");
    doc.set_checked(terms, true);
    assert!(engine.submit_form(&mut doc, "signup").unwrap());

    let (valid, data) = seen.borrow()[0].clone();
    assert!(valid);
    assert_eq!(
        Value::Object(data.unwrap()),
        json!({"email": "ada@example.com", "letter": "b", "terms": true, "origin": "landing"})
    );
}

#[test]
fn test_empty_hidden_field_does_not_block_submit() {
    let mut doc = page();
    let mut engine = engine(&mut doc);
    let seen = record(&mut engine, DEFAULT_KEY);
    let form = descriptor(json!({"fields": [
        {"id": "name", "name": "Name", "type": "field", "field": {"type": "text"}},
        {"id": "token", "name": "Token", "type": "field", "field": {"type": "hidden"}}
    ]}));
    engine.create(&mut doc, "host", &form, DEFAULT_KEY).unwrap();

    doc.set_value(id(&doc, "jsonform-default-name"), "Ada");
    assert!(click(&mut engine, &mut doc, "jsonform-default-submit"));

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    let (valid, data) = &seen[0];
    assert!(*valid);
    assert_eq!(
        data.clone().map(Value::Object),
        Some(json!({"name": "Ada", "token": null}))
    );
}

#[test]
fn test_submit_without_handler_is_harmless() {
    let mut doc = page();
    let mut engine = engine(&mut doc);
    engine.create(&mut doc, "host", &name_form(), "quiet").unwrap();
    doc.set_value(id(&doc, "jsonform-quiet-name"), "x");
    assert!(engine.submit_form(&mut doc, "quiet").unwrap());
}

#[test]
fn test_handler_registered_after_create_replaces_default() {
    let mut doc = page();
    let mut engine = engine(&mut doc);
    engine.create(&mut doc, "host", &name_form(), DEFAULT_KEY).unwrap();
    let seen = record(&mut engine, DEFAULT_KEY);

    assert!(!engine.submit_form(&mut doc, DEFAULT_KEY).unwrap());
    assert_eq!(seen.borrow().len(), 1);
}

// ─────────────────────────────────────────────────────────────────
// Rendering
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_one_subtree_per_recognised_entry() {
    let mut doc = page();
    let mut engine = engine(&mut doc);
    engine
        .create(
            &mut doc,
            "host",
            &descriptor(json!({"fields": [
                {"id": "a", "name": "A", "type": "field", "field": {"type": "text"}},
                {"id": "b", "name": "B", "type": "field", "field": {"type": "stars"}},
                {"id": "c", "name": "C", "type": "field", "field": {"type": "textarea"}},
                {"id": "d", "name": "D", "type": "html", "html": "<p>d</p>"}
            ]})),
            DEFAULT_KEY,
        )
        .unwrap();

    let body = id(&doc, "jsonform-default-body");
    let rendered: Vec<String> = doc
        .children(body)
        .into_iter()
        .filter_map(|n| doc.attribute(n, "id").map(str::to_string))
        .collect();
    assert_eq!(
        rendered,
        vec![
            "jsonform-default-a-wrapper",
            "jsonform-default-c-wrapper",
            "jsonform-default-d-wrapper"
        ]
    );
    assert_eq!(engine.instance(DEFAULT_KEY).unwrap().fields().len(), 3);
}

#[test]
fn test_select_default_is_preselected() {
    let mut doc = page();
    let mut engine = engine(&mut doc);
    engine
        .create(
            &mut doc,
            "host",
            &descriptor(json!({"fields": [
                {"id": "letter", "name": "Letter", "type": "field",
                 "field": {"type": "select", "options": {"a": "Alpha", "b": "Beta"}, "default_value": "b"}}
            ]})),
            DEFAULT_KEY,
        )
        .unwrap();

    let select = id(&doc, "jsonform-default-letter");
    let selected: Vec<String> = doc
        .children(select)
        .into_iter()
        .filter(|o| doc.is_checked(*o))
        .map(|o| doc.text(o))
        .collect();
    assert_eq!(selected, vec!["Beta"]);
    assert_eq!(
        engine.values(&doc, DEFAULT_KEY).unwrap().get("letter"),
        Some(&json!("b"))
    );
}

// ─────────────────────────────────────────────────────────────────
// Lists
// ─────────────────────────────────────────────────────────────────

fn list_form(doc: &mut Document, engine: &mut FormEngine) {
    engine
        .create(
            doc,
            "host",
            &descriptor(json!({"fields": [
                {"id": "tags", "name": "Tags", "type": "field", "field": {"type": "list"}}
            ]})),
            DEFAULT_KEY,
        )
        .unwrap();
}

fn add_tag(engine: &mut FormEngine, doc: &mut Document, tag: &str) {
    doc.set_value(id(doc, "jsonform-default-tags-new-1"), tag);
    assert!(click(engine, doc, "jsonform-default-tags-add"));
}

fn tags(engine: &FormEngine, doc: &Document) -> Value {
    engine.values(doc, DEFAULT_KEY).unwrap()["tags"].clone()
}

#[test]
fn test_list_adds_and_removes() {
    let mut doc = page();
    let mut engine = engine(&mut doc);
    list_form(&mut doc, &mut engine);

    for tag in ["a", "b", "c", "d", "e"] {
        add_tag(&mut engine, &mut doc, tag);
    }
    assert!(click(&mut engine, &mut doc, "jsonform-default-tags-remove-2"));
    assert!(click(&mut engine, &mut doc, "jsonform-default-tags-remove-4"));

    let value = tags(&engine, &doc);
    let counters: Vec<&String> = value.as_object().unwrap().keys().collect();
    assert_eq!(counters, vec!["1", "3", "5"]);
    assert_eq!(value["3"], json!({"1": "c"}));

    // Counters keep increasing past removed rows
    add_tag(&mut engine, &mut doc, "f");
    assert!(tags(&engine, &doc).get("6").is_some());
}

#[test]
fn test_list_add_then_remove_restores_values() {
    let mut doc = page();
    let mut engine = engine(&mut doc);
    list_form(&mut doc, &mut engine);
    add_tag(&mut engine, &mut doc, "keep");
    let before = tags(&engine, &doc);

    add_tag(&mut engine, &mut doc, "drop");
    assert_ne!(tags(&engine, &doc), before);
    assert!(click(&mut engine, &mut doc, "jsonform-default-tags-remove-2"));
    assert_eq!(tags(&engine, &doc), before);
}

#[test]
fn test_empty_required_list_blocks_submit() {
    let mut doc = page();
    let mut engine = engine(&mut doc);
    let seen = record(&mut engine, DEFAULT_KEY);
    list_form(&mut doc, &mut engine);

    assert!(!engine.submit_form(&mut doc, DEFAULT_KEY).unwrap());
    add_tag(&mut engine, &mut doc, "one");
    assert!(engine.submit_form(&mut doc, DEFAULT_KEY).unwrap());
    assert_eq!(seen.borrow()[0], (false, None));
    assert!(seen.borrow()[1].0);
}

// ─────────────────────────────────────────────────────────────────
// Instances
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_duplicate_key_is_rejected_and_original_kept() {
    let mut doc = page();
    let mut engine = engine(&mut doc);
    engine.create(&mut doc, "host", &name_form(), "k").unwrap();
    doc.set_value(id(&doc, "jsonform-k-name"), "Ada");
    let host = id(&doc, "host");

    let err = engine.create(&mut doc, "host", &name_form(), "k").unwrap_err();
    assert!(matches!(err, Error::DuplicateInstance { .. }));
    assert_eq!(doc.children(host).len(), 1);
    assert_eq!(
        engine.values(&doc, "k").unwrap().get("name"),
        Some(&json!("Ada"))
    );
}

#[test]
fn test_forms_are_independent() {
    let mut doc = page();
    let mut engine = engine(&mut doc);
    let first = record(&mut engine, "first");
    let second = record(&mut engine, "second");
    engine.create(&mut doc, "host", &name_form(), "first").unwrap();
    engine.create(&mut doc, "host", &name_form(), "second").unwrap();
    assert_eq!(engine.form_keys(), vec!["first", "second"]);

    doc.set_value(id(&doc, "jsonform-second-name"), "Grace");
    assert!(click(&mut engine, &mut doc, "jsonform-second-submit"));

    assert!(first.borrow().is_empty());
    assert_eq!(second.borrow().len(), 1);
    assert!(!doc.has_class(id(&doc, "jsonform-first-name"), "is-invalid"));
}

#[test]
fn test_missing_container_is_a_config_error() {
    let mut doc = page();
    let mut engine = engine(&mut doc);
    let err = engine.create(&mut doc, "absent", &name_form(), "k").unwrap_err();
    assert!(err.is_config_error());
    assert!(engine.instance("k").is_none());
}

#[test]
fn test_create_from_json_text() {
    let mut doc = page();
    let mut engine = engine(&mut doc);
    engine
        .create_from_json(
            &mut doc,
            "host",
            r#"{"fields": [{"id": "q", "name": "Q", "type": "field", "field": {"type": "text"}}]}"#,
            "k",
        )
        .unwrap();
    assert!(doc.find_by_id("jsonform-k-q").is_some());

    assert!(engine.create_from_json(&mut doc, "host", "{not json", "bad").is_err());
}

#[test]
fn test_set_values_prepopulates() {
    let mut doc = page();
    let mut engine = engine(&mut doc);
    engine.create(&mut doc, "host", &name_form(), "k").unwrap();
    engine.set_state(&mut doc, "k", jsonform::FormPhase::Loading).unwrap();

    let values = json!({"name": "Preset"});
    engine
        .set_values(&mut doc, "k", values.as_object().unwrap())
        .unwrap();
    engine.set_state(&mut doc, "k", jsonform::FormPhase::Ready).unwrap();

    assert_eq!(engine.values(&doc, "k").unwrap().get("name"), Some(&json!("Preset")));
    assert!(engine.set_value(&mut doc, "missing", "name", &json!("x")).is_err());
}

#[test]
fn test_cancel_button_resets() {
    let mut doc = page();
    let mut engine = engine(&mut doc);
    engine
        .create(
            &mut doc,
            "host",
            &descriptor(json!({
                "fields": [{"id": "city", "name": "City", "type": "field", "field": {"type": "text", "default_value": "Oslo"}}],
                "cancel_button_text": "Reset"
            })),
            "k",
        )
        .unwrap();

    doc.set_value(id(&doc, "jsonform-k-city"), "Bergen");
    assert!(click(&mut engine, &mut doc, "jsonform-k-cancel"));
    assert_eq!(engine.values(&doc, "k").unwrap().get("city"), Some(&json!("Oslo")));
}

#[test]
fn test_unrelated_events_are_not_consumed() {
    let mut doc = page();
    let mut engine = engine(&mut doc);
    engine.create(&mut doc, "host", &name_form(), "k").unwrap();
    let host = id(&doc, "host");
    assert!(!engine.handle_event(&mut doc, UiEvent::click(host)));
}

// ─────────────────────────────────────────────────────────────────
// Page guard
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_one_engine_per_page() {
    let mut doc = page();
    let engine = engine(&mut doc);
    let second = FormEngine::init(&mut doc, EngineSettings::default());
    assert!(matches!(second, Err(Error::AlreadyInitialized)));

    // Another page is fine
    let mut other = page();
    assert!(FormEngine::init(&mut other, EngineSettings::default()).is_ok());

    engine.shutdown(&mut doc);
    assert!(FormEngine::init(&mut doc, EngineSettings::default()).is_ok());
}

#[test]
fn test_shutdown_destroys_forms() {
    let mut doc = page();
    let mut engine = engine(&mut doc);
    engine.create(&mut doc, "host", &name_form(), "a").unwrap();
    engine.create(&mut doc, "host", &name_form(), "b").unwrap();
    engine.shutdown(&mut doc);

    let host = id(&doc, "host");
    assert!(doc.children(host).is_empty());
    assert_eq!(doc.attribute(doc.root(), "data-jsonform-engine"), None);
}

// ─────────────────────────────────────────────────────────────────
// Settings
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_project_settings_drive_rendering() {
    let temp = tempfile::tempdir().unwrap();
    let mut settings = EngineSettings::default();
    settings.engine.debug = true;
    settings.engine.theme = "plain".to_string();
    settings.controls.submit_text = "Send".to_string();
    jsonform::save_settings(temp.path(), &settings).unwrap();

    let mut doc = page();
    let mut engine = jsonform::attach_with_project(&mut doc, temp.path()).unwrap();
    assert_eq!(engine.settings(), &settings);

    engine
        .create(
            &mut doc,
            "host",
            &descriptor(json!({"fields": [
                {"id": "stars", "name": "Stars", "type": "field", "field": {"type": "rating"}}
            ]})),
            "k",
        )
        .unwrap();

    let body = id(&doc, "jsonform-k-body");
    let placeholder = doc.children(body)[0];
    assert!(doc.text(placeholder).contains("Unknown field: stars (rating)."));
    assert_eq!(doc.text(id(&doc, "jsonform-k-submit")), "Send");
    assert!(!doc.has_class(id(&doc, "jsonform-k-submit"), "btn"));
}
