//! Validation engine: per-field checks and their annotations.
//!
//! Precedence per field:
//! 1. read-only fields, and hidden inputs, are always valid
//! 2. the value is read through the field's kind
//! 3. a required field with a falsy value fails with its category message
//! 4. otherwise the kind's own validator decides
//! 5. a failure marks the control invalid and shows the message; a pass is
//!    left neutral under `hide_validation`, or marked valid otherwise
//!
//! A validation failure is not an [`Error`](jsonform_core::Error); it only
//! annotates the field and flips the submit flag.

use serde::{Deserialize, Serialize};

use jsonform_core::{FieldEntry, FieldValue};
use jsonform_ui::{Theme, UiTree};

use crate::config::ValidationMessages;
use crate::field_kind::{FieldKind, ReadScope};

/// Which message a required-but-empty field shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageCategory {
    /// "Please fill out this field."
    Text,
    /// "Please select an option."
    Choice,
    /// "Please check this box."
    Check,
    /// "Please upload a file."
    File,
    /// "Please add at least one entry."
    List,
}

/// Outcome of validating one field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Verdict {
    pub valid: bool,
    pub message: String,
}

impl Verdict {
    pub fn valid() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }
}

/// Validate one field without touching the UI
pub fn check_field(
    kind: &dyn FieldKind,
    scope: &ReadScope<'_>,
    entry: &FieldEntry,
    messages: &ValidationMessages,
) -> Verdict {
    let Some(spec) = entry.spec() else {
        return Verdict::valid();
    };
    if spec.readonly {
        return Verdict::valid();
    }

    let value = kind.value(scope, entry);
    check_value(kind, scope, entry, &value, messages)
}

/// Validate an already-read value
pub fn check_value(
    kind: &dyn FieldKind,
    scope: &ReadScope<'_>,
    entry: &FieldEntry,
    value: &FieldValue,
    messages: &ValidationMessages,
) -> Verdict {
    if kind.barred_from_validation() {
        return Verdict::valid();
    }
    if value.is_falsy() {
        if entry.is_required() {
            return Verdict::invalid(messages.get(kind.empty_message()));
        }
        // Nothing to check on an optional empty field
        return Verdict::valid();
    }

    kind.validate(scope, entry, value)
        .unwrap_or_else(Verdict::valid)
}

/// Show a verdict on a field's control and feedback element
///
/// With `hide_validation` a passing field is left neutral; otherwise it gets
/// the theme's positive classes.
pub fn annotate(tree: &mut dyn UiTree, theme: &Theme, control_id: &str, verdict: &Verdict, hide_validation: bool) {
    clear_annotation(tree, theme, control_id);

    let control = tree.find_by_id(control_id);
    let feedback = tree.find_by_id(&format!("{}-feedback", control_id));

    if !verdict.valid {
        if let Some(control) = control {
            add_classes(tree, control, &theme.field.invalid);
        }
        if let Some(feedback) = feedback {
            add_classes(tree, feedback, &theme.feedback.invalid);
            tree.set_text(feedback, &verdict.message);
            tree.set_visible(feedback, true);
        }
        return;
    }

    if hide_validation {
        return;
    }
    if let Some(control) = control {
        add_classes(tree, control, &theme.field.valid);
    }
    if let Some(feedback) = feedback {
        add_classes(tree, feedback, &theme.feedback.valid);
        tree.set_text(feedback, &verdict.message);
        tree.set_visible(feedback, !verdict.message.is_empty());
    }
}

/// Return a field to the neutral state
pub fn clear_annotation(tree: &mut dyn UiTree, theme: &Theme, control_id: &str) {
    if let Some(control) = tree.find_by_id(control_id) {
        remove_classes(tree, control, &theme.field.valid);
        remove_classes(tree, control, &theme.field.invalid);
    }
    if let Some(feedback) = tree.find_by_id(&format!("{}-feedback", control_id)) {
        remove_classes(tree, feedback, &theme.feedback.valid);
        remove_classes(tree, feedback, &theme.feedback.invalid);
        tree.set_text(feedback, "");
        tree.set_visible(feedback, false);
    }
}

fn add_classes(tree: &mut dyn UiTree, node: jsonform_ui::NodeId, classes: &str) {
    if !classes.trim().is_empty() {
        tree.add_class(node, classes);
    }
}

fn remove_classes(tree: &mut dyn UiTree, node: jsonform_ui::NodeId, classes: &str) {
    if !classes.trim().is_empty() {
        tree.remove_class(node, classes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_kind::{CustomField, ListenTarget, Rendered};
    use crate::list::ListStore;
    use jsonform_core::pad_field;
    use jsonform_ui::theme::builtin;
    use jsonform_ui::{Document, UiTreeExt};
    use serde_json::json;

    fn fixed(value: FieldValue) -> CustomField {
        CustomField::new(
            |scope, _| Ok(Rendered::new(scope.tree.create_element("div"), ListenTarget::None)),
            move |_, _| value.clone(),
        )
    }

    fn entry(field: serde_json::Value) -> FieldEntry {
        pad_field(&json!({"id": "f", "name": "F", "type": "field", "field": field})).unwrap()
    }

    #[test]
    fn test_required_empty_uses_category_message() {
        let doc = Document::new();
        let lists = ListStore::default();
        let scope = ReadScope { tree: &doc, form_id: "jsonform-default", lists: &lists };
        let kind = fixed(FieldValue::text("")).with_empty_message(MessageCategory::Check);

        let verdict = check_field(&kind, &scope, &entry(json!({"type": "x"})), &ValidationMessages::default());
        assert_eq!(verdict, Verdict::invalid("Please check this box."));
    }

    #[test]
    fn test_optional_empty_and_readonly_are_valid() {
        let doc = Document::new();
        let lists = ListStore::default();
        let scope = ReadScope { tree: &doc, form_id: "jsonform-default", lists: &lists };
        let kind = fixed(FieldValue::Empty);
        let messages = ValidationMessages::default();

        assert!(check_field(&kind, &scope, &entry(json!({"type": "x", "required": false})), &messages).valid);
        assert!(check_field(&kind, &scope, &entry(json!({"type": "x", "readonly": true})), &messages).valid);
    }

    #[test]
    fn test_kind_validator_runs_on_non_empty_values() {
        let doc = Document::new();
        let lists = ListStore::default();
        let scope = ReadScope { tree: &doc, form_id: "jsonform-default", lists: &lists };
        let kind = fixed(FieldValue::text("abc")).on_validate(|_, _, value| {
            (value.as_text() == Some("abc")).then(|| Verdict::invalid("No alphabet soup"))
        });

        let verdict = check_field(&kind, &scope, &entry(json!({"type": "x"})), &ValidationMessages::default());
        assert_eq!(verdict.message, "No alphabet soup");
    }

    #[test]
    fn test_annotate_and_clear() {
        let theme = builtin::bootstrap4();
        let mut doc = Document::new();
        let root = doc.root();
        let input = doc.append_element(root, "input", Some("f-name")).unwrap();
        let feedback = doc.append_element(root, "div", Some("f-name-feedback")).unwrap();

        annotate(&mut doc, &theme, "f-name", &Verdict::invalid("Please fill out this field."), true);
        assert!(doc.has_class(input, "is-invalid"));
        assert!(doc.has_class(feedback, "invalid-feedback"));
        assert_eq!(doc.text(feedback), "Please fill out this field.");

        annotate(&mut doc, &theme, "f-name", &Verdict::valid(), true);
        assert!(!doc.has_class(input, "is-invalid"));
        assert!(!doc.has_class(input, "is-valid"));

        annotate(&mut doc, &theme, "f-name", &Verdict::valid(), false);
        assert!(doc.has_class(input, "is-valid"));

        clear_annotation(&mut doc, &theme, "f-name");
        assert!(!doc.has_class(input, "is-valid"));
        assert!(!doc.is_visible(feedback));
    }
}
