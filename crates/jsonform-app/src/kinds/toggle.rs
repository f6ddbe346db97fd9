//! Boolean toggles: `checkbox` and `switch`

use jsonform_core::prelude::*;
use jsonform_core::{FieldEntry, FieldValue};
use jsonform_ui::UiTreeExt;
use serde_json::Value;

use super::{decorate_control, finish, is_checked_value, require_spec};
use crate::field_kind::{FieldKind, FieldScope, ListenTarget, ReadScope, Rendered};
use crate::validation::MessageCategory;

/// A checkbox; the value is its checked state
#[derive(Debug, Clone, Copy)]
pub struct ToggleKind {
    switch: bool,
}

impl ToggleKind {
    pub fn checkbox() -> Self {
        Self { switch: false }
    }

    /// Same control, styled as a switch
    pub fn switch() -> Self {
        Self { switch: true }
    }
}

impl FieldKind for ToggleKind {
    fn create(&self, scope: &mut FieldScope<'_>, entry: &FieldEntry) -> Result<Rendered> {
        let spec = require_spec(entry)?;
        let theme = scope.theme;
        let control_id = scope.control_id(&entry.id);

        let root = super::wrapper(scope, entry);
        let check = scope.tree.append_element(root, "div", None)?;
        let wrapper_class = if self.switch {
            &theme.field.switch_wrapper
        } else {
            &theme.field.check_wrapper
        };
        scope.tree.add_classes(check, wrapper_class);

        let input = scope.tree.append_element(check, "input", None)?;
        scope.tree.set_attribute(input, "type", "checkbox");
        decorate_control(scope, input, entry, spec, &theme.field.check_input);
        if is_checked_value(&spec.default_value) {
            scope.tree.set_checked(input, true);
        }

        let label = scope.tree.append_element(check, "label", None)?;
        scope.tree.set_attribute(label, "for", &control_id);
        scope.tree.add_classes(label, &theme.field.check_label);
        scope.tree.set_text(label, &entry.name);

        finish(scope, root, entry, spec)?;
        Ok(Rendered::new(root, ListenTarget::Node(input)))
    }

    fn value(&self, scope: &ReadScope<'_>, entry: &FieldEntry) -> FieldValue {
        match scope.control(&entry.id) {
            Some(node) => FieldValue::Bool(scope.tree.is_checked(node)),
            None => FieldValue::Empty,
        }
    }

    fn set_value(&self, scope: &mut FieldScope<'_>, entry: &FieldEntry, value: &Value) -> Result<()> {
        let control_id = scope.control_id(&entry.id);
        let node = scope
            .tree
            .find_by_id(&control_id)
            .ok_or_else(|| Error::node_not_found(format!("#{control_id}")))?;
        scope.tree.set_checked(node, is_checked_value(value));
        Ok(())
    }

    fn empty_message(&self) -> MessageCategory {
        MessageCategory::Check
    }
}
