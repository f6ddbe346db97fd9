//! Enumerated kinds: `radio` and `select`
//!
//! Options come from the padded `options` list; the key is what gets
//! submitted, the label is what the user sees. Selection is seeded by exact
//! match of the key against `default_value`.

use jsonform_core::prelude::*;
use jsonform_core::{value_to_text, FieldEntry, FieldValue};
use jsonform_ui::UiTreeExt;
use serde_json::Value;

use super::{decorate_control, finish, label, require_spec, wrapper};
use crate::field_kind::{FieldKind, FieldScope, ListenTarget, ReadScope, Rendered};
use crate::validation::MessageCategory;

/// A group of radio inputs sharing `name = {form}-{field}`
#[derive(Debug, Clone, Copy, Default)]
pub struct RadioKind;

impl FieldKind for RadioKind {
    fn create(&self, scope: &mut FieldScope<'_>, entry: &FieldEntry) -> Result<Rendered> {
        let spec = require_spec(entry)?;
        let theme = scope.theme;
        let group_name = scope.control_id(&entry.id);
        let selected = spec.default_text();

        let root = wrapper(scope, entry);
        label(scope, root, entry, None)?;

        // The group container carries the control id so annotations have a target
        let group = scope.tree.append_element(root, "div", Some(&group_name))?;
        scope.tree.set_attribute(group, "role", "radiogroup");

        for (index, option) in spec.options.iter().enumerate() {
            let option_id = format!("{}-{}", group_name, index);
            let item = scope.tree.append_element(group, "div", None)?;
            scope.tree.add_classes(item, &theme.field.check_wrapper);
            scope.tree.add_classes(item, theme.extra("radio_inline").unwrap_or_default());

            let input = scope.tree.append_element(item, "input", Some(&option_id))?;
            scope.tree.set_attribute(input, "type", "radio");
            scope.tree.set_attribute(input, "name", &group_name);
            scope.tree.set_attribute(input, "value", &option.key);
            scope.tree.add_classes(input, &theme.field.check_input);
            if spec.readonly {
                scope.tree.set_disabled(input, true);
            }
            if option.key == selected {
                scope.tree.set_checked(input, true);
            }

            let text = scope.tree.append_element(item, "label", None)?;
            scope.tree.set_attribute(text, "for", &option_id);
            scope.tree.add_classes(text, &theme.field.check_label);
            scope.tree.set_text(text, &option.label);
        }

        finish(scope, root, entry, spec)?;
        Ok(Rendered::new(root, ListenTarget::Name(group_name)))
    }

    fn value(&self, scope: &ReadScope<'_>, entry: &FieldEntry) -> FieldValue {
        let group_name = scope.control_id(&entry.id);
        scope
            .tree
            .find_by_name(&group_name)
            .into_iter()
            .find(|node| scope.tree.is_checked(*node))
            .and_then(|node| scope.tree.attribute(node, "value").map(FieldValue::text))
            .unwrap_or_default()
    }

    fn set_value(&self, scope: &mut FieldScope<'_>, entry: &FieldEntry, value: &Value) -> Result<()> {
        let group_name = scope.control_id(&entry.id);
        let wanted = value_to_text(value);
        for node in scope.tree.find_by_name(&group_name) {
            let matches = scope.tree.attribute(node, "value") == Some(wanted.as_str());
            scope.tree.set_checked(node, matches);
        }
        Ok(())
    }

    fn empty_message(&self) -> MessageCategory {
        MessageCategory::Choice
    }
}

/// A `<select>` with one `<option>` per configured option
///
/// A non-empty `placeholder` becomes a leading option with an empty value, so
/// an untouched required select fails validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectKind;

impl FieldKind for SelectKind {
    fn create(&self, scope: &mut FieldScope<'_>, entry: &FieldEntry) -> Result<Rendered> {
        let spec = require_spec(entry)?;
        let theme = scope.theme;
        let control_id = scope.control_id(&entry.id);
        let selected = spec.default_text();

        let root = wrapper(scope, entry);
        label(scope, root, entry, Some(&control_id))?;

        let select = scope.tree.append_element(root, "select", None)?;
        decorate_control(scope, select, entry, spec, &theme.field.select);
        scope.tree.remove_attribute(select, "placeholder");

        if !spec.placeholder.is_empty() {
            let option = scope.tree.append_element(select, "option", None)?;
            scope.tree.set_attribute(option, "value", "");
            scope.tree.set_text(option, &spec.placeholder);
        }
        for choice in &spec.options {
            let option = scope.tree.append_element(select, "option", None)?;
            scope.tree.set_attribute(option, "value", &choice.key);
            scope.tree.set_text(option, &choice.label);
            if choice.key == selected {
                scope.tree.set_checked(option, true);
            }
        }

        finish(scope, root, entry, spec)?;
        Ok(Rendered::new(root, ListenTarget::Node(select)))
    }

    fn value(&self, scope: &ReadScope<'_>, entry: &FieldEntry) -> FieldValue {
        scope
            .control(&entry.id)
            .and_then(|node| scope.tree.value(node))
            .map(FieldValue::Text)
            .unwrap_or_default()
    }

    fn set_value(&self, scope: &mut FieldScope<'_>, entry: &FieldEntry, value: &Value) -> Result<()> {
        let control_id = scope.control_id(&entry.id);
        let node = scope
            .tree
            .find_by_id(&control_id)
            .ok_or_else(|| Error::node_not_found(format!("#{control_id}")))?;
        scope.tree.set_value(node, &value_to_text(value));
        Ok(())
    }

    fn empty_message(&self) -> MessageCategory {
        MessageCategory::Choice
    }
}
