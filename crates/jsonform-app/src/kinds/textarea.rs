//! Multi-line text

use jsonform_core::prelude::*;
use jsonform_core::{value_to_text, FieldEntry, FieldValue};
use jsonform_ui::UiTreeExt;
use serde_json::Value;

use super::{decorate_control, finish, label, require_spec, wrapper};
use crate::field_kind::{FieldKind, FieldScope, ListenTarget, ReadScope, Rendered};

const DEFAULT_ROWS: u32 = 3;

#[derive(Debug, Clone, Copy, Default)]
pub struct TextareaKind;

impl FieldKind for TextareaKind {
    fn create(&self, scope: &mut FieldScope<'_>, entry: &FieldEntry) -> Result<Rendered> {
        let spec = require_spec(entry)?;
        let theme = scope.theme;
        let control_id = scope.control_id(&entry.id);

        let root = wrapper(scope, entry);
        label(scope, root, entry, Some(&control_id))?;

        let area = scope.tree.append_element(root, "textarea", None)?;
        decorate_control(scope, area, entry, spec, &theme.field.textarea);
        let rows = spec.rows.unwrap_or(DEFAULT_ROWS);
        scope.tree.set_attribute(area, "rows", &rows.to_string());
        scope.tree.set_value(area, &spec.default_text());

        finish(scope, root, entry, spec)?;
        Ok(Rendered::new(root, ListenTarget::Node(area)))
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
}
