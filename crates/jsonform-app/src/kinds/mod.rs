//! Built-in field kinds and the markup helpers they share.
//!
//! - `input` - Plain `<input>` kinds (text, email, number, ...), `hidden`, `file`
//! - `toggle` - `checkbox` and `switch`
//! - `choice` - `radio` and `select`
//! - `textarea` - Multi-line text
//! - `list` - Repeating groups, backed by [`crate::list`]

pub mod choice;
pub mod input;
pub mod list;
pub mod textarea;
pub mod toggle;

use jsonform_core::prelude::*;
use jsonform_core::{FieldEntry, FieldSpec};
use jsonform_ui::{NodeId, UiTreeExt};
use serde_json::Value;

use crate::field_kind::FieldScope;
use crate::registry::FieldRegistry;

pub use choice::{RadioKind, SelectKind};
pub use input::{InputKind, InputRule};
pub use list::ListKind;
pub use textarea::TextareaKind;
pub use toggle::ToggleKind;

/// Register every built-in kind
pub fn register_builtin(registry: &mut FieldRegistry) {
    registry.register("text", InputKind::new("text"));
    registry.register("email", InputKind::new("email").with_rule(InputRule::Email));
    registry.register("number", InputKind::new("number").with_rule(InputRule::Number));
    registry.register("password", InputKind::new("password"));
    registry.register("date", InputKind::new("date").with_rule(InputRule::Date));
    registry.register("tel", InputKind::new("tel"));
    registry.register("url", InputKind::new("url").with_rule(InputRule::Url));
    registry.register("color", InputKind::new("color"));
    registry.register("hidden", InputKind::hidden());
    registry.register("file", InputKind::file());
    registry.register("checkbox", ToggleKind::checkbox());
    registry.register("switch", ToggleKind::switch());
    registry.register("radio", RadioKind);
    registry.register("select", SelectKind);
    registry.register("textarea", TextareaKind);
    registry.register("list", ListKind);
}

/// The `field` sub-object of an entry, or a render error
pub(crate) fn require_spec(entry: &FieldEntry) -> Result<&FieldSpec> {
    entry
        .spec()
        .ok_or_else(|| Error::render(&entry.id, format!("'{}' entries have no field spec", entry.entry_type())))
}

/// Detached field wrapper: `<div id="{control}-wrapper">`
pub(crate) fn wrapper(scope: &mut FieldScope<'_>, entry: &FieldEntry) -> NodeId {
    let id = format!("{}-wrapper", scope.control_id(&entry.id));
    let node = scope.tree.create_element("div");
    scope.tree.set_attribute(node, "id", &id);
    scope.tree.add_classes(node, &scope.theme.field.wrapper);
    node
}

/// `<label for=..>` with the entry's display name; skipped when the name is empty
pub(crate) fn label(scope: &mut FieldScope<'_>, parent: NodeId, entry: &FieldEntry, for_id: Option<&str>) -> Result<()> {
    if entry.name.is_empty() {
        return Ok(());
    }
    let node = scope.tree.append_element(parent, "label", None)?;
    if let Some(for_id) = for_id {
        scope.tree.set_attribute(node, "for", for_id);
    }
    scope.tree.add_classes(node, &scope.theme.field.label);
    scope.tree.set_text(node, &entry.name);
    Ok(())
}

/// Id, classes and interaction flags common to every control element
pub(crate) fn decorate_control(
    scope: &mut FieldScope<'_>,
    control: NodeId,
    entry: &FieldEntry,
    spec: &FieldSpec,
    base_class: &str,
) {
    let control_id = scope.control_id(&entry.id);
    scope.tree.set_attribute(control, "id", &control_id);
    scope.tree.set_attribute(control, "name", &control_id);
    scope.tree.add_classes(control, base_class);
    scope.tree.add_classes(control, scope.theme.size_class(spec.size));
    if !spec.placeholder.is_empty() {
        scope.tree.set_attribute(control, "placeholder", &spec.placeholder);
    }
    if spec.required {
        scope.tree.set_attribute(control, "required", "");
    }
    if spec.readonly {
        scope.tree.set_attribute(control, "readonly", "");
        scope.tree.set_disabled(control, true);
    }
    if !spec.helptext.is_empty() {
        scope
            .tree
            .set_attribute(control, "aria-describedby", &format!("{}-help", control_id));
    }
}

/// Help text and the (initially hidden) feedback element
pub(crate) fn finish(scope: &mut FieldScope<'_>, parent: NodeId, entry: &FieldEntry, spec: &FieldSpec) -> Result<()> {
    let control_id = scope.control_id(&entry.id);
    if !spec.helptext.is_empty() {
        let help = scope
            .tree
            .append_element(parent, "small", Some(&format!("{}-help", control_id)))?;
        scope.tree.add_classes(help, &scope.theme.field.helptext);
        scope.tree.set_text(help, &spec.helptext);
    }
    let feedback = scope
        .tree
        .append_element(parent, "div", Some(&format!("{}-feedback", control_id)))?;
    scope.tree.set_visible(feedback, false);
    Ok(())
}

/// `"checked"`, `"true"`, `"selected"` or boolean `true`
pub(crate) fn is_checked_value(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => matches!(s.to_ascii_lowercase().as_str(), "checked" | "true" | "selected"),
        _ => false,
    }
}
