//! Field handlers

use jsonform_core::prelude::*;
use jsonform_ui::UiTree;
use serde_json::Value;

use crate::state::EngineState;

use super::UpdateResult;

/// Re-validate a field after its control changed
pub fn handle_field_changed(state: &mut EngineState, tree: &mut dyn UiTree, form: &str, field: &str) -> UpdateResult {
    let Some((ctx, instance)) = state.split(form) else {
        warn!("Change for unknown form '{}'", form);
        return UpdateResult::none();
    };
    if instance.validate_field(tree, ctx, field).is_none() {
        debug!("Form '{}' has no validating field '{}'", form, field);
    }
    UpdateResult::none()
}

/// Write a value into a field
pub fn handle_set_value(
    state: &mut EngineState,
    tree: &mut dyn UiTree,
    form: &str,
    field: &str,
    value: &Value,
) -> UpdateResult {
    if let Err(e) = set_value(state, tree, form, field, value) {
        error!("Setting '{}' in form '{}' failed: {}", field, form, e);
    }
    UpdateResult::none()
}

pub fn set_value(state: &mut EngineState, tree: &mut dyn UiTree, form: &str, field: &str, value: &Value) -> Result<()> {
    let (ctx, instance) = state.split(form).ok_or_else(|| Error::unknown_instance(form))?;
    instance.set_value(tree, ctx, field, value)?;
    trace!("Form '{}': '{}' set to {}", form, field, value);
    Ok(())
}
