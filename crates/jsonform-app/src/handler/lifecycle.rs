//! Form lifecycle handlers: submit, cancel, phase switches and teardown

use jsonform_core::prelude::*;
use jsonform_core::FormData;
use jsonform_ui::UiTree;

use crate::form::FormPhase;
use crate::state::EngineState;

use super::{UpdateAction, UpdateResult};

/// Gather and validate a form; data is withheld when invalid
pub fn collect_submission(
    state: &mut EngineState,
    tree: &mut dyn UiTree,
    form: &str,
) -> Result<(bool, Option<FormData>)> {
    let (ctx, instance) = state.split(form).ok_or_else(|| Error::unknown_instance(form))?;
    let data = instance.gather(&*tree, ctx);
    let valid = instance.validate_all(tree, ctx);
    debug!("Form '{}' submitted, valid: {}", form, valid);
    Ok((valid, valid.then_some(data)))
}

pub fn handle_submit(state: &mut EngineState, tree: &mut dyn UiTree, form: &str) -> UpdateResult {
    match collect_submission(state, tree, form) {
        Ok((valid, data)) => UpdateResult::action(UpdateAction::DispatchSubmit {
            form: form.to_string(),
            valid,
            data,
        }),
        Err(e) => {
            error!("Submit failed: {}", e);
            UpdateResult::none()
        }
    }
}

pub fn handle_cancel(state: &mut EngineState, tree: &mut dyn UiTree, form: &str) -> UpdateResult {
    match state.split(form) {
        Some((ctx, instance)) => instance.reset(tree, ctx),
        None => warn!("Cancel for unknown form '{}'", form),
    }
    UpdateResult::none()
}

pub fn set_state(state: &mut EngineState, tree: &mut dyn UiTree, form: &str, phase: FormPhase) -> Result<()> {
    let (ctx, instance) = state.split(form).ok_or_else(|| Error::unknown_instance(form))?;
    instance.set_phase(tree, ctx, phase)
}

pub fn handle_set_state(state: &mut EngineState, tree: &mut dyn UiTree, form: &str, phase: FormPhase) -> UpdateResult {
    if let Err(e) = set_state(state, tree, form, phase) {
        error!("Set state failed: {}", e);
    }
    UpdateResult::none()
}

/// Remove the form's subtree (and a relocated button block) and release it
pub fn destroy(state: &mut EngineState, tree: &mut dyn UiTree, form: &str) -> Result<()> {
    let instance = state
        .forms
        .remove(form)
        .ok_or_else(|| Error::unknown_instance(form))?;

    if tree.exists(instance.regions.form) {
        tree.remove(instance.regions.form)?;
    }
    if let Some(buttons) = instance.buttons.filter(|b| tree.exists(*b)) {
        tree.remove(buttons)?;
    }
    info!("Destroyed form '{}'", instance.key);
    Ok(())
}

pub fn handle_destroy(state: &mut EngineState, tree: &mut dyn UiTree, form: &str) -> UpdateResult {
    if let Err(e) = destroy(state, tree, form) {
        error!("Destroy failed: {}", e);
    }
    UpdateResult::none()
}
