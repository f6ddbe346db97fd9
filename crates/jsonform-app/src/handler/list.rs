//! List field handlers
//!
//! A successful add or remove is followed by a `FieldChanged` message so the
//! list is re-validated against its new row count.

use jsonform_core::prelude::*;
use jsonform_ui::UiTree;

use crate::list;
use crate::message::Message;
use crate::state::EngineState;
use crate::validation::{annotate, Verdict};

use super::UpdateResult;

fn revalidate(form: &str, field: &str) -> UpdateResult {
    UpdateResult::message(Message::FieldChanged {
        form: form.to_string(),
        field: field.to_string(),
    })
}

pub fn handle_add(state: &mut EngineState, tree: &mut dyn UiTree, form: &str, field: &str) -> UpdateResult {
    let Some((ctx, instance)) = state.split(form) else {
        warn!("List add for unknown form '{}'", form);
        return UpdateResult::none();
    };
    let Some(entry) = instance.field(field).cloned() else {
        warn!("Form '{}' has no list field '{}'", form, field);
        return UpdateResult::none();
    };

    let added = list::add_item(&mut instance.scope(tree, ctx), &entry);
    match added {
        Ok(Some(_)) => revalidate(form, field),
        Ok(None) => UpdateResult::none(),
        Err(e @ Error::ListLimit { .. }) => {
            info!("List '{}' in form '{}': {}", field, form, e);
            let control = instance.control_id(field);
            annotate(
                tree,
                ctx.theme,
                &control,
                &Verdict::invalid(e.to_string()),
                instance.config.hide_validation,
            );
            UpdateResult::none()
        }
        Err(e) => {
            warn!("List add in form '{}' failed: {}", form, e);
            UpdateResult::none()
        }
    }
}

pub fn handle_remove(
    state: &mut EngineState,
    tree: &mut dyn UiTree,
    form: &str,
    field: &str,
    counter: u32,
) -> UpdateResult {
    let Some((ctx, instance)) = state.split(form) else {
        warn!("List remove for unknown form '{}'", form);
        return UpdateResult::none();
    };
    let removed = list::remove_item(&mut instance.scope(tree, ctx), field, counter);
    match removed {
        Ok(()) => revalidate(form, field),
        Err(e) => {
            warn!("List remove in form '{}' failed: {}", form, e);
            UpdateResult::none()
        }
    }
}

pub fn handle_cell_changed(
    state: &mut EngineState,
    tree: &mut dyn UiTree,
    form: &str,
    field: &str,
    counter: u32,
    sub: &str,
) -> UpdateResult {
    let Some((ctx, instance)) = state.split(form) else {
        warn!("List edit for unknown form '{}'", form);
        return UpdateResult::none();
    };
    if let Err(e) = list::update_cell(&mut instance.scope(tree, ctx), field, counter, sub) {
        warn!("List edit in form '{}' failed: {}", form, e);
    }
    UpdateResult::none()
}
