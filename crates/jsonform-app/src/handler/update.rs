//! Main update function - applies one message to the engine state

use jsonform_ui::UiTree;

use crate::message::Message;
use crate::state::EngineState;

use super::{field, lifecycle, list, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut EngineState, tree: &mut dyn UiTree, message: Message) -> UpdateResult {
    match message {
        Message::FieldChanged { form, field } => field::handle_field_changed(state, tree, &form, &field),

        Message::SetValue { form, field, value } => {
            field::handle_set_value(state, tree, &form, &field, &value)
        }

        // ─────────────────────────────────────────────────────────
        // List Messages
        // ─────────────────────────────────────────────────────────
        Message::ListAdd { form, field } => list::handle_add(state, tree, &form, &field),
        Message::ListRemove {
            form,
            field,
            counter,
        } => list::handle_remove(state, tree, &form, &field, counter),
        Message::ListCellChanged {
            form,
            field,
            counter,
            sub,
        } => list::handle_cell_changed(state, tree, &form, &field, counter, &sub),

        // ─────────────────────────────────────────────────────────
        // Form Messages
        // ─────────────────────────────────────────────────────────
        Message::Submit { form } => lifecycle::handle_submit(state, tree, &form),
        Message::Cancel { form } => lifecycle::handle_cancel(state, tree, &form),
        Message::SetState { form, phase } => lifecycle::handle_set_state(state, tree, &form, phase),
        Message::Destroy { form } => lifecycle::handle_destroy(state, tree, &form),
    }
}
