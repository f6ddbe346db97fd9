//! Message types for the engine (TEA pattern)

use serde_json::Value;

use crate::form::FormPhase;
use crate::listeners::Listener;

/// Everything that can happen to a live form
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // ─────────────────────────────────────────────────────────
    // Field Messages
    // ─────────────────────────────────────────────────────────
    /// A control changed; re-validate its field
    FieldChanged { form: String, field: String },

    /// Host code writes a value into a field
    SetValue {
        form: String,
        field: String,
        value: Value,
    },

    // ─────────────────────────────────────────────────────────
    // List Messages
    // ─────────────────────────────────────────────────────────
    /// Add control of a list was clicked
    ListAdd { form: String, field: String },

    /// Remove control of one list row was clicked
    ListRemove {
        form: String,
        field: String,
        counter: u32,
    },

    /// A cell of a persisted list row changed
    ListCellChanged {
        form: String,
        field: String,
        counter: u32,
        sub: String,
    },

    // ─────────────────────────────────────────────────────────
    // Form Messages
    // ─────────────────────────────────────────────────────────
    /// Gather, validate and hand the result to the submit handler
    Submit { form: String },

    /// Reset every field to its default
    Cancel { form: String },

    /// Switch between the loading and ready presentation
    SetState { form: String, phase: FormPhase },

    /// Tear the form down
    Destroy { form: String },
}

impl Message {
    /// Message for a listener that fired in form `form`
    pub fn from_listener(form: &str, listener: &Listener) -> Self {
        let form = form.to_string();
        match listener.clone() {
            Listener::Validate { field } => Message::FieldChanged { form, field },
            Listener::ListAdd { field } => Message::ListAdd { form, field },
            Listener::ListRemove { field, counter } => Message::ListRemove {
                form,
                field,
                counter,
            },
            Listener::ListCell {
                field,
                counter,
                sub,
            } => Message::ListCellChanged {
                form,
                field,
                counter,
                sub,
            },
            Listener::Submit => Message::Submit { form },
            Listener::Cancel => Message::Cancel { form },
        }
    }

    /// Key of the form this message is addressed to
    pub fn form(&self) -> &str {
        match self {
            Message::FieldChanged { form, .. }
            | Message::SetValue { form, .. }
            | Message::ListAdd { form, .. }
            | Message::ListRemove { form, .. }
            | Message::ListCellChanged { form, .. }
            | Message::Submit { form }
            | Message::Cancel { form }
            | Message::SetState { form, .. }
            | Message::Destroy { form } => form,
        }
    }
}
