//! Handler module - TEA update function and message handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `field`: Field validation and value handlers
//! - `list`: List add/remove/cell handlers
//! - `lifecycle`: Submit, cancel, phase and destroy handlers

pub(crate) mod field;
pub(crate) mod lifecycle;
pub(crate) mod list;
pub(crate) mod update;


use jsonform_core::FormData;

use crate::message::Message;

// Re-export main entry point
pub use update::update;

/// Actions the engine performs after update, outside the borrowed state
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateAction {
    /// Call the form's submit handler
    DispatchSubmit {
        form: String,
        valid: bool,
        /// `None` when the form is invalid
        data: Option<FormData>,
    },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the engine to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
