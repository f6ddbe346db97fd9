//! jsonform-app - Form engine, field kinds and the update loop
//!
//! This crate implements the TEA (The Elm Architecture) pattern for form state,
//! the field and theme registries, the built-in field kinds, the list
//! controller, validation and settings loading. Hosts talk to it through
//! [`FormEngine`].

pub mod config;
pub mod engine;
pub mod field_kind;
pub mod form;
pub mod form_manager;
pub mod handler;
pub mod kinds;
pub mod list;
pub mod listeners;
pub mod message;
pub mod registry;
pub mod renderer;
pub mod state;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export primary types
pub use config::EngineSettings;
pub use engine::FormEngine;
pub use field_kind::{control_id, CustomField, FieldKind, FieldScope, ListenTarget, ReadScope, Rendered};
pub use form::{FormInstance, FormPhase, SubmitHandler};
pub use form_manager::{FormManager, DEFAULT_KEY};
pub use handler::{UpdateAction, UpdateResult};
pub use message::Message;
pub use registry::FieldRegistry;
pub use state::EngineState;
pub use validation::{MessageCategory, Verdict};
