//! jsonform - Declarative JSON form rendering engine
//!
//! Renders forms described by JSON into a host UI tree, validates them on
//! submission and hands the gathered values to a per-form submit handler.
//!
//! The workspace is split into:
//! - `jsonform-core`: descriptor model, padding, values, errors, logging
//! - `jsonform-ui`: the [`UiTree`] contract, the in-memory [`Document`] and themes
//! - `jsonform-app`: the [`FormEngine`], field kinds, lists and validation
//!
//! ```no_run
//! use jsonform::{Document, FormEngine, FormDescriptor, EngineSettings};
//!
//! let mut page = Document::new();
//! page.append_container("signup");
//! let mut engine = FormEngine::init(&mut page, EngineSettings::default())?;
//! engine.register_submit("default", |valid, data| println!("{valid} {data:?}"));
//! let descriptor = FormDescriptor::from_json_str(
//!     r#"{"fields": [{"id": "name", "name": "Name", "type": "field", "field": {"type": "text"}}]}"#,
//! )?;
//! engine.create(&mut page, "signup", &descriptor, "default")?;
//! # Ok::<(), jsonform::Error>(())
//! ```

use std::path::Path;

use tracing::{error, info};

pub use jsonform_core::logging;
pub use jsonform_core::{
    ButtonOrientation, EntryBody, Error, FieldEntry, FieldSize, FieldSpec, FieldValue, FormData,
    FormDescriptor, ListEntry, ListValue, Result,
};
pub use jsonform_ui::{Document, EventKind, NodeId, Theme, UiEvent, UiTree, UiTreeExt};

pub use jsonform_app::config::{load_settings, save_settings};
pub use jsonform_app::{
    CustomField, EngineSettings, FieldKind, FieldScope, FormEngine, FormPhase, ListenTarget,
    Message, ReadScope, Rendered, Verdict, DEFAULT_KEY,
};

pub use serde_json::{Map, Value};

/// Attach an engine for the project at `project_path`, logging to stderr
///
/// Settings come from `{project_path}/.jsonform/config.toml`. A subscriber
/// installed by the host beforehand is left in place.
pub fn attach_with_project(tree: &mut dyn UiTree, project_path: &Path) -> Result<FormEngine> {
    let _ = logging::init_stderr();

    info!("═══════════════════════════════════════════════════════");
    info!("jsonform attaching");
    info!("Project: {}", project_path.display());
    info!("═══════════════════════════════════════════════════════");

    let result = FormEngine::init_from_project(tree, project_path);
    if let Err(ref e) = result {
        error!("Attach failed: {}", e);
    }
    result
}
