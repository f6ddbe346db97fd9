//! # jsonform-core - Core Descriptor Types
//!
//! Foundation crate for jsonform. Provides the form descriptor data model, the
//! padding step that defaults it, field values and error handling.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, serde_json, thiserror, toml, tracing).
//!
//! ## Public API
//!
//! ### Descriptors (`descriptor`, `field`)
//! - [`FormDescriptor`] - Raw host-supplied form description
//! - [`FieldEntry`], [`EntryBody`], [`FieldSpec`] - Padded entries
//! - [`ButtonOrientation`], [`FieldSize`] - Presentation enums
//!
//! ### Padding (`padding`)
//! - [`pad_form()`], [`pad_field()`] - Pure defaulting functions
//! - [`FormConfig`] - Fully defaulted form configuration
//! - [`Rejected`] - An entry that failed padding
//!
//! ### Values (`value`)
//! - [`FieldValue`] - A value read back from a field
//! - [`ListValue`], [`ListEntry`] - Repeating group rows
//! - [`FormData`] - The submitted payload
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Error enum with config vs render classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use jsonform_core::prelude::*;
//! ```

pub mod descriptor;
pub mod error;
pub mod field;
pub mod logging;
pub mod padding;
pub mod value;

/// Prelude for common imports used throughout all jsonform crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use descriptor::{ButtonOrientation, FieldSize, FormDescriptor};
pub use error::{Error, Result, ResultExt};
pub use field::{value_to_text, EntryBody, FieldEntry, FieldOption, FieldSpec};
pub use padding::{pad_field, pad_form, FormConfig, FormDefaults, PaddedEntry, RejectReason, Rejected};
pub use value::{FieldValue, FormData, ListEntry, ListValue};
