//! Theme system: pluggable class-name tables.
//!
//! This module provides:
//! - `classes` - The class tables (`FieldClasses`, `FeedbackClasses`, `ControlClasses`) and `Theme`
//! - `builtin` - The `bootstrap4` and `plain` themes
//! - `registry` - `ThemeRegistry`, theme name to bundle

pub mod builtin;
pub mod classes;
pub mod registry;

pub use classes::{ControlClasses, FeedbackClasses, FieldClasses, Theme};
pub use registry::ThemeRegistry;
