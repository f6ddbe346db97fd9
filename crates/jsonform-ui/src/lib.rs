//! # jsonform-ui - UI Tree Contract and Themes
//!
//! The collaborator side of the engine: what the engine needs from a host page,
//! an in-memory implementation of it, and the class-name themes renderers use.
//!
//! ## Public API
//!
//! - [`UiTree`], [`UiTreeExt`], [`NodeId`] - The host UI contract
//! - [`UiEvent`], [`EventKind`] - Events forwarded by the host
//! - [`Document`] - In-memory page with markup output
//! - [`Theme`], [`ThemeRegistry`] - Styling bundles

pub mod document;
pub mod event;
pub mod markup;
pub mod theme;
pub mod tree;

pub use document::Document;
pub use event::{EventKind, UiEvent};
pub use theme::{ControlClasses, FeedbackClasses, FieldClasses, Theme, ThemeRegistry};
pub use tree::{NodeId, UiTree, UiTreeExt};
