//! # Form Descriptor
//!
//! The raw, host-supplied JSON description of a form. Nothing here is
//! defaulted yet: [`crate::padding::pad_form`] turns a [`FormDescriptor`] into
//! a fully-defaulted [`crate::padding::FormConfig`].
//!
//! Field entries are kept as raw [`serde_json::Value`]s on purpose. A single
//! malformed entry must not fail deserialization of the whole descriptor; it is
//! rejected later, per field, by the padding step.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Host-supplied form description, as parsed from JSON.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FormDescriptor {
    /// Ordered field entries. `None` when the key is absent altogether.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit_button_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_button_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_validation: Option<bool>,

    /// "left", "right" or "center"; anything else falls back to right
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_orientation: Option<String>,

    /// Id of an existing element that should receive the control buttons
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_controls_id: Option<String>,
}

impl FormDescriptor {
    /// Parse a descriptor from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert an already-parsed JSON value into a descriptor
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Build a descriptor from a list of raw field entries
    pub fn with_fields(fields: Vec<Value>) -> Self {
        Self {
            fields: Some(fields),
            ..Default::default()
        }
    }
}

/// Horizontal placement of the submit/cancel control block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonOrientation {
    Left,
    #[default]
    Right,
    Center,
}

impl ButtonOrientation {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "center" | "centre" => Some(Self::Center),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Center => "center",
        }
    }
}

/// Control size hint, mapped to theme size classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldSize {
    #[default]
    Normal,
    Small,
    Large,
}

impl FieldSize {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "normal" | "" => Some(Self::Normal),
            "small" | "sm" => Some(Self::Small),
            "large" | "lg" => Some(Self::Large),
            _ => None,
        }
    }
}
