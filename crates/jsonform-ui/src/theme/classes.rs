//! Class-name tables consumed by the field renderer.
//!
//! Every entry is an opaque, space-separated class string. An empty string
//! means "add nothing".

use std::collections::BTreeMap;

use jsonform_core::FieldSize;
use serde::{Deserialize, Serialize};

/// Classes applied while building field markup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldClasses {
    /// Container holding all field wrappers
    pub row: String,
    /// Per-field wrapper
    pub wrapper: String,
    /// Prefix of the column-width class; the width (1..=12) is appended
    pub column_prefix: String,
    pub label: String,
    pub input: String,
    pub select: String,
    pub textarea: String,
    pub file: String,
    pub check_wrapper: String,
    pub switch_wrapper: String,
    pub check_input: String,
    pub check_label: String,
    pub helptext: String,
    /// Added to a control that passed validation (when affirmations are shown)
    pub valid: String,
    /// Added to a control that failed validation
    pub invalid: String,
    pub size_small: String,
    pub size_large: String,
    pub list_header: String,
    pub list_items: String,
    pub list_row: String,
    /// Diagnostic placeholder block shown in debug mode
    pub diagnostic: String,
}

/// Classes of the feedback element below a control
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackClasses {
    pub valid: String,
    pub invalid: String,
}

/// Classes for buttons and form chrome
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlClasses {
    pub wrapper: String,
    pub submit: String,
    pub cancel: String,
    pub add: String,
    pub remove: String,
    pub align_left: String,
    pub align_center: String,
    pub align_right: String,
    pub loader: String,
    /// Added to regions when they are revealed
    pub reveal: String,
}

/// A named styling bundle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub name: String,
    pub field: FieldClasses,
    pub feedback: FeedbackClasses,
    pub controls: ControlClasses,
    /// Anything else a custom field kind wants to look up
    pub extra: BTreeMap<String, String>,
}

impl Theme {
    /// Column class for a width, e.g. `col-md-6`
    pub fn column_class(&self, width: u8) -> String {
        if self.field.column_prefix.is_empty() {
            String::new()
        } else {
            format!("{}{}", self.field.column_prefix, width)
        }
    }

    pub fn size_class(&self, size: FieldSize) -> &str {
        match size {
            FieldSize::Normal => "",
            FieldSize::Small => &self.field.size_small,
            FieldSize::Large => &self.field.size_large,
        }
    }

    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extra.get(key).map(String::as_str)
    }
}
