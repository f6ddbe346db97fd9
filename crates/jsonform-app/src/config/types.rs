//! Configuration types for the form engine
//!
//! Defines:
//! - `EngineSettings` - All engine settings (`.jsonform/config.toml`)
//! - `GeneralSettings`, `ValidationSettings`, `ControlSettings` - Its sections
//! - `ValidationMessages` - Required-field messages per category

use serde::{Deserialize, Serialize};

use crate::validation::MessageCategory;

/// Engine settings (.jsonform/config.toml)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct EngineSettings {
    #[serde(default)]
    pub engine: GeneralSettings,

    #[serde(default)]
    pub validation: ValidationSettings,

    #[serde(default)]
    pub controls: ControlSettings,
}

/// `[engine]` section
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GeneralSettings {
    /// Render diagnostic placeholders for broken fields
    #[serde(default)]
    pub debug: bool,

    /// Theme used by every form this engine renders
    #[serde(default = "default_theme")]
    pub theme: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            theme: default_theme(),
        }
    }
}

fn default_theme() -> String {
    jsonform_ui::theme::builtin::BOOTSTRAP4.to_string()
}

/// `[validation]` section
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ValidationSettings {
    /// Default for descriptors that omit `hide_validation`
    #[serde(default = "default_true")]
    pub hide_validation: bool,

    #[serde(default)]
    pub messages: ValidationMessages,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            hide_validation: true,
            messages: ValidationMessages::default(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// `[validation.messages]` - shown when a required field is empty
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ValidationMessages {
    pub text: String,
    pub choice: String,
    pub check: String,
    pub file: String,
    pub list: String,
}

impl Default for ValidationMessages {
    fn default() -> Self {
        Self {
            text: "Please fill out this field.".to_string(),
            choice: "Please select an option.".to_string(),
            check: "Please check this box.".to_string(),
            file: "Please upload a file.".to_string(),
            list: "Please add at least one entry.".to_string(),
        }
    }
}

impl ValidationMessages {
    pub fn get(&self, category: MessageCategory) -> &str {
        match category {
            MessageCategory::Text => &self.text,
            MessageCategory::Choice => &self.choice,
            MessageCategory::Check => &self.check,
            MessageCategory::File => &self.file,
            MessageCategory::List => &self.list,
        }
    }
}

/// `[controls]` section - button labels
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ControlSettings {
    /// Used when a descriptor has no `submit_button_text`
    pub submit_text: String,
    pub add_text: String,
    pub remove_text: String,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            submit_text: "Submit".to_string(),
            add_text: "Add".to_string(),
            remove_text: "Remove".to_string(),
        }
    }
}
