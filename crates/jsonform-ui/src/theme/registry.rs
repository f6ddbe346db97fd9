//! Theme registry: theme name to styling bundle

use std::collections::{BTreeMap, HashMap};

use jsonform_core::prelude::*;

use super::builtin;
use super::classes::{ControlClasses, FeedbackClasses, FieldClasses, Theme};

/// Named styling bundles. Last registration under a name wins.
#[derive(Debug, Clone, Default)]
pub struct ThemeRegistry {
    themes: HashMap<String, Theme>,
}

impl ThemeRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in `bootstrap4` and `plain` themes
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.insert(builtin::bootstrap4());
        registry.insert(builtin::plain());
        registry
    }

    pub fn register_theme(
        &mut self,
        name: impl Into<String>,
        field: FieldClasses,
        feedback: FeedbackClasses,
        controls: ControlClasses,
        extra: Option<BTreeMap<String, String>>,
    ) {
        let name = name.into();
        self.insert(Theme {
            name,
            field,
            feedback,
            controls,
            extra: extra.unwrap_or_default(),
        });
    }

    /// Register a complete theme under its own name
    pub fn insert(&mut self, theme: Theme) {
        debug!("Registered theme: {}", theme.name);
        self.themes.insert(theme.name.clone(), theme);
    }

    /// Register a theme described as JSON (`{"field": {...}, "feedback": {...}, ...}`)
    pub fn register_json(&mut self, name: &str, value: serde_json::Value) -> Result<()> {
        let mut theme: Theme = serde_json::from_value(value)?;
        theme.name = name.to_string();
        self.insert(theme);
        Ok(())
    }

    pub fn get_theme(&self, name: &str) -> Option<&Theme> {
        self.themes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.themes.contains_key(name)
    }

    /// Registered theme names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.themes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
