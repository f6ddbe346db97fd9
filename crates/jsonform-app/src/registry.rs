//! Field registry: field type name to [`FieldKind`].
//!
//! The registry is engine-wide and shared by every form the engine builds.
//! Registration is last-write-wins and there is no removal.

use std::collections::HashMap;
use std::rc::Rc;

use jsonform_core::prelude::*;

use crate::field_kind::{CustomField, FieldKind};
use crate::kinds;

#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    kinds: HashMap<String, Rc<dyn FieldKind>>,
}

impl FieldRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in kind
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        kinds::register_builtin(&mut registry);
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, kind: impl FieldKind + 'static) {
        self.register_rc(name, Rc::new(kind));
    }

    pub fn register_rc(&mut self, name: impl Into<String>, kind: Rc<dyn FieldKind>) {
        let name = name.into();
        if self.kinds.insert(name.clone(), kind).is_some() {
            debug!("Replaced field kind: {}", name);
        } else {
            debug!("Registered field kind: {}", name);
        }
    }

    /// Register a closure-based kind
    pub fn register_custom(&mut self, name: impl Into<String>, field: CustomField) {
        self.register(name, field);
    }

    pub fn get(&self, name: &str) -> Option<Rc<dyn FieldKind>> {
        self.kinds.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.kinds.contains_key(name)
    }

    /// Registered type names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.kinds.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_kind::{ListenTarget, Rendered};
    use crate::validation::MessageCategory;
    use jsonform_core::FieldValue;

    fn dummy() -> CustomField {
        CustomField::new(
            |scope, _| Ok(Rendered::new(scope.tree.create_element("div"), ListenTarget::None)),
            |_, _| FieldValue::Empty,
        )
    }

    #[test]
    fn test_builtin_kinds() {
        let registry = FieldRegistry::with_builtin();
        for name in [
            "text", "email", "number", "password", "date", "tel", "url", "color", "checkbox",
            "switch", "radio", "select", "textarea", "hidden", "file", "list",
        ] {
            assert!(registry.contains(name), "missing built-in kind {name}");
        }
        assert!(!registry.contains("rating"));
    }

    #[test]
    fn test_register_last_write_wins() {
        let mut registry = FieldRegistry::new();
        registry.register_custom("rating", dummy());
        registry.register_custom("rating", dummy().with_empty_message(MessageCategory::Choice));

        assert_eq!(registry.names(), vec!["rating"]);
        let kind = registry.get("rating").unwrap();
        assert_eq!(kind.empty_message(), MessageCategory::Choice);
    }
}
