//! Test utilities for rendering fields outside a full engine
//!
//! [`TestForm`] owns a [`Document`] with a `host` container and everything a
//! [`FieldScope`] borrows, so kinds and the list controller can be driven
//! directly.
//!
//! ```ignore
//! let mut form = TestForm::new();
//! let entry = form.render(json!({"id": "name", "name": "Name", "type": "field",
//!                                "field": {"type": "text"}}));
//! assert_eq!(form.value(&entry), FieldValue::Empty);
//! ```

use jsonform_core::{pad_field, FieldEntry, FieldValue};
use jsonform_ui::theme::builtin;
use jsonform_ui::{Document, NodeId, Theme, UiTree};
use serde_json::Value;

use crate::config::EngineSettings;
use crate::field_kind::{FieldScope, ReadScope};
use crate::list::ListStore;
use crate::listeners::ListenerTable;
use crate::registry::FieldRegistry;
use crate::renderer::{self, Outcome};

/// Id prefix of every control rendered by a [`TestForm`]
pub const FORM_ID: &str = "jsonform-test";

pub struct TestForm {
    pub doc: Document,
    pub host: NodeId,
    pub settings: EngineSettings,
    pub registry: FieldRegistry,
    pub theme: Theme,
    pub listeners: ListenerTable,
    pub lists: ListStore,
}

impl TestForm {
    /// Bootstrap 4 theme, built-in kinds, default settings
    pub fn new() -> Self {
        Self::with_theme(builtin::bootstrap4())
    }

    pub fn with_theme(theme: Theme) -> Self {
        let mut doc = Document::new();
        let host = doc.append_container("host");
        Self {
            doc,
            host,
            settings: EngineSettings::default(),
            registry: FieldRegistry::with_builtin(),
            theme,
            listeners: ListenerTable::new(),
            lists: ListStore::default(),
        }
    }

    pub fn scope(&mut self) -> FieldScope<'_> {
        FieldScope {
            tree: &mut self.doc,
            form_id: FORM_ID,
            theme: &self.theme,
            settings: &self.settings,
            registry: &self.registry,
            listeners: &mut self.listeners,
            lists: &mut self.lists,
        }
    }

    pub fn read(&self) -> ReadScope<'_> {
        ReadScope {
            tree: &self.doc,
            form_id: FORM_ID,
            lists: &self.lists,
        }
    }

    /// Pad `raw` and render it into the host container (debug mode on)
    pub fn render_outcome(&mut self, raw: Value) -> (Option<FieldEntry>, Outcome) {
        let padded = pad_field(&raw);
        let host = self.host;
        let outcome = renderer::render_entry(&mut self.scope(), host, &padded, true);
        (padded.ok(), outcome)
    }

    /// Pad and render an entry that is expected to succeed
    pub fn render(&mut self, raw: Value) -> FieldEntry {
        let (entry, outcome) = self.render_outcome(raw);
        assert!(outcome.is_field(), "entry was not rendered: {:?}", outcome);
        entry.expect("entry should pad")
    }

    /// Read a field through its registered kind
    pub fn value(&self, entry: &FieldEntry) -> FieldValue {
        let kind = self.registry.get(entry.kind()).expect("kind should be registered");
        kind.value(&self.read(), entry)
    }

    pub fn set(&mut self, entry: &FieldEntry, value: Value) {
        let kind = self.registry.get(entry.kind()).expect("kind should be registered");
        kind.set_value(&mut self.scope(), entry, &value).expect("set_value should succeed");
    }

    /// Attached node by full element id
    pub fn node(&self, id: &str) -> NodeId {
        self.doc
            .find_by_id(id)
            .unwrap_or_else(|| panic!("no element #{}", id))
    }

    /// Control node of a field
    pub fn control(&self, field_id: &str) -> NodeId {
        self.node(&format!("{}-{}", FORM_ID, field_id))
    }

    pub fn html(&self, node: NodeId) -> String {
        self.doc.to_html(node)
    }
}

impl Default for TestForm {
    fn default() -> Self {
        Self::new()
    }
}
