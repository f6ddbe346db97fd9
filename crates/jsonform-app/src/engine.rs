//! Engine - the host-facing entry point
//!
//! A [`FormEngine`] owns the field and theme registries, the settings and every
//! live form. It attaches to one UI tree ("page"); the host passes that tree
//! into each call and forwards UI events through [`FormEngine::handle_event`].

use std::collections::BTreeMap;
use std::path::Path;

use jsonform_core::prelude::*;
use jsonform_core::{FormData, FormDescriptor};
use jsonform_ui::{ControlClasses, FeedbackClasses, FieldClasses, UiEvent, UiTree};
use serde_json::{Map, Value};

use crate::config::{self, EngineSettings};
use crate::field_kind::{CustomField, FieldKind};
use crate::form::{self, FormInstance, FormPhase, SubmitHandler};
use crate::handler::{self, lifecycle, UpdateAction};
use crate::message::Message;
use crate::state::EngineState;

/// Attribute set on the tree root while an engine is attached
pub const ATTACH_MARKER: &str = "data-jsonform-engine";

/// Form engine attached to one page
#[derive(Debug)]
pub struct FormEngine {
    /// TEA state (the Model)
    pub state: EngineState,
}

impl FormEngine {
    /// Attach an engine to `tree`
    ///
    /// Fails with [`Error::AlreadyInitialized`] when another engine is attached.
    pub fn init(tree: &mut dyn UiTree, settings: EngineSettings) -> Result<Self> {
        let root = tree.root();
        if tree.attribute(root, ATTACH_MARKER).is_some() {
            error!("{}", Error::AlreadyInitialized);
            return Err(Error::AlreadyInitialized);
        }
        tree.set_attribute(root, ATTACH_MARKER, env!("CARGO_PKG_VERSION"));

        let state = EngineState::new(settings);
        if !state.has_configured_theme() {
            warn!(
                "Theme '{}' is not registered, falling back to '{}' until it is",
                state.settings.engine.theme,
                jsonform_ui::theme::builtin::PLAIN
            );
        }
        debug!(
            "Form engine attached (theme: {}, {} field kinds)",
            state.settings.engine.theme,
            state.registry.names().len()
        );
        Ok(Self { state })
    }

    /// Attach with settings from `{project_path}/.jsonform/config.toml`
    pub fn init_from_project(tree: &mut dyn UiTree, project_path: &Path) -> Result<Self> {
        Self::init(tree, config::load_settings(project_path))
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.state.settings
    }

    // ─────────────────────────────────────────────────────────
    // Registration
    // ─────────────────────────────────────────────────────────

    /// Register a field kind; a later registration under the same name wins
    pub fn register_field(&mut self, name: &str, kind: impl FieldKind + 'static) {
        self.state.registry.register(name, kind);
    }

    /// Register a kind built from closures
    pub fn register_custom(&mut self, name: &str, field: CustomField) {
        self.state.registry.register_custom(name, field);
    }

    pub fn register_theme(
        &mut self,
        name: &str,
        field: FieldClasses,
        feedback: FeedbackClasses,
        controls: ControlClasses,
        extra: Option<BTreeMap<String, String>>,
    ) {
        self.state.themes.register_theme(name, field, feedback, controls, extra);
    }

    /// Register a theme from its JSON class bundle
    pub fn register_theme_json(&mut self, name: &str, bundle: Value) -> Result<()> {
        self.state.themes.register_json(name, bundle)
    }

    /// Replace the submit handler of `key`; works before or after `create`
    pub fn register_submit(&mut self, key: &str, handler: impl FnMut(bool, Option<FormData>) + 'static) {
        self.state.forms.register_submit(key, SubmitHandler::new(handler));
    }

    // ─────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────

    /// Build a form inside the element with id `parent_id`
    ///
    /// Failures are logged and returned; a duplicate key leaves the existing
    /// form untouched.
    pub fn create(
        &mut self,
        tree: &mut dyn UiTree,
        parent_id: &str,
        descriptor: &FormDescriptor,
        key: &str,
    ) -> Result<()> {
        let built = self.state.forms.ensure_free(key).and_then(|()| {
            let ctx = self.state.ctx();
            form::build(tree, ctx, parent_id, descriptor, key)
        });
        match built {
            Ok(instance) => self.state.forms.insert(instance),
            Err(e) => {
                error!("Create form '{}' failed: {}", key, e);
                Err(e)
            }
        }
    }

    /// [`create`](Self::create) from a JSON descriptor
    pub fn create_from_json(&mut self, tree: &mut dyn UiTree, parent_id: &str, json: &str, key: &str) -> Result<()> {
        let descriptor = FormDescriptor::from_json_str(json).inspect_err(|e| {
            error!("Create form '{}' failed: {}", key, e);
        })?;
        self.create(tree, parent_id, &descriptor, key)
    }

    pub fn destroy(&mut self, tree: &mut dyn UiTree, key: &str) -> Result<()> {
        lifecycle::destroy(&mut self.state, tree, key)
    }

    /// Show the loader ([`FormPhase::Loading`]) or the fields ([`FormPhase::Ready`])
    pub fn set_state(&mut self, tree: &mut dyn UiTree, key: &str, phase: FormPhase) -> Result<()> {
        lifecycle::set_state(&mut self.state, tree, key, phase)
    }

    /// Detach from the page, destroying every form
    pub fn shutdown(mut self, tree: &mut dyn UiTree) {
        let keys: Vec<String> = self.state.forms.keys().map(str::to_string).collect();
        for key in keys {
            if let Err(e) = lifecycle::destroy(&mut self.state, tree, &key) {
                warn!("Could not destroy form '{}': {}", key, e);
            }
        }
        let root = tree.root();
        tree.remove_attribute(root, ATTACH_MARKER);
        info!("Form engine detached");
    }

    // ─────────────────────────────────────────────────────────
    // Values
    // ─────────────────────────────────────────────────────────

    /// Validate `key` and call its submit handler; returns the validity
    pub fn submit_form(&mut self, tree: &mut dyn UiTree, key: &str) -> Result<bool> {
        let (valid, data) = lifecycle::collect_submission(&mut self.state, tree, key)?;
        self.state.forms.dispatch_submit(key, valid, data);
        Ok(valid)
    }

    /// Current values of `key`, without validation
    pub fn values(&self, tree: &dyn UiTree, key: &str) -> Result<FormData> {
        let instance = self
            .state
            .forms
            .get(key)
            .ok_or_else(|| Error::unknown_instance(key))?;
        Ok(instance.gather(tree, self.state.ctx()))
    }

    /// Pre-populate one field
    pub fn set_value(&mut self, tree: &mut dyn UiTree, key: &str, field: &str, value: &Value) -> Result<()> {
        handler::field::set_value(&mut self.state, tree, key, field, value)
    }

    /// Pre-populate several fields from an `{id: value}` object
    pub fn set_values(&mut self, tree: &mut dyn UiTree, key: &str, values: &Map<String, Value>) -> Result<()> {
        for (field, value) in values {
            self.set_value(tree, key, field, value)?;
        }
        Ok(())
    }

    pub fn instance(&self, key: &str) -> Option<&FormInstance> {
        self.state.forms.get(key)
    }

    pub fn form_keys(&self) -> Vec<&str> {
        self.state.forms.keys().collect()
    }

    // ─────────────────────────────────────────────────────────
    // Events
    // ─────────────────────────────────────────────────────────

    /// Route a UI event to the form listening for it
    ///
    /// Returns true when the event was consumed; the host should then suppress
    /// the event's default action (native form submission in particular).
    pub fn handle_event(&mut self, tree: &mut dyn UiTree, event: UiEvent) -> bool {
        let resolved = self.state.forms.owner_of(&*tree, &event).and_then(|key| {
            let instance = self.state.forms.get(key)?;
            let listener = instance.listeners.resolve(&*tree, &event)?;
            Some(Message::from_listener(key, listener))
        });
        match resolved {
            Some(message) => {
                trace!("{:?} -> {:?}", event, message);
                self.process_message(tree, message);
                true
            }
            None => false,
        }
    }

    /// Process a message and every follow-up it produces
    pub fn process_message(&mut self, tree: &mut dyn UiTree, message: Message) {
        let mut msg = Some(message);
        while let Some(m) = msg {
            trace!("Form '{}': {:?}", m.form(), m);
            let result = handler::update(&mut self.state, tree, m);
            if let Some(action) = result.action {
                self.handle_action(action);
            }
            msg = result.message;
        }
    }

    fn handle_action(&mut self, action: UpdateAction) {
        match action {
            UpdateAction::DispatchSubmit { form, valid, data } => {
                self.state.forms.dispatch_submit(&form, valid, data);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonform_ui::Document;

    #[test]
    fn test_register_theme_keeps_extra_classes() {
        let mut page = Document::new();
        page.append_container("host");
        let mut settings = EngineSettings::default();
        settings.engine.theme = "brand".to_string();
        let mut engine = FormEngine::init(&mut page, settings).unwrap();
        assert!(!engine.state.has_configured_theme());

        let controls = ControlClasses {
            submit: "brand-submit".to_string(),
            ..ControlClasses::default()
        };
        let extra = BTreeMap::from([("card".to_string(), "brand-card".to_string())]);
        engine.register_theme(
            "brand",
            FieldClasses::default(),
            FeedbackClasses::default(),
            controls,
            Some(extra),
        );

        assert!(engine.state.has_configured_theme());
        let theme = engine.state.theme();
        assert_eq!(theme.name, "brand");
        assert_eq!(theme.extra.get("card").map(String::as_str), Some("brand-card"));

        let descriptor = FormDescriptor::with_fields(Vec::new());
        engine.create(&mut page, "host", &descriptor, "k").unwrap();
        let submit = page.find_by_id("jsonform-k-submit").unwrap();
        assert!(page.has_class(submit, "brand-submit"));
    }
}
