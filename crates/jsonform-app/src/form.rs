//! One form instance: its regions, field map, listeners and list state.
//!
//! A form is built by [`build`] into a host container and then driven by
//! messages. Its element id is `jsonform-{key}`; every field control id is
//! prefixed with it.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use jsonform_core::prelude::*;
use jsonform_core::{
    pad_form, ButtonOrientation, EntryBody, FieldEntry, FormConfig, FormData, FormDefaults,
    FormDescriptor,
};
use jsonform_ui::{EventKind, NodeId, UiTree, UiTreeExt};
use serde_json::Value;

use crate::field_kind::{control_id, FieldScope};
use crate::list::ListStore;
use crate::listeners::{Listener, ListenerTable};
use crate::renderer::{self, Outcome};
use crate::state::Ctx;
use crate::validation::{annotate, check_field, clear_annotation, Verdict};

/// Markup that already provides a submit control
static SUBMIT_BUTTON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<button[^>]*\btype\s*=\s*["']?submit"#).expect("Invalid submit button regex")
});

/// Lifecycle of a form instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    /// Chrome built, fields still being rendered
    #[default]
    Uninitialized,
    /// Loader shown, body hidden (async pre-population)
    Loading,
    Ready,
    /// Terminal
    Destroyed,
}

/// Callback receiving `(valid, data)`; `data` is `None` when invalid
pub struct SubmitHandler(Box<dyn FnMut(bool, Option<FormData>)>);

impl SubmitHandler {
    pub fn new(f: impl FnMut(bool, Option<FormData>) + 'static) -> Self {
        Self(Box::new(f))
    }

    pub fn call(&mut self, valid: bool, data: Option<FormData>) {
        (self.0)(valid, data)
    }
}

impl fmt::Debug for SubmitHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SubmitHandler")
    }
}

/// Element ids of a form's regions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regions {
    pub form: NodeId,
    pub loader: NodeId,
    pub body: NodeId,
    pub controls: NodeId,
}

#[derive(Debug)]
pub struct FormInstance {
    pub key: String,
    /// `jsonform-{key}`
    pub form_id: String,
    pub config: FormConfig,
    pub phase: FormPhase,
    pub regions: Regions,
    /// Submit/cancel block, possibly outside the form (`form_controls_id`)
    pub buttons: Option<NodeId>,
    /// Field map in insertion order
    fields: Vec<FieldEntry>,
    pub listeners: ListenerTable,
    pub lists: ListStore,
    pub submit_handler: Option<SubmitHandler>,
}

pub fn form_id(key: &str) -> String {
    format!("jsonform-{}", key)
}

impl FormInstance {
    pub fn fields(&self) -> &[FieldEntry] {
        &self.fields
    }

    pub fn field(&self, id: &str) -> Option<&FieldEntry> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Add to the field map; a duplicate id replaces the earlier entry in place
    pub fn register_field(&mut self, entry: FieldEntry) {
        match self.fields.iter_mut().find(|f| f.id == entry.id) {
            Some(existing) => {
                warn!("Duplicate field id '{}' in form '{}', overwriting", entry.id, self.key);
                *existing = entry;
            }
            None => self.fields.push(entry),
        }
    }

    /// A field scope over this instance
    pub(crate) fn scope<'a>(&'a mut self, tree: &'a mut dyn UiTree, ctx: Ctx<'a>) -> FieldScope<'a> {
        FieldScope {
            tree,
            form_id: &self.form_id,
            theme: ctx.theme,
            settings: ctx.settings,
            registry: ctx.registry,
            listeners: &mut self.listeners,
            lists: &mut self.lists,
        }
    }

    pub fn control_id(&self, field_id: &str) -> String {
        control_id(&self.form_id, field_id)
    }

    /// Show the loader or the body
    pub fn set_phase(&mut self, tree: &mut dyn UiTree, ctx: Ctx<'_>, phase: FormPhase) -> Result<()> {
        let Regions {
            loader,
            body,
            controls,
            ..
        } = self.regions;
        match phase {
            FormPhase::Loading => {
                tree.set_visible(loader, true);
                tree.set_visible(body, false);
                tree.set_visible(controls, false);
                if let Some(buttons) = self.buttons {
                    tree.set_visible(buttons, false);
                }
            }
            FormPhase::Ready => {
                tree.set_visible(loader, false);
                for region in [Some(body), Some(controls), self.buttons].into_iter().flatten() {
                    tree.set_visible(region, true);
                    tree.add_classes(region, &ctx.theme.controls.reveal);
                }
            }
            FormPhase::Uninitialized | FormPhase::Destroyed => {
                return Err(Error::config(format!(
                    "Form '{}' cannot be switched to {:?}",
                    self.key, phase
                )));
            }
        }
        debug!("Form '{}': {:?} -> {:?}", self.key, self.phase, phase);
        self.phase = phase;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────
    // Values
    // ─────────────────────────────────────────────────────────────

    /// Current values of every field, in field-map order
    ///
    /// Read-only fields contribute their `default_value`, except lists, whose
    /// rows are always enumerated. Value entries contribute their value; html
    /// entries nothing.
    pub fn gather(&self, tree: &dyn UiTree, ctx: Ctx<'_>) -> FormData {
        let read = crate::field_kind::ReadScope {
            tree,
            form_id: &self.form_id,
            lists: &self.lists,
        };
        let mut data = FormData::new();
        for entry in &self.fields {
            match &entry.body {
                EntryBody::Value(value) => {
                    data.insert(entry.id.clone(), value.clone());
                }
                EntryBody::Html(_) => {}
                EntryBody::Field(spec) => {
                    if spec.readonly && spec.kind != "list" {
                        data.insert(entry.id.clone(), spec.default_value.clone());
                        continue;
                    }
                    match ctx.registry.get(&spec.kind) {
                        Some(kind) => {
                            data.insert(entry.id.clone(), kind.value(&read, entry).to_json());
                        }
                        None => warn!("Field '{}' lost its kind '{}'", entry.id, spec.kind),
                    }
                }
            }
        }
        data
    }

    /// Write a value into one field's controls
    pub fn set_value(&mut self, tree: &mut dyn UiTree, ctx: Ctx<'_>, field: &str, value: &Value) -> Result<()> {
        let entry = self
            .field(field)
            .cloned()
            .ok_or_else(|| Error::config(format!("Form '{}' has no field '{}'", self.key, field)))?;
        let kind = ctx
            .registry
            .get(entry.kind())
            .ok_or_else(|| Error::unknown_field_type(&entry.id, entry.kind()))?;
        kind.set_value(&mut self.scope(tree, ctx), &entry, value)
    }

    // ─────────────────────────────────────────────────────────────
    // Validation
    // ─────────────────────────────────────────────────────────────

    /// Validate and annotate one field
    ///
    /// Also runs the kind's `on_update` hook with the value just read.
    pub fn validate_field(&mut self, tree: &mut dyn UiTree, ctx: Ctx<'_>, field: &str) -> Option<Verdict> {
        let entry = self.field(field)?.clone();
        let kind = ctx.registry.get(entry.kind())?;
        let verdict = {
            let read = crate::field_kind::ReadScope {
                tree: &*tree,
                form_id: &self.form_id,
                lists: &self.lists,
            };
            let value = kind.value(&read, &entry);
            kind.on_update(&read, &entry, &value);
            if entry.is_readonly() {
                Verdict::valid()
            } else {
                crate::validation::check_value(
                    kind.as_ref(),
                    &read,
                    &entry,
                    &value,
                    &ctx.settings.validation.messages,
                )
            }
        };
        annotate(
            tree,
            ctx.theme,
            &self.control_id(&entry.id),
            &verdict,
            self.config.hide_validation,
        );
        Some(verdict)
    }

    /// Validate and annotate every field; true when all pass
    pub fn validate_all(&mut self, tree: &mut dyn UiTree, ctx: Ctx<'_>) -> bool {
        let mut all_valid = true;
        for entry in &self.fields {
            let Some(spec) = entry.spec() else {
                continue;
            };
            let Some(kind) = ctx.registry.get(&spec.kind) else {
                continue;
            };
            let verdict = {
                let read = crate::field_kind::ReadScope {
                    tree: &*tree,
                    form_id: &self.form_id,
                    lists: &self.lists,
                };
                check_field(kind.as_ref(), &read, entry, &ctx.settings.validation.messages)
            };
            if !verdict.valid {
                debug!("Field '{}' invalid: {}", entry.id, verdict.message);
            }
            all_valid &= verdict.valid;
            annotate(
                tree,
                ctx.theme,
                &control_id(&self.form_id, &entry.id),
                &verdict,
                self.config.hide_validation,
            );
        }
        all_valid
    }

    /// Put every field back to its default value and clear annotations
    pub fn reset(&mut self, tree: &mut dyn UiTree, ctx: Ctx<'_>) {
        let entries: Vec<FieldEntry> = self.fields.iter().filter(|e| e.spec().is_some()).cloned().collect();
        for entry in &entries {
            let Some(spec) = entry.spec() else {
                continue;
            };
            if let Some(kind) = ctx.registry.get(&spec.kind) {
                if let Err(e) = kind.set_value(&mut self.scope(tree, ctx), entry, &spec.default_value) {
                    debug!("Could not reset field '{}': {}", entry.id, e);
                }
            }
            clear_annotation(tree, ctx.theme, &self.control_id(&entry.id));
        }
        debug!("Form '{}' reset", self.key);
    }
}

// ─────────────────────────────────────────────────────────────────
// Building
// ─────────────────────────────────────────────────────────────────

/// Build a form into the element with id `parent_id`
///
/// Renders the chrome (loader, body, controls), every entry in descriptor
/// order and the button block, then switches to [`FormPhase::Ready`].
pub fn build(
    tree: &mut dyn UiTree,
    ctx: Ctx<'_>,
    parent_id: &str,
    descriptor: &FormDescriptor,
    key: &str,
) -> Result<FormInstance> {
    let parent = tree
        .find_by_id(parent_id)
        .ok_or_else(|| Error::container_not_found(parent_id))?;

    let defaults = FormDefaults {
        hide_validation: ctx.settings.validation.hide_validation,
        submit_text: ctx.settings.controls.submit_text.clone(),
    };
    let mut config = pad_form(descriptor, &defaults);
    let id = form_id(key);
    let theme = ctx.theme;

    let form = tree.append_element(parent, "form", Some(&id))?;
    tree.set_attribute(form, "novalidate", "");

    let loader = tree.append_element(form, "div", Some(&format!("{}-loader", id)))?;
    tree.add_classes(loader, &theme.controls.loader);
    let body = tree.append_element(form, "div", Some(&format!("{}-body", id)))?;
    tree.add_classes(body, &theme.field.row);
    tree.set_visible(body, false);
    let controls = tree.append_element(form, "div", Some(&format!("{}-controls", id)))?;
    tree.add_classes(controls, &theme.controls.wrapper);
    tree.set_visible(controls, false);

    let entries = std::mem::take(&mut config.entries);
    let mut instance = FormInstance {
        key: key.to_string(),
        form_id: id,
        config,
        phase: FormPhase::Uninitialized,
        regions: Regions {
            form,
            loader,
            body,
            controls,
        },
        buttons: None,
        fields: Vec::new(),
        listeners: ListenerTable::new(),
        lists: ListStore::default(),
        submit_handler: None,
    };
    instance.listeners.listen(form, EventKind::Submit, Listener::Submit);

    if instance.config.fields_missing {
        error!("Create form '{}' failed: form is missing the 'fields' key", key);
    }

    let debug = ctx.settings.engine.debug;
    for entry in &entries {
        let outcome = renderer::render_entry(&mut instance.scope(tree, ctx), body, entry, debug);
        if let (Outcome::Field { .. }, Ok(entry)) = (&outcome, entry) {
            instance.register_field(entry.clone());
        }
    }

    let has_submit = entries.iter().flatten().any(|e| match &e.body {
        EntryBody::Html(markup) => SUBMIT_BUTTON.is_match(markup),
        _ => false,
    });
    instance.config.entries = entries;
    instance.buttons = build_buttons(tree, ctx, &mut instance, has_submit)?;

    instance.set_phase(tree, ctx, FormPhase::Ready)?;
    info!(
        "Created form '{}' with {} field(s)",
        instance.key,
        instance.fields.len()
    );
    Ok(instance)
}

/// Submit/cancel block, aligned per `button_orientation`
fn build_buttons(
    tree: &mut dyn UiTree,
    ctx: Ctx<'_>,
    instance: &mut FormInstance,
    has_submit: bool,
) -> Result<Option<NodeId>> {
    let cancel_text = instance.config.cancel_button_text.clone();
    if has_submit && cancel_text.is_empty() {
        debug!("Form '{}' brings its own submit button", instance.key);
        return Ok(None);
    }

    let target = match &instance.config.form_controls_id {
        Some(id) => tree.find_by_id(id).unwrap_or_else(|| {
            warn!(
                "form_controls_id '#{}' not found, using the form's controls region",
                id
            );
            instance.regions.controls
        }),
        None => instance.regions.controls,
    };

    let theme = ctx.theme;
    let block = tree.append_element(target, "div", Some(&format!("{}-buttons", instance.form_id)))?;
    let align = match instance.config.button_orientation {
        ButtonOrientation::Left => &theme.controls.align_left,
        ButtonOrientation::Center => &theme.controls.align_center,
        ButtonOrientation::Right => &theme.controls.align_right,
    };
    tree.add_classes(block, align);

    if !cancel_text.is_empty() {
        let cancel = tree.append_element(block, "button", Some(&format!("{}-cancel", instance.form_id)))?;
        tree.set_attribute(cancel, "type", "button");
        tree.add_classes(cancel, &theme.controls.cancel);
        tree.set_text(cancel, &cancel_text);
        instance.listeners.listen(cancel, EventKind::Click, Listener::Cancel);
    }

    if !has_submit {
        let submit = tree.append_element(block, "button", Some(&format!("{}-submit", instance.form_id)))?;
        tree.set_attribute(submit, "type", "submit");
        tree.add_classes(submit, &theme.controls.submit);
        tree.set_text(submit, &instance.config.submit_button_text);
        instance.listeners.listen(submit, EventKind::Click, Listener::Submit);
    }

    Ok(Some(block))
}
