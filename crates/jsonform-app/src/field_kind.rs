//! Field kinds: the capability bundle behind a field `type`.
//!
//! A `FieldKind` knows how to build the UI subtree for one field, read its
//! current value back, and optionally validate it. Built-in kinds live in
//! [`crate::kinds`]; hosts add their own either by implementing the trait or
//! through the closure-based [`CustomField`].
//!
//! # Lifecycle
//!
//! 1. `create()` builds a detached subtree; the renderer attaches it to the
//!    form body and wires the change listener named by [`Rendered::listen`]
//! 2. `on_update()` runs after every change event with the freshly read value
//! 3. `value()` is called on validation and submit; it must not mutate anything
//! 4. `validate()` adds field-specific checks on top of the `required` check

use std::fmt;

use jsonform_core::prelude::*;
use jsonform_core::{FieldEntry, FieldValue};
use jsonform_ui::{EventKind, NodeId, Theme, UiTree};
use serde_json::Value;

use crate::config::EngineSettings;
use crate::list::ListStore;
use crate::listeners::{Listener, ListenerTable};
use crate::registry::FieldRegistry;
use crate::validation::{MessageCategory, Verdict};

/// Where the renderer should listen for change events of a new field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenTarget {
    /// A single control node
    Node(NodeId),
    /// Every control sharing a `name` attribute (radio groups)
    Name(String),
    /// The kind registers its own listeners
    None,
}

/// Result of [`FieldKind::create`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Root of the detached field subtree
    pub root: NodeId,
    pub listen: ListenTarget,
}

impl Rendered {
    pub fn new(root: NodeId, listen: ListenTarget) -> Self {
        Self { root, listen }
    }
}

/// Mutable view of one form handed to a kind while it builds or updates a field
pub struct FieldScope<'a> {
    pub tree: &'a mut dyn UiTree,
    /// Id prefix for every element of this form (`jsonform-{key}`)
    pub form_id: &'a str,
    pub theme: &'a Theme,
    pub settings: &'a EngineSettings,
    pub registry: &'a FieldRegistry,
    pub listeners: &'a mut ListenerTable,
    pub lists: &'a mut ListStore,
}

impl<'a> FieldScope<'a> {
    /// Element id of a field's control: `{form_id}-{field_id}`
    pub fn control_id(&self, field_id: &str) -> String {
        control_id(self.form_id, field_id)
    }

    /// Register a listener for `kind` events on `node`
    pub fn listen(&mut self, node: NodeId, kind: EventKind, listener: Listener) {
        self.listeners.listen(node, kind, listener);
    }

    /// Read-only view of the same form
    pub fn read(&self) -> ReadScope<'_> {
        ReadScope {
            tree: &*self.tree,
            form_id: self.form_id,
            lists: &*self.lists,
        }
    }

    /// The same scope with a different id prefix, used for list staging rows
    /// and persisted list items
    pub fn nested<'b>(&'b mut self, form_id: &'b str) -> FieldScope<'b> {
        FieldScope {
            tree: &mut *self.tree,
            form_id,
            theme: self.theme,
            settings: self.settings,
            registry: self.registry,
            listeners: &mut *self.listeners,
            lists: &mut *self.lists,
        }
    }
}

/// Read-only view of one form, used when reading values back
#[derive(Clone, Copy)]
pub struct ReadScope<'a> {
    pub tree: &'a dyn UiTree,
    pub form_id: &'a str,
    pub lists: &'a ListStore,
}

impl<'a> ReadScope<'a> {
    pub fn control_id(&self, field_id: &str) -> String {
        control_id(self.form_id, field_id)
    }

    /// The attached control node of a field, if it exists
    pub fn control(&self, field_id: &str) -> Option<NodeId> {
        self.tree.find_by_id(&self.control_id(field_id))
    }

    pub fn with_prefix(self, form_id: &'a str) -> ReadScope<'a> {
        ReadScope { form_id, ..self }
    }
}

pub fn control_id(form_id: &str, field_id: &str) -> String {
    format!("{}-{}", form_id, field_id)
}

/// Capability bundle for one field type.
///
/// Only `create` and `value` are mandatory; the remaining hooks default to
/// no-ops so simple kinds stay small.
pub trait FieldKind: fmt::Debug {
    /// Build the subtree for `entry`. Errors become a diagnostic placeholder.
    fn create(&self, scope: &mut FieldScope<'_>, entry: &FieldEntry) -> Result<Rendered>;

    /// Read the current value of `entry`. Must be side-effect free.
    fn value(&self, scope: &ReadScope<'_>, entry: &FieldEntry) -> FieldValue;

    /// Write a value into the rendered controls (pre-population, reset)
    fn set_value(&self, _scope: &mut FieldScope<'_>, entry: &FieldEntry, _value: &Value) -> Result<()> {
        Err(Error::render(&entry.id, "field kind does not support setting values"))
    }

    /// Called after every change event with the value just read
    fn on_update(&self, _scope: &ReadScope<'_>, _entry: &FieldEntry, _value: &FieldValue) {}

    /// Field-specific validation, run after the `required` check passed
    fn validate(&self, _scope: &ReadScope<'_>, _entry: &FieldEntry, _value: &FieldValue) -> Option<Verdict> {
        None
    }

    /// Which required-field message applies when the value is empty
    fn empty_message(&self) -> MessageCategory {
        MessageCategory::Text
    }

    /// True for controls the user can neither see nor edit; they are never
    /// validated, `required` included
    fn barred_from_validation(&self) -> bool {
        false
    }
}

type CreateFn = dyn Fn(&mut FieldScope<'_>, &FieldEntry) -> Result<Rendered>;
type ValueFn = dyn Fn(&ReadScope<'_>, &FieldEntry) -> FieldValue;
type SetValueFn = dyn Fn(&mut FieldScope<'_>, &FieldEntry, &Value) -> Result<()>;
type UpdateFn = dyn Fn(&ReadScope<'_>, &FieldEntry, &FieldValue);
type ValidateFn = dyn Fn(&ReadScope<'_>, &FieldEntry, &FieldValue) -> Option<Verdict>;

/// A field kind assembled from closures
///
/// ```ignore
/// let kind = CustomField::new(create_rating, read_rating)
///     .on_validate(|_, _, value| (value.as_text() == Some("0")).then(|| Verdict::invalid("Pick a rating")));
/// ```
pub struct CustomField {
    on_create: Box<CreateFn>,
    get_value: Box<ValueFn>,
    set_value: Option<Box<SetValueFn>>,
    on_update: Option<Box<UpdateFn>>,
    on_validate: Option<Box<ValidateFn>>,
    empty_message: MessageCategory,
}

impl CustomField {
    pub fn new(
        on_create: impl Fn(&mut FieldScope<'_>, &FieldEntry) -> Result<Rendered> + 'static,
        get_value: impl Fn(&ReadScope<'_>, &FieldEntry) -> FieldValue + 'static,
    ) -> Self {
        Self {
            on_create: Box::new(on_create),
            get_value: Box::new(get_value),
            set_value: None,
            on_update: None,
            on_validate: None,
            empty_message: MessageCategory::Text,
        }
    }

    pub fn on_set_value(
        mut self,
        f: impl Fn(&mut FieldScope<'_>, &FieldEntry, &Value) -> Result<()> + 'static,
    ) -> Self {
        self.set_value = Some(Box::new(f));
        self
    }

    pub fn on_update(mut self, f: impl Fn(&ReadScope<'_>, &FieldEntry, &FieldValue) + 'static) -> Self {
        self.on_update = Some(Box::new(f));
        self
    }

    pub fn on_validate(
        mut self,
        f: impl Fn(&ReadScope<'_>, &FieldEntry, &FieldValue) -> Option<Verdict> + 'static,
    ) -> Self {
        self.on_validate = Some(Box::new(f));
        self
    }

    pub fn with_empty_message(mut self, category: MessageCategory) -> Self {
        self.empty_message = category;
        self
    }
}

impl fmt::Debug for CustomField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomField")
            .field("set_value", &self.set_value.is_some())
            .field("on_update", &self.on_update.is_some())
            .field("on_validate", &self.on_validate.is_some())
            .field("empty_message", &self.empty_message)
            .finish()
    }
}

impl FieldKind for CustomField {
    fn create(&self, scope: &mut FieldScope<'_>, entry: &FieldEntry) -> Result<Rendered> {
        (self.on_create)(scope, entry)
    }

    fn value(&self, scope: &ReadScope<'_>, entry: &FieldEntry) -> FieldValue {
        (self.get_value)(scope, entry)
    }

    fn set_value(&self, scope: &mut FieldScope<'_>, entry: &FieldEntry, value: &Value) -> Result<()> {
        match &self.set_value {
            Some(f) => f(scope, entry, value),
            None => Err(Error::render(&entry.id, "field kind does not support setting values")),
        }
    }

    fn on_update(&self, scope: &ReadScope<'_>, entry: &FieldEntry, value: &FieldValue) {
        if let Some(f) = &self.on_update {
            f(scope, entry, value);
        }
    }

    fn validate(&self, scope: &ReadScope<'_>, entry: &FieldEntry, value: &FieldValue) -> Option<Verdict> {
        self.on_validate.as_ref().and_then(|f| f(scope, entry, value))
    }

    fn empty_message(&self) -> MessageCategory {
        self.empty_message
    }
}
