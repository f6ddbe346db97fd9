//! Padded (fully defaulted) field entries.
//!
//! Values of these types are produced only by [`crate::padding`] and are
//! immutable afterwards. Runtime state such as a list's item counter lives in
//! the form instance, not here.

use serde_json::{Map, Value};

use crate::descriptor::FieldSize;

/// Smallest and largest column width of the 12-column grid
pub const MIN_WIDTH: u8 = 1;
pub const MAX_WIDTH: u8 = 12;

/// One entry of a form, after padding.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEntry {
    /// Identifier, unique within a form instance
    pub id: String,
    /// Display label
    pub name: String,
    pub body: EntryBody,
    /// The entry as it was supplied, kept for diagnostics
    pub raw: Value,
}

/// Discriminated entry payload (`type` = "field" | "html" | "value")
#[derive(Debug, Clone, PartialEq)]
pub enum EntryBody {
    Field(FieldSpec),
    Html(String),
    Value(Value),
}

impl FieldEntry {
    /// Top-level entry type tag
    pub fn entry_type(&self) -> &'static str {
        match self.body {
            EntryBody::Field(_) => "field",
            EntryBody::Html(_) => "html",
            EntryBody::Value(_) => "value",
        }
    }

    pub fn spec(&self) -> Option<&FieldSpec> {
        match &self.body {
            EntryBody::Field(spec) => Some(spec),
            _ => None,
        }
    }

    /// Field type for "field" entries, the entry type otherwise
    pub fn kind(&self) -> &str {
        match &self.body {
            EntryBody::Field(spec) => &spec.kind,
            _ => self.entry_type(),
        }
    }

    pub fn is_readonly(&self) -> bool {
        self.spec().map(|s| s.readonly).unwrap_or(false)
    }

    pub fn is_required(&self) -> bool {
        self.spec().map(|s| s.required).unwrap_or(false)
    }
}

/// A selectable option: `key` is submitted, `label` is shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOption {
    pub key: String,
    pub label: String,
}

impl FieldOption {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// The `field` sub-object of a "field" entry, with every default applied.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Field type name, looked up in the field registry
    pub kind: String,
    pub required: bool,
    pub readonly: bool,
    pub default_value: Value,
    pub placeholder: String,
    /// Column width in the 12-column grid
    pub width: u8,
    pub helptext: String,
    pub size: FieldSize,
    /// Options in declaration order
    pub options: Vec<FieldOption>,
    /// Visible rows for textareas
    pub rows: Option<u32>,
    /// Upper bound on list entries
    pub maximum_entries: Option<usize>,
    /// Composite sub-fields of a list
    pub fields: Vec<FieldEntry>,
    /// HTML input type override for plain inputs
    pub subtype: Option<String>,
    /// Unrecognised keys, handed through to custom field kinds
    pub extra: Map<String, Value>,
}

impl FieldSpec {
    /// A spec of the given kind with every default applied
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            required: true,
            readonly: false,
            default_value: Value::String(String::new()),
            placeholder: String::new(),
            width: MAX_WIDTH,
            helptext: String::new(),
            size: FieldSize::Normal,
            options: Vec::new(),
            rows: None,
            maximum_entries: None,
            fields: Vec::new(),
            subtype: None,
            extra: Map::new(),
        }
    }

    /// Submitted values of the options, in order
    pub fn option_keys(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|o| o.key.as_str())
    }

    /// Shown labels of the options, in order
    pub fn option_labels(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|o| o.label.as_str())
    }

    /// True for list fields with composite sub-fields
    pub fn is_composite(&self) -> bool {
        !self.fields.is_empty()
    }

    /// The default value rendered as text (`null` becomes empty)
    pub fn default_text(&self) -> String {
        value_to_text(&self.default_value)
    }
}

/// Render a JSON scalar the way it would appear inside an input
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
