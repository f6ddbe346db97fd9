//! Descriptor padding
//!
//! Pure functions from a raw [`FormDescriptor`] to a fully defaulted
//! [`FormConfig`]. The input is never mutated. Entries that lack a mandatory
//! key are returned as [`Rejected`] so the renderer can show a diagnostic in
//! their slot while the rest of the form still builds.

use std::fmt;

use serde_json::{Map, Value};

use crate::descriptor::{ButtonOrientation, FieldSize, FormDescriptor};
use crate::error::Error;
use crate::field::{value_to_text, EntryBody, FieldEntry, FieldOption, FieldSpec, MAX_WIDTH, MIN_WIDTH};

/// Keys of the `field` object that padding understands; everything else
/// lands in [`FieldSpec::extra`]. `ct` is runtime-only and dropped.
const KNOWN_SPEC_KEYS: &[&str] = &[
    "type",
    "required",
    "readonly",
    "default_value",
    "placeholder",
    "width",
    "helptext",
    "size",
    "options",
    "rows",
    "maximum_entries",
    "fields",
    "subtype",
    "ct",
];

/// Engine-level defaults applied when a descriptor leaves a key out
#[derive(Debug, Clone, PartialEq)]
pub struct FormDefaults {
    pub hide_validation: bool,
    pub submit_text: String,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            hide_validation: true,
            submit_text: "Submit".to_string(),
        }
    }
}

/// A padded entry, or the reason it could not be padded
pub type PaddedEntry = std::result::Result<FieldEntry, Rejected>;

/// Fully defaulted form configuration
#[derive(Debug, Clone, PartialEq)]
pub struct FormConfig {
    /// Entries in descriptor order
    pub entries: Vec<PaddedEntry>,
    /// The descriptor had no `fields` key at all
    pub fields_missing: bool,
    pub submit_button_text: String,
    pub cancel_button_text: String,
    pub hide_validation: bool,
    pub button_orientation: ButtonOrientation,
    pub form_controls_id: Option<String>,
}

impl FormConfig {
    /// Successfully padded entries, in order
    pub fn fields(&self) -> impl Iterator<Item = &FieldEntry> {
        self.entries.iter().filter_map(|e| e.as_ref().ok())
    }

    pub fn rejected(&self) -> impl Iterator<Item = &Rejected> {
        self.entries.iter().filter_map(|e| e.as_ref().err())
    }
}

/// Why an entry was turned away by padding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    NotAnObject,
    MissingKey(&'static str),
    UnknownEntryType(String),
}

/// An entry that failed padding, carrying what is known about it
#[derive(Debug, Clone, PartialEq)]
pub struct Rejected {
    pub id: Option<String>,
    pub reason: RejectReason,
    pub raw: Value,
}

impl Rejected {
    fn new(raw: &Value, id: Option<String>, reason: RejectReason) -> Self {
        Self {
            id,
            reason,
            raw: raw.clone(),
        }
    }

    /// The id for messages, or a placeholder when it is missing
    pub fn display_id(&self) -> &str {
        self.id.as_deref().unwrap_or("<unnamed>")
    }

    pub fn to_error(&self) -> Error {
        match &self.reason {
            RejectReason::NotAnObject => Error::missing_key(self.display_id(), "id"),
            RejectReason::MissingKey(key) => Error::missing_key(self.display_id(), *key),
            RejectReason::UnknownEntryType(t) => Error::UnknownEntryType {
                field: self.display_id().to_string(),
                entry_type: t.clone(),
            },
        }
    }
}

impl fmt::Display for Rejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_error())
    }
}

/// Pad a whole descriptor
pub fn pad_form(raw: &FormDescriptor, defaults: &FormDefaults) -> FormConfig {
    let orientation = match raw.button_orientation.as_deref() {
        None => ButtonOrientation::default(),
        Some(s) => ButtonOrientation::parse(s).unwrap_or_else(|| {
            tracing::warn!("Unknown button_orientation '{}', using right", s);
            ButtonOrientation::default()
        }),
    };

    let entries = raw
        .fields
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(pad_field)
        .collect();

    FormConfig {
        entries,
        fields_missing: raw.fields.is_none(),
        submit_button_text: raw
            .submit_button_text
            .clone()
            .unwrap_or_else(|| defaults.submit_text.clone()),
        cancel_button_text: raw.cancel_button_text.clone().unwrap_or_default(),
        hide_validation: raw.hide_validation.unwrap_or(defaults.hide_validation),
        button_orientation: orientation,
        form_controls_id: raw.form_controls_id.clone().filter(|s| !s.is_empty()),
    }
}

/// Pad a single entry
pub fn pad_field(raw: &Value) -> PaddedEntry {
    let Some(obj) = raw.as_object() else {
        return Err(Rejected::new(raw, None, RejectReason::NotAnObject));
    };

    let id = obj.get("id").and_then(as_string);
    let Some(id) = id.filter(|s| !s.is_empty()) else {
        return Err(Rejected::new(raw, None, RejectReason::MissingKey("id")));
    };
    let reject = |reason| Err(Rejected::new(raw, Some(id.clone()), reason));

    let Some(name) = obj.get("name").and_then(as_string) else {
        return reject(RejectReason::MissingKey("name"));
    };
    let Some(entry_type) = obj.get("type").and_then(Value::as_str) else {
        return reject(RejectReason::MissingKey("type"));
    };

    let body = match entry_type {
        "field" => {
            let Some(field) = obj.get("field").and_then(Value::as_object) else {
                return reject(RejectReason::MissingKey("field"));
            };
            match pad_spec(&id, field) {
                Some(spec) => EntryBody::Field(spec),
                None => return reject(RejectReason::MissingKey("field.type")),
            }
        }
        "html" => match obj.get("html").and_then(Value::as_str) {
            Some(html) => EntryBody::Html(html.to_string()),
            None => return reject(RejectReason::MissingKey("html")),
        },
        "value" => match obj.get("value") {
            Some(value) => EntryBody::Value(value.clone()),
            None => return reject(RejectReason::MissingKey("value")),
        },
        other => return reject(RejectReason::UnknownEntryType(other.to_string())),
    };

    Ok(FieldEntry {
        id,
        name,
        body,
        raw: raw.clone(),
    })
}

/// Pad the `field` sub-object; `None` when it has no `type`
fn pad_spec(id: &str, field: &Map<String, Value>) -> Option<FieldSpec> {
    let kind = field.get("type").and_then(Value::as_str)?;
    let mut spec = FieldSpec::new(kind);

    if let Some(required) = field.get("required").and_then(as_bool) {
        spec.required = required;
    }
    if let Some(readonly) = field.get("readonly").and_then(as_bool) {
        spec.readonly = readonly;
    }
    if let Some(default_value) = field.get("default_value") {
        spec.default_value = default_value.clone();
    }
    if let Some(placeholder) = field.get("placeholder").and_then(as_string) {
        spec.placeholder = placeholder;
    }
    if let Some(width) = field.get("width") {
        spec.width = parse_width(id, width);
    }
    if let Some(helptext) = field.get("helptext").and_then(as_string) {
        spec.helptext = helptext;
    }
    if let Some(size) = field.get("size").and_then(Value::as_str) {
        spec.size = FieldSize::parse(size).unwrap_or_else(|| {
            tracing::debug!("Field '{}': unknown size '{}', using normal", id, size);
            FieldSize::Normal
        });
    }
    if let Some(options) = field.get("options") {
        spec.options = parse_options(options);
    }
    spec.rows = field.get("rows").and_then(as_u64).map(|n| n as u32);
    spec.maximum_entries = field
        .get("maximum_entries")
        .and_then(as_u64)
        .map(|n| n as usize);
    spec.subtype = field
        .get("subtype")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    if let Some(sub_fields) = field.get("fields").and_then(Value::as_array) {
        for sub in sub_fields {
            match pad_field(sub) {
                Ok(entry) => spec.fields.push(entry),
                Err(rejected) => {
                    tracing::error!("Field '{}': dropping sub-field: {}", id, rejected)
                }
            }
        }
    }

    spec.extra = field
        .iter()
        .filter(|(k, _)| !KNOWN_SPEC_KEYS.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    Some(spec)
}

/// Options as a mapping (`key -> label`, order kept) or an array
pub fn parse_options(raw: &Value) -> Vec<FieldOption> {
    match raw {
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| FieldOption::new(k.clone(), value_to_text(v)))
            .collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::Object(obj) => {
                    let key = obj.get("key").or_else(|| obj.get("value")).map(value_to_text)?;
                    let label = obj
                        .get("label")
                        .map(value_to_text)
                        .unwrap_or_else(|| key.clone());
                    Some(FieldOption::new(key, label))
                }
                Value::Null => None,
                scalar => {
                    let text = value_to_text(scalar);
                    Some(FieldOption::new(text.clone(), text))
                }
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn parse_width(id: &str, raw: &Value) -> u8 {
    let requested = match raw {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    let Some(requested) = requested else {
        tracing::warn!("Field '{}': unreadable width {}, using {}", id, raw, MAX_WIDTH);
        return MAX_WIDTH;
    };
    let clamped = requested.clamp(MIN_WIDTH as i64, MAX_WIDTH as i64);
    if clamped != requested {
        tracing::warn!(
            "Field '{}': width {} outside {}..={}, clamped to {}",
            id,
            requested,
            MIN_WIDTH,
            MAX_WIDTH,
            clamped
        );
    }
    clamped as u8
}

fn as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        _ => None,
    }
}

fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
