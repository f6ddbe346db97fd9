//! Field values read back from the UI and the submitted payload.

use serde_json::{Map, Value};

/// Submitted form data: field id to value, in field-map insertion order
pub type FormData = Map<String, Value>;

/// The current value of one field, as read by its field kind
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    /// Nothing could be read (control missing, nothing selected)
    #[default]
    Empty,
    Text(String),
    Bool(bool),
    List(ListValue),
    Json(Value),
}

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Falsy values fail a `required` check
    pub fn is_falsy(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.is_empty(),
            Self::Bool(b) => !b,
            Self::List(list) => list.is_empty(),
            Self::Json(v) => match v {
                Value::Null => true,
                Value::Bool(b) => !b,
                Value::String(s) => s.is_empty(),
                Value::Array(a) => a.is_empty(),
                Value::Object(o) => o.is_empty(),
                Value::Number(_) => false,
            },
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Json(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// JSON form used in the submit payload
    pub fn to_json(&self) -> Value {
        match self {
            Self::Empty => Value::Null,
            Self::Text(s) => Value::String(s.clone()),
            Self::Bool(b) => Value::Bool(*b),
            Self::List(list) => list.to_json(),
            Self::Json(v) => v.clone(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// One row of a repeating group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    /// Item counter assigned when the row was added; never reused
    pub counter: u32,
    /// Sub-field id (or `"1"` for single-slot lists) to value, in column order
    pub cells: Vec<(String, String)>,
}

impl ListEntry {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// All rows of a repeating group, ascending by counter. Gaps are normal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListValue {
    pub entries: Vec<ListEntry>,
}

impl ListValue {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, counter: u32) -> Option<&ListEntry> {
        self.entries.iter().find(|e| e.counter == counter)
    }

    /// `{ "<counter>": { "<sub-id>": "<value>" } }`
    pub fn to_json(&self) -> Value {
        let mut out = Map::new();
        for entry in &self.entries {
            let cells: Map<String, Value> = entry
                .cells
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect();
            out.insert(entry.counter.to_string(), Value::Object(cells));
        }
        Value::Object(out)
    }
}
