//! Plain `<input>` kinds

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use jsonform_core::prelude::*;
use jsonform_core::{value_to_text, FieldEntry, FieldValue};
use jsonform_ui::UiTreeExt;
use serde_json::Value;

use super::{decorate_control, finish, label, require_spec, wrapper};
use crate::field_kind::{FieldKind, FieldScope, ListenTarget, ReadScope, Rendered};
use crate::validation::{MessageCategory, Verdict};

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"));

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://[^\s/?#]+[^\s]*$").expect("Invalid url regex")
});

/// Business rule applied to non-empty input values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRule {
    Email,
    Number,
    Url,
    /// ISO `YYYY-MM-DD`
    Date,
}

impl InputRule {
    pub fn check(&self, value: &str) -> Option<Verdict> {
        let ok = match self {
            InputRule::Email => EMAIL_PATTERN.is_match(value),
            InputRule::Number => value.trim().parse::<f64>().is_ok_and(f64::is_finite),
            InputRule::Url => URL_PATTERN.is_match(value),
            InputRule::Date => NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok(),
        };
        if ok {
            return None;
        }
        let message = match self {
            InputRule::Email => "Please enter a valid email address.",
            InputRule::Number => "Please enter a number.",
            InputRule::Url => "Please enter a valid URL.",
            InputRule::Date => "Please enter a valid date.",
        };
        Some(Verdict::invalid(message))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Variant {
    Plain,
    Hidden,
    File,
}

/// `<input type=..>` with label, help text and feedback
#[derive(Debug, Clone)]
pub struct InputKind {
    input_type: &'static str,
    rule: Option<InputRule>,
    variant: Variant,
}

impl InputKind {
    pub fn new(input_type: &'static str) -> Self {
        Self {
            input_type,
            rule: None,
            variant: Variant::Plain,
        }
    }

    /// Invisible input; never labelled
    pub fn hidden() -> Self {
        Self {
            input_type: "hidden",
            rule: None,
            variant: Variant::Hidden,
        }
    }

    /// File picker; the value is whatever path the host reports
    pub fn file() -> Self {
        Self {
            input_type: "file",
            rule: None,
            variant: Variant::File,
        }
    }

    pub fn with_rule(mut self, rule: InputRule) -> Self {
        self.rule = Some(rule);
        self
    }
}

impl FieldKind for InputKind {
    fn create(&self, scope: &mut FieldScope<'_>, entry: &FieldEntry) -> Result<Rendered> {
        let spec = require_spec(entry)?;
        let control_id = scope.control_id(&entry.id);
        let root = wrapper(scope, entry);

        if self.variant == Variant::Hidden {
            scope.tree.set_visible(root, false);
        } else {
            label(scope, root, entry, Some(&control_id))?;
        }

        let input = scope.tree.append_element(root, "input", None)?;
        let input_type = match self.variant {
            Variant::Plain => spec.subtype.as_deref().unwrap_or(self.input_type),
            _ => self.input_type,
        };
        scope.tree.set_attribute(input, "type", input_type);
        let theme = scope.theme;
        let class = match self.variant {
            Variant::File => theme.field.file.as_str(),
            Variant::Hidden => "",
            Variant::Plain => theme.field.input.as_str(),
        };
        decorate_control(scope, input, entry, spec, class);

        let default = spec.default_text();
        if !default.is_empty() && self.variant != Variant::File {
            scope.tree.set_value(input, &default);
        }

        if self.variant == Variant::Hidden {
            return Ok(Rendered::new(root, ListenTarget::None));
        }
        finish(scope, root, entry, spec)?;
        Ok(Rendered::new(root, ListenTarget::Node(input)))
    }

    fn value(&self, scope: &ReadScope<'_>, entry: &FieldEntry) -> FieldValue {
        scope
            .control(&entry.id)
            .and_then(|node| scope.tree.value(node))
            .map(FieldValue::Text)
            .unwrap_or_default()
    }

    fn set_value(&self, scope: &mut FieldScope<'_>, entry: &FieldEntry, value: &Value) -> Result<()> {
        let control_id = scope.control_id(&entry.id);
        let node = scope
            .tree
            .find_by_id(&control_id)
            .ok_or_else(|| Error::node_not_found(format!("#{control_id}")))?;
        scope.tree.set_value(node, &value_to_text(value));
        Ok(())
    }

    fn validate(&self, _scope: &ReadScope<'_>, _entry: &FieldEntry, value: &FieldValue) -> Option<Verdict> {
        let rule = self.rule?;
        value.as_text().and_then(|text| rule.check(text))
    }

    fn empty_message(&self) -> MessageCategory {
        match self.variant {
            Variant::File => MessageCategory::File,
            _ => MessageCategory::Text,
        }
    }

    fn barred_from_validation(&self) -> bool {
        self.variant == Variant::Hidden
    }
}
