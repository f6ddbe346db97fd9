//! The `list` kind: a thin adapter over the list controller

use jsonform_core::prelude::*;
use jsonform_core::{FieldEntry, FieldValue};
use serde_json::Value;

use crate::field_kind::{FieldKind, FieldScope, ReadScope, Rendered};
use crate::list;
use crate::validation::MessageCategory;

#[derive(Debug, Clone, Copy, Default)]
pub struct ListKind;

impl FieldKind for ListKind {
    fn create(&self, scope: &mut FieldScope<'_>, entry: &FieldEntry) -> Result<Rendered> {
        list::initialize(scope, entry)
    }

    fn value(&self, scope: &ReadScope<'_>, entry: &FieldEntry) -> FieldValue {
        list::values(scope, &entry.id)
    }

    fn set_value(&self, scope: &mut FieldScope<'_>, entry: &FieldEntry, value: &Value) -> Result<()> {
        list::set_rows(scope, entry, value)
    }

    fn empty_message(&self) -> MessageCategory {
        MessageCategory::List
    }
}
