//! Repeating group (list) controller.
//!
//! A list field owns an in-memory, counter-addressed collection of rows. The
//! UI renders from it and cell edits write back into it, so reading a list's
//! value never touches the UI tree.
//!
//! ```text
//! Uninitialized --initialize--> Ready --add/remove--> Ready
//! ```
//!
//! Counters start at 1 and only ever grow; removing a row leaves a gap.

use std::collections::HashMap;

use jsonform_core::prelude::*;
use jsonform_core::{value_to_text, FieldEntry, FieldSpec, FieldValue, ListEntry, ListValue};
use jsonform_ui::{EventKind, NodeId, UiTreeExt};
use serde_json::Value;

use crate::field_kind::{FieldKind, FieldScope, ListenTarget, ReadScope, Rendered};
use crate::listeners::Listener;
use crate::validation::{annotate, Verdict};

/// Slot id used by lists without composite sub-fields
pub const SINGLE_SLOT: &str = "1";

/// Columns shared by the slots of a row; the Add/Remove control gets the rest
const SLOT_COLUMNS: u8 = 10;
const GRID_COLUMNS: u8 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListPhase {
    #[default]
    Uninitialized,
    Ready,
}

/// One persisted row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub counter: u32,
    pub cells: Vec<(String, String)>,
    /// Row element in the UI tree
    pub row: NodeId,
}

/// Controller state of one list field
#[derive(Debug, Clone)]
pub struct ListState {
    pub field: String,
    pub phase: ListPhase,
    /// Highest counter handed out so far
    pub ct: u32,
    /// Rows in ascending counter order
    pub items: Vec<ListItem>,
    /// Sub-field entries, widths already applied
    slots: Vec<FieldEntry>,
    /// Container rows are prepended to
    items_node: Option<NodeId>,
    readonly: bool,
    maximum: Option<usize>,
}

impl ListState {
    fn new(field: &str, spec: &FieldSpec, slots: Vec<FieldEntry>) -> Self {
        Self {
            field: field.to_string(),
            phase: ListPhase::Uninitialized,
            ct: 0,
            items: Vec::new(),
            slots,
            items_node: None,
            readonly: spec.readonly,
            maximum: spec.maximum_entries,
        }
    }

    /// Current rows as a list value
    pub fn values(&self) -> ListValue {
        ListValue {
            entries: self
                .items
                .iter()
                .map(|item| ListEntry {
                    counter: item.counter,
                    cells: item.cells.clone(),
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn slot_ids(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|s| s.id.as_str())
    }

    fn item(&self, counter: u32) -> Option<&ListItem> {
        self.items.iter().find(|i| i.counter == counter)
    }

    fn insert_item(&mut self, item: ListItem) {
        let at = self.items.partition_point(|i| i.counter < item.counter);
        self.items.insert(at, item);
    }
}

/// All list states of one form, keyed by field id
#[derive(Debug, Clone, Default)]
pub struct ListStore {
    lists: HashMap<String, ListState>,
}

impl ListStore {
    pub fn get(&self, field: &str) -> Option<&ListState> {
        self.lists.get(field)
    }

    pub fn get_mut(&mut self, field: &str) -> Option<&mut ListState> {
        self.lists.get_mut(field)
    }

    pub fn remove(&mut self, field: &str) -> Option<ListState> {
        self.lists.remove(field)
    }

    /// Put back the state `field` had before a failed build, dropping any
    /// state the build left behind
    pub fn restore(&mut self, field: &str, previous: Option<ListState>) {
        match previous {
            Some(state) => {
                self.lists.insert(field.to_string(), state);
            }
            None => {
                self.lists.remove(field);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    fn require(&self, field: &str) -> Result<&ListState> {
        self.lists
            .get(field)
            .filter(|s| s.phase == ListPhase::Ready)
            .ok_or_else(|| Error::render(field, "list field is not initialized"))
    }
}

// ─────────────────────────────────────────────────────────────────
// Ids
// ─────────────────────────────────────────────────────────────────

/// Id prefix of the staging inputs: `{control}-new`
fn staging_prefix(control_id: &str) -> String {
    format!("{}-new", control_id)
}

/// Id prefix of the cells of one row: `{control}-{counter}`
fn row_prefix(control_id: &str, counter: u32) -> String {
    format!("{}-{}", control_id, counter)
}

/// Build the slot entries for a list: its composite sub-fields, or a single
/// bare input named [`SINGLE_SLOT`]
fn slots_for(entry: &FieldEntry, spec: &FieldSpec) -> Result<Vec<FieldEntry>> {
    let mut slots: Vec<FieldEntry> = if spec.is_composite() {
        spec.fields.clone()
    } else {
        let mut single = FieldSpec::new(spec.subtype.clone().unwrap_or_else(|| "text".to_string()));
        single.placeholder = spec.placeholder.clone();
        single.size = spec.size;
        vec![FieldEntry {
            id: SINGLE_SLOT.to_string(),
            name: String::new(),
            body: jsonform_core::EntryBody::Field(single),
            raw: Value::Null,
        }]
    };

    let width = (SLOT_COLUMNS / slots.len().clamp(1, SLOT_COLUMNS as usize) as u8).max(1);
    for slot in &mut slots {
        let jsonform_core::EntryBody::Field(sub) = &mut slot.body else {
            return Err(Error::render(
                &entry.id,
                format!("list slot '{}' must be a field entry", slot.id),
            ));
        };
        if sub.kind == "list" {
            return Err(Error::render(&entry.id, "nested list fields are not supported"));
        }
        sub.width = width;
        sub.required = true;
        sub.readonly = sub.readonly || spec.readonly;
    }
    Ok(slots)
}

fn slot_width(slots: &[FieldEntry]) -> u8 {
    slots
        .first()
        .and_then(|s| s.spec())
        .map(|s| s.width)
        .unwrap_or(SLOT_COLUMNS)
}

fn kind_for(scope: &FieldScope<'_>, slot: &FieldEntry) -> Result<std::rc::Rc<dyn FieldKind>> {
    scope
        .registry
        .get(slot.kind())
        .ok_or_else(|| Error::unknown_field_type(&slot.id, slot.kind()))
}

/// Render the list header, staging row, Add control and item container, then
/// seed rows from `default_value`
pub fn initialize(scope: &mut FieldScope<'_>, entry: &FieldEntry) -> Result<Rendered> {
    let spec = super::kinds::require_spec(entry)?;
    let theme = scope.theme;
    let control_id = scope.control_id(&entry.id);
    let slots = slots_for(entry, spec)?;
    let width = slot_width(&slots);

    scope
        .lists
        .lists
        .insert(entry.id.clone(), ListState::new(&entry.id, spec, slots.clone()));

    let root = super::kinds::wrapper(scope, entry);
    let container = scope.tree.append_element(root, "div", Some(&control_id))?;

    let header = scope.tree.append_element(container, "div", None)?;
    scope.tree.add_classes(header, &theme.field.list_header);
    super::kinds::label(scope, header, entry, None)?;

    let staging = scope
        .tree
        .append_element(container, "div", Some(&format!("{}-staging", control_id)))?;
    scope.tree.add_classes(staging, &theme.field.row);

    let prefix = staging_prefix(&control_id);
    for slot in &slots {
        let kind = kind_for(scope, slot)?;
        let rendered = kind.create(&mut scope.nested(&prefix), slot)?;
        scope.tree.add_classes(rendered.root, &theme.column_class(width));
        scope.tree.append_child(staging, rendered.root)?;
    }

    let add_column = scope.tree.append_element(staging, "div", None)?;
    scope
        .tree
        .add_classes(add_column, &theme.column_class(GRID_COLUMNS.saturating_sub(width * slots.len() as u8).max(1)));
    let add = scope
        .tree
        .append_element(add_column, "button", Some(&format!("{}-add", control_id)))?;
    scope.tree.set_attribute(add, "type", "button");
    scope.tree.add_classes(add, &theme.controls.add);
    scope.tree.set_text(add, &scope.settings.controls.add_text);
    if spec.readonly {
        scope.tree.set_disabled(add, true);
    }
    scope.listen(
        add,
        EventKind::Click,
        Listener::ListAdd {
            field: entry.id.clone(),
        },
    );

    let items = scope
        .tree
        .append_element(container, "div", Some(&format!("{}-items", control_id)))?;
    scope.tree.add_classes(items, &theme.field.list_items);

    super::kinds::finish(scope, root, entry, spec)?;

    if let Some(state) = scope.lists.get_mut(&entry.id) {
        state.items_node = Some(items);
        state.phase = ListPhase::Ready;
    }

    set_rows(scope, entry, &spec.default_value)?;
    debug!("List '{}' ready with {} slot(s)", entry.id, slots.len());
    Ok(Rendered::new(root, ListenTarget::None))
}

/// Move the staged values into a new row
///
/// Returns the new row's counter, or `None` when a staging slot is empty (the
/// empty slots are annotated). Refuses with [`Error::ListLimit`] once
/// `maximum_entries` rows exist.
pub fn add_item(scope: &mut FieldScope<'_>, entry: &FieldEntry) -> Result<Option<u32>> {
    let state = scope.lists.require(&entry.id)?;
    if state.readonly {
        return Err(Error::render(&entry.id, "list field is read-only"));
    }
    if let Some(limit) = state.maximum {
        if state.len() >= limit {
            return Err(Error::ListLimit { limit });
        }
    }
    let slots = state.slots.clone();

    let control_id = scope.control_id(&entry.id);
    let prefix = staging_prefix(&control_id);
    let theme = scope.theme;

    let mut cells = Vec::with_capacity(slots.len());
    let mut complete = true;
    for slot in &slots {
        let kind = kind_for(scope, slot)?;
        let read = scope.read().with_prefix(&prefix);
        let value = kind.value(&read, slot);
        let slot_id = format!("{}-{}", prefix, slot.id);
        if value.is_falsy() {
            complete = false;
            let message = scope.settings.validation.messages.get(kind.empty_message());
            annotate(scope.tree, theme, &slot_id, &Verdict::invalid(message), true);
        } else {
            annotate(scope.tree, theme, &slot_id, &Verdict::valid(), true);
        }
        cells.push((slot.id.clone(), cell_text(&value)));
    }
    if !complete {
        debug!("List '{}': staging row incomplete", entry.id);
        return Ok(None);
    }

    let counter = push_row(scope, entry, cells)?;

    for slot in &slots {
        let kind = kind_for(scope, slot)?;
        if let Err(e) = kind.set_value(&mut scope.nested(&prefix), slot, &Value::String(String::new())) {
            debug!("List '{}': could not clear staging slot '{}': {}", entry.id, slot.id, e);
        }
    }

    Ok(Some(counter))
}

/// Remove one row; its counter is never reused
pub fn remove_item(scope: &mut FieldScope<'_>, field: &str, counter: u32) -> Result<()> {
    let state = scope.lists.require(field)?;
    let row = state
        .item(counter)
        .map(|i| i.row)
        .ok_or_else(|| Error::ListItemNotFound {
            field: field.to_string(),
            counter,
        })?;

    if scope.tree.exists(row) {
        scope.tree.remove(row)?;
    }
    scope.listeners.forget_list_item(field, counter);
    if let Some(state) = scope.lists.get_mut(field) {
        state.items.retain(|i| i.counter != counter);
    }
    debug!("List '{}': removed row #{}", field, counter);
    Ok(())
}

/// Write the current value of one cell back into the model
pub fn update_cell(scope: &mut FieldScope<'_>, field: &str, counter: u32, sub: &str) -> Result<()> {
    let state = scope.lists.require(field)?;
    if state.item(counter).is_none() {
        return Err(Error::ListItemNotFound {
            field: field.to_string(),
            counter,
        });
    }
    let slot = state
        .slots
        .iter()
        .find(|s| s.id == sub)
        .cloned()
        .ok_or_else(|| Error::render(field, format!("list has no slot '{}'", sub)))?;

    let kind = kind_for(scope, &slot)?;
    let prefix = row_prefix(&scope.control_id(field), counter);
    let text = cell_text(&kind.value(&scope.read().with_prefix(&prefix), &slot));

    if let Some(item) = scope
        .lists
        .get_mut(field)
        .and_then(|s| s.items.iter_mut().find(|i| i.counter == counter))
    {
        match item.cells.iter_mut().find(|(k, _)| k == sub) {
            Some((_, v)) => *v = text,
            None => item.cells.push((sub.to_string(), text)),
        }
    }
    Ok(())
}

/// Replace every row with rows seeded from `value`
///
/// Accepts an array of rows (a scalar fills the first slot, an object maps
/// slot ids to values) or a `{counter: row}` object as produced by
/// [`ListState::values`]. Anything else clears the list.
pub fn set_rows(scope: &mut FieldScope<'_>, entry: &FieldEntry, value: &Value) -> Result<()> {
    let state = scope.lists.require(&entry.id)?;
    let slot_ids: Vec<String> = state.slot_ids().map(str::to_string).collect();
    let existing: Vec<u32> = state.items.iter().map(|i| i.counter).collect();
    let maximum = state.maximum;

    for counter in existing {
        remove_item(scope, &entry.id, counter)?;
    }

    let rows: Vec<&Value> = match value {
        Value::Array(rows) => rows.iter().collect(),
        Value::Object(map) => map.values().collect(),
        _ => Vec::new(),
    };

    for (index, row) in rows.into_iter().enumerate() {
        if let Some(limit) = maximum.filter(|limit| index >= *limit) {
            warn!(
                "List '{}': dropping seeded rows beyond maximum_entries ({})",
                entry.id, limit
            );
            break;
        }
        let cells = row_cells(&slot_ids, row);
        push_row(scope, entry, cells)?;
    }
    Ok(())
}

/// Slot values of one seeded row, in slot order
fn row_cells(slot_ids: &[String], row: &Value) -> Vec<(String, String)> {
    match row {
        Value::Object(map) => slot_ids
            .iter()
            .map(|id| (id.clone(), map.get(id).map(value_to_text).unwrap_or_default()))
            .collect(),
        scalar => slot_ids
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let text = if i == 0 { value_to_text(scalar) } else { String::new() };
                (id.clone(), text)
            })
            .collect(),
    }
}

/// Render a row for `cells`, prepend it and record it under the next counter
fn push_row(scope: &mut FieldScope<'_>, entry: &FieldEntry, cells: Vec<(String, String)>) -> Result<u32> {
    let state = scope.lists.require(&entry.id)?;
    let counter = state.ct + 1;
    let slots = state.slots.clone();
    let readonly = state.readonly;
    let items_node = state
        .items_node
        .ok_or_else(|| Error::render(&entry.id, "list has no item container"))?;

    let row = render_row(scope, &entry.id, &slots, counter, &cells, readonly)?;
    scope.tree.prepend_child(items_node, row)?;

    if let Some(state) = scope.lists.get_mut(&entry.id) {
        state.ct = counter;
        state.insert_item(ListItem { counter, cells, row });
    }
    debug!("List '{}': added row #{}", entry.id, counter);
    Ok(counter)
}

fn render_row(
    scope: &mut FieldScope<'_>,
    field: &str,
    slots: &[FieldEntry],
    counter: u32,
    cells: &[(String, String)],
    readonly: bool,
) -> Result<NodeId> {
    let theme = scope.theme;
    let control_id = scope.control_id(field);
    let prefix = row_prefix(&control_id, counter);
    let width = slot_width(slots);

    let row = scope.tree.create_element("div");
    scope
        .tree
        .set_attribute(row, "id", &format!("{}-item-{}", control_id, counter));
    scope.tree.set_attribute(row, "data-counter", &counter.to_string());
    scope.tree.add_classes(row, &theme.field.list_row);

    for slot in slots {
        // Seed through default_value so the row can be built while detached
        let mut seeded = slot.clone();
        if let jsonform_core::EntryBody::Field(sub) = &mut seeded.body {
            let text = cells
                .iter()
                .find(|(k, _)| *k == slot.id)
                .map(|(_, v)| v.clone())
                .unwrap_or_default();
            sub.default_value = Value::String(text);
        }

        let kind = kind_for(scope, slot)?;
        let rendered = kind.create(&mut scope.nested(&prefix), &seeded)?;
        scope.tree.add_classes(rendered.root, &theme.column_class(width));
        scope.tree.append_child(row, rendered.root)?;

        let listener = Listener::ListCell {
            field: field.to_string(),
            counter,
            sub: slot.id.clone(),
        };
        match rendered.listen {
            ListenTarget::Node(node) => scope.listen(node, EventKind::Change, listener),
            ListenTarget::Name(name) => {
                // Row-scoped group names are unique, so a name listener is safe
                scope.listeners.listen_name(name, listener)
            }
            ListenTarget::None => {}
        }
    }

    let remove_column = scope.tree.append_element(row, "div", None)?;
    scope.tree.add_classes(
        remove_column,
        &theme.column_class(GRID_COLUMNS.saturating_sub(width * slots.len() as u8).max(1)),
    );
    let remove = scope
        .tree
        .append_element(remove_column, "button", Some(&format!("{}-remove-{}", control_id, counter)))?;
    scope.tree.set_attribute(remove, "type", "button");
    scope.tree.add_classes(remove, &theme.controls.remove);
    scope.tree.set_text(remove, &scope.settings.controls.remove_text);
    if readonly {
        scope.tree.set_disabled(remove, true);
    } else {
        scope.listen(
            remove,
            EventKind::Click,
            Listener::ListRemove {
                field: field.to_string(),
                counter,
            },
        );
    }
    Ok(row)
}

/// Text stored in a list cell
fn cell_text(value: &FieldValue) -> String {
    match value {
        FieldValue::Empty => String::new(),
        FieldValue::Text(s) => s.clone(),
        FieldValue::Bool(b) => b.to_string(),
        FieldValue::List(list) => list.to_json().to_string(),
        FieldValue::Json(v) => value_to_text(v),
    }
}

/// Read a list field's rows
pub fn values(scope: &ReadScope<'_>, field: &str) -> FieldValue {
    scope
        .lists
        .get(field)
        .map(|s| FieldValue::List(s.values()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests;
