//! Field renderer: one padded entry to one UI subtree.
//!
//! Nothing here aborts a form build. A rejected entry, an unregistered type or
//! a failing creator is logged and, in debug mode, replaced by a collapsible
//! diagnostic block; outside debug mode it renders nothing.

use jsonform_core::prelude::*;
use jsonform_core::{EntryBody, FieldEntry, PaddedEntry};
use jsonform_ui::{EventKind, NodeId, UiTreeExt};
use serde_json::Value;

use crate::field_kind::{FieldScope, ListenTarget, Rendered};
use crate::list::ListState;
use crate::listeners::{Listener, ListenerTable};

pub const DEBUG_NOTE: &str = "This is only shown in debug mode.";

/// What rendering an entry produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The entry belongs in the form's field map; `node` is its subtree root
    /// (value entries render none)
    Field { node: Option<NodeId> },
    /// The entry was dropped; `placeholder` is the diagnostic block, if shown
    Skipped { placeholder: Option<NodeId> },
}

impl Outcome {
    pub fn is_field(&self) -> bool {
        matches!(self, Outcome::Field { .. })
    }
}

/// Render `entry` at the end of `parent`
pub fn render_entry(scope: &mut FieldScope<'_>, parent: NodeId, entry: &PaddedEntry, debug: bool) -> Outcome {
    let entry = match entry {
        Ok(entry) => entry,
        Err(rejected) => {
            error!("Invalid field in '{}': {}", scope.form_id, rejected);
            let placeholder = debug
                .then(|| placeholder(scope, parent, "Invalid field configuration", &rejected.raw))
                .flatten();
            return Outcome::Skipped { placeholder };
        }
    };

    debug!("Creating field '{}' ({}) in '{}'", entry.id, entry.kind(), scope.form_id);
    match &entry.body {
        EntryBody::Value(_) => Outcome::Field { node: None },
        EntryBody::Html(markup) => match render_html(scope, parent, entry, markup) {
            Ok(node) => Outcome::Field { node: Some(node) },
            Err(e) => creation_failed(scope, parent, entry, e, debug),
        },
        EntryBody::Field(_) => render_field(scope, parent, entry, debug),
    }
}

fn render_field(scope: &mut FieldScope<'_>, parent: NodeId, entry: &FieldEntry, debug: bool) -> Outcome {
    let Some(kind) = scope.registry.get(entry.kind()) else {
        info!(
            "Unknown field type in '{}': {}. Skipping field '{}'",
            scope.form_id,
            entry.kind(),
            entry.id
        );
        let title = format!("Unknown field: {} ({}).", entry.id, entry.kind());
        let placeholder = debug
            .then(|| placeholder(scope, parent, &title, &entry.raw))
            .flatten();
        return Outcome::Skipped { placeholder };
    };

    let snapshot = Snapshot::take(scope, entry);
    let attached = kind.create(scope, entry).and_then(|rendered| attach(scope, parent, entry, rendered));
    match attached {
        Ok(root) => Outcome::Field { node: Some(root) },
        Err(e) => {
            snapshot.restore(scope, entry);
            creation_failed(scope, parent, entry, e, debug)
        }
    }
}

/// Listener and list state as they were before a field's creator ran
///
/// An earlier entry with the same id keeps working when a later one fails.
struct Snapshot {
    listeners: ListenerTable,
    list: Option<ListState>,
}

impl Snapshot {
    fn take(scope: &FieldScope<'_>, entry: &FieldEntry) -> Self {
        Self {
            listeners: scope.listeners.clone(),
            list: scope.lists.get(&entry.id).cloned(),
        }
    }

    fn restore(self, scope: &mut FieldScope<'_>, entry: &FieldEntry) {
        *scope.listeners = self.listeners;
        scope.lists.restore(&entry.id, self.list);
    }
}

/// Width class, attach, change listener
fn attach(scope: &mut FieldScope<'_>, parent: NodeId, entry: &FieldEntry, rendered: Rendered) -> Result<NodeId> {
    if let Some(spec) = entry.spec() {
        let column = scope.theme.column_class(spec.width);
        scope.tree.add_classes(rendered.root, &column);
    }
    scope.tree.append_child(parent, rendered.root)?;

    let listener = Listener::Validate {
        field: entry.id.clone(),
    };
    match rendered.listen {
        ListenTarget::Node(node) => scope.listen(node, EventKind::Change, listener),
        ListenTarget::Name(name) => scope.listeners.listen_name(name, listener),
        ListenTarget::None => {}
    }
    Ok(rendered.root)
}

fn render_html(scope: &mut FieldScope<'_>, parent: NodeId, entry: &FieldEntry, markup: &str) -> Result<NodeId> {
    let id = format!("{}-wrapper", scope.control_id(&entry.id));
    let node = scope.tree.append_element(parent, "div", Some(&id))?;
    scope.tree.set_markup(node, markup);
    Ok(node)
}

fn creation_failed(scope: &mut FieldScope<'_>, parent: NodeId, entry: &FieldEntry, e: Error, debug: bool) -> Outcome {
    error!(
        "Creating field '{}' ({}) in '{}' failed: {}",
        entry.id,
        entry.kind(),
        scope.form_id,
        e
    );
    let title = format!("Error while creating field: {} ({}).", entry.id, entry.kind());
    let placeholder = debug
        .then(|| placeholder(scope, parent, &title, &entry.raw))
        .flatten();
    Outcome::Skipped { placeholder }
}

/// `<div><details><summary><strong>title</strong></summary>note<pre>json</pre></details></div>`
fn placeholder(scope: &mut FieldScope<'_>, parent: NodeId, title: &str, raw: &Value) -> Option<NodeId> {
    let built = build_placeholder(scope, parent, title, raw);
    match built {
        Ok(node) => Some(node),
        Err(e) => {
            warn!("Could not render diagnostic block: {}", e);
            None
        }
    }
}

fn build_placeholder(scope: &mut FieldScope<'_>, parent: NodeId, title: &str, raw: &Value) -> Result<NodeId> {
    let block = scope.tree.append_element(parent, "div", None)?;
    scope.tree.add_classes(block, &scope.theme.field.diagnostic);

    let details = scope.tree.append_element(block, "details", None)?;
    let summary = scope.tree.append_element(details, "summary", None)?;
    let strong = scope.tree.append_element(summary, "strong", None)?;
    scope.tree.set_text(strong, title);

    let note = scope.tree.append_element(details, "span", None)?;
    scope.tree.set_text(note, DEBUG_NOTE);

    let pre = scope.tree.append_element(details, "pre", None)?;
    let json = serde_json::to_string_pretty(raw).unwrap_or_else(|_| raw.to_string());
    scope.tree.set_text(pre, &json);
    Ok(block)
}
