//! Per-form listener table: which UI event on which node means what.

use std::collections::HashMap;

use jsonform_ui::{EventKind, NodeId, UiEvent, UiTree};

/// What a registered listener does when its event fires
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listener {
    /// Re-validate a field after its value changed
    Validate { field: String },
    /// Add the staged row of a list field
    ListAdd { field: String },
    /// Remove one row of a list field
    ListRemove { field: String, counter: u32 },
    /// A cell of a persisted list row changed
    ListCell {
        field: String,
        counter: u32,
        sub: String,
    },
    Submit,
    Cancel,
}

impl Listener {
    /// The field this listener belongs to, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            Listener::Validate { field }
            | Listener::ListAdd { field }
            | Listener::ListRemove { field, .. }
            | Listener::ListCell { field, .. } => Some(field),
            Listener::Submit | Listener::Cancel => None,
        }
    }
}

/// Listeners of one form instance
#[derive(Debug, Clone, Default)]
pub struct ListenerTable {
    by_node: HashMap<(NodeId, EventKind), Listener>,
    /// Change listeners keyed by `name` attribute (radio groups)
    by_name: HashMap<String, Listener>,
}

impl ListenerTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listen(&mut self, node: NodeId, kind: EventKind, listener: Listener) {
        self.by_node.insert((node, kind), listener);
    }

    /// Listen for change events on every control named `name`
    pub fn listen_name(&mut self, name: impl Into<String>, listener: Listener) {
        self.by_name.insert(name.into(), listener);
    }

    /// Find the listener an event should trigger
    ///
    /// Node listeners win over group-name listeners.
    pub fn resolve(&self, tree: &dyn UiTree, event: &UiEvent) -> Option<&Listener> {
        if let Some(listener) = self.by_node.get(&(event.target, event.kind)) {
            return Some(listener);
        }
        if event.kind != EventKind::Change {
            return None;
        }
        tree.attribute(event.target, "name")
            .and_then(|name| self.by_name.get(name))
    }

    /// Drop the remove/cell listeners of one list row
    pub fn forget_list_item(&mut self, field: &str, counter: u32) {
        let keep = |l: &Listener| match l {
            Listener::ListRemove { field: f, counter: c } | Listener::ListCell { field: f, counter: c, .. } => {
                !(f == field && *c == counter)
            }
            _ => true,
        };
        self.by_node.retain(|_, l| keep(l));
        self.by_name.retain(|_, l| keep(l));
    }

    pub fn len(&self) -> usize {
        self.by_node.len() + self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonform_ui::{Document, UiTreeExt};

    #[test]
    fn test_node_listener_resolves_by_kind() {
        let mut doc = Document::new();
        let root = doc.root();
        let button = doc.append_element(root, "button", Some("b")).unwrap();

        let mut table = ListenerTable::new();
        table.listen(button, EventKind::Click, Listener::Submit);

        assert_eq!(table.resolve(&doc, &UiEvent::click(button)), Some(&Listener::Submit));
        assert_eq!(table.resolve(&doc, &UiEvent::change(button)), None);
    }

    #[test]
    fn test_radio_group_resolves_by_name() {
        let mut doc = Document::new();
        let root = doc.root();
        let radio = doc.append_element(root, "input", Some("r-0")).unwrap();
        doc.set_attribute(radio, "type", "radio");
        doc.set_attribute(radio, "name", "form-color");

        let mut table = ListenerTable::new();
        table.listen_name(
            "form-color",
            Listener::Validate {
                field: "color".into(),
            },
        );

        let hit = table.resolve(&doc, &UiEvent::change(radio));
        assert_eq!(hit.and_then(Listener::field), Some("color"));
        assert!(table.resolve(&doc, &UiEvent::click(radio)).is_none());
    }

    #[test]
    fn test_forget_list_item_keeps_other_rows() {
        let mut doc = Document::new();
        let a = doc.create_element("button");
        let b = doc.create_element("button");

        let mut table = ListenerTable::new();
        table.listen(a, EventKind::Click, Listener::ListRemove { field: "l".into(), counter: 1 });
        table.listen(b, EventKind::Click, Listener::ListRemove { field: "l".into(), counter: 2 });
        table.forget_list_item("l", 1);

        assert_eq!(table.len(), 1);
        assert!(table.resolve(&doc, &UiEvent::click(b)).is_some());
        table.forget_list_item("l", 2);
        assert!(table.is_empty());
    }
}
