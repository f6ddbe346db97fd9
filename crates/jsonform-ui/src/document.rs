//! In-memory [`UiTree`] implementation.
//!
//! `Document` is an arena of element nodes. Removed nodes stay in the arena as
//! tombstones so stale [`NodeId`]s never alias a newer node.
//!
//! Value semantics follow the browser where it matters to forms:
//! - a `select` reports the `value` attribute of its selected `option`
//!   (or of its first option when none is selected);
//! - setting a `select`'s value selects the matching option;
//! - `is_checked` on an `option` reports its selected state.

use jsonform_core::prelude::*;

use crate::markup;
use crate::tree::{NodeId, UiTree};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) enum Content {
    #[default]
    None,
    Text(String),
    Markup(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) tag: String,
    pub(crate) attrs: Vec<(String, String)>,
    pub(crate) classes: Vec<String>,
    pub(crate) content: Content,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) visible: bool,
    pub(crate) value: Option<String>,
    pub(crate) checked: bool,
    pub(crate) disabled: bool,
    alive: bool,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            classes: Vec::new(),
            content: Content::None,
            children: Vec::new(),
            parent: None,
            visible: true,
            value: None,
            checked: false,
            disabled: false,
            alive: true,
        }
    }

    pub(crate) fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// An in-memory page
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty page with a `body` root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new("body")],
            root: NodeId::new(0),
        }
    }

    /// Append a `div` with the given id to the root and return it
    pub fn append_container(&mut self, id: &str) -> NodeId {
        let node = self.create_element("div");
        self.set_attribute(node, "id", id);
        let root = self.root;
        self.attach(root, node, false);
        node
    }

    /// Serialise a subtree to markup
    pub fn to_html(&self, node: NodeId) -> String {
        markup::to_html(self, node)
    }

    /// Number of live nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.alive).count()
    }

    pub(crate) fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index()).filter(|n| n.alive)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index()).filter(|n| n.alive)
    }

    fn is_attached(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            if node_id == self.root {
                return true;
            }
            current = self.node(node_id).and_then(|n| n.parent);
        }
        false
    }

    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.node(id).and_then(|n| n.parent);
        }
        false
    }

    fn detach(&mut self, child: NodeId) {
        let parent = self.node(child).and_then(|n| n.parent);
        if let Some(parent) = parent {
            if let Some(p) = self.node_mut(parent) {
                p.children.retain(|c| *c != child);
            }
        }
        if let Some(c) = self.node_mut(child) {
            c.parent = None;
        }
    }

    fn attach(&mut self, parent: NodeId, child: NodeId, front: bool) {
        self.detach(child);
        if let Some(p) = self.node_mut(parent) {
            if front {
                p.children.insert(0, child);
            } else {
                p.children.push(child);
            }
            // Elements and text content are exclusive
            if matches!(p.content, Content::Text(_)) {
                p.content = Content::None;
            }
        }
        if let Some(c) = self.node_mut(child) {
            c.parent = Some(parent);
        }
    }

    fn insert_checked(&mut self, parent: NodeId, child: NodeId, front: bool) -> Result<()> {
        if self.node(parent).is_none() {
            return Err(Error::node_not_found(format!("parent node {}", parent.index())));
        }
        if self.node(child).is_none() {
            return Err(Error::node_not_found(format!("child node {}", child.index())));
        }
        if self.is_ancestor(child, parent) {
            return Err(Error::config("cannot insert a node into its own subtree"));
        }
        self.attach(parent, child, front);
        Ok(())
    }

    fn descendants(&self, node: NodeId, out: &mut Vec<NodeId>) {
        if let Some(n) = self.node(node) {
            for child in &n.children {
                out.push(*child);
                self.descendants(*child, out);
            }
        }
    }

    fn attached_nodes(&self) -> Vec<NodeId> {
        let mut out = vec![self.root];
        self.descendants(self.root, &mut out);
        out
    }

    fn options_of(&self, select: NodeId) -> Vec<NodeId> {
        let mut all = Vec::new();
        self.descendants(select, &mut all);
        all.into_iter()
            .filter(|id| self.node(*id).is_some_and(|n| n.tag == "option"))
            .collect()
    }

    fn option_value(&self, option: NodeId) -> Option<String> {
        let node = self.node(option)?;
        node.attr("value")
            .map(str::to_string)
            .or_else(|| Some(self.text(option)))
    }
}

fn split_classes(classes: &str) -> impl Iterator<Item = &str> {
    classes.split_whitespace()
}

impl UiTree for Document {
    fn root(&self) -> NodeId {
        self.root
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.push(Node::new(tag));
        NodeId::new(self.nodes.len() - 1)
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.insert_checked(parent, child, false)
    }

    fn prepend_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.insert_checked(parent, child, true)
    }

    fn remove(&mut self, node: NodeId) -> Result<()> {
        if node == self.root {
            return Err(Error::config("cannot remove the document root"));
        }
        if self.node(node).is_none() {
            return Err(Error::node_not_found(format!("node {}", node.index())));
        }
        self.detach(node);
        let mut doomed = vec![node];
        self.descendants(node, &mut doomed);
        for id in doomed {
            if let Some(n) = self.nodes.get_mut(id.index()) {
                n.alive = false;
                n.children.clear();
                n.parent = None;
            }
        }
        Ok(())
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.parent)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn exists(&self, node: NodeId) -> bool {
        self.node(node).is_some()
    }

    fn tag(&self, node: NodeId) -> Option<&str> {
        self.node(node).map(|n| n.tag.as_str())
    }

    fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.attached_nodes()
            .into_iter()
            .find(|n| self.node(*n).and_then(|node| node.attr("id")) == Some(id))
    }

    fn find_by_name(&self, name: &str) -> Vec<NodeId> {
        self.attached_nodes()
            .into_iter()
            .filter(|n| self.node(*n).and_then(|node| node.attr("name")) == Some(name))
            .collect()
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if name == "class" {
            if let Some(n) = self.node_mut(node) {
                n.classes.clear();
            }
            self.add_class(node, value);
            return;
        }
        if let Some(n) = self.node_mut(node) {
            match n.attrs.iter_mut().find(|(k, _)| k == name) {
                Some((_, v)) => *v = value.to_string(),
                None => n.attrs.push((name.to_string(), value.to_string())),
            }
        }
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let Some(n) = self.node_mut(node) {
            n.attrs.retain(|(k, _)| k != name);
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node).and_then(|n| n.attr(name))
    }

    fn add_class(&mut self, node: NodeId, classes: &str) {
        if let Some(n) = self.node_mut(node) {
            for class in split_classes(classes) {
                if !n.classes.iter().any(|c| c == class) {
                    n.classes.push(class.to_string());
                }
            }
        }
    }

    fn remove_class(&mut self, node: NodeId, classes: &str) {
        if let Some(n) = self.node_mut(node) {
            for class in split_classes(classes) {
                n.classes.retain(|c| c != class);
            }
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        for child in self.children(node) {
            let _ = self.remove(child);
        }
        if let Some(n) = self.node_mut(node) {
            n.content = Content::Text(text.to_string());
        }
    }

    fn set_markup(&mut self, node: NodeId, markup: &str) {
        for child in self.children(node) {
            let _ = self.remove(child);
        }
        if let Some(n) = self.node_mut(node) {
            n.content = Content::Markup(markup.to_string());
        }
    }

    fn text(&self, node: NodeId) -> String {
        let Some(n) = self.node(node) else {
            return String::new();
        };
        let mut out = match &n.content {
            Content::Text(t) => t.clone(),
            Content::Markup(m) => markup::strip_tags(m),
            Content::None => String::new(),
        };
        for child in &n.children {
            out.push_str(&self.text(*child));
        }
        out
    }

    fn set_visible(&mut self, node: NodeId, visible: bool) {
        if let Some(n) = self.node_mut(node) {
            n.visible = visible;
        }
    }

    fn is_visible(&self, node: NodeId) -> bool {
        self.node(node).is_some_and(|n| n.visible)
    }

    fn value(&self, node: NodeId) -> Option<String> {
        let n = self.node(node)?;
        if n.tag == "select" {
            let options = self.options_of(node);
            let selected = options
                .iter()
                .find(|o| self.node(**o).is_some_and(|o| o.checked))
                .or_else(|| options.first())?;
            return self.option_value(*selected);
        }
        n.value.clone().or_else(|| n.attr("value").map(str::to_string))
    }

    fn set_value(&mut self, node: NodeId, value: &str) {
        let is_select = self.tag(node) == Some("select");
        if is_select {
            for option in self.options_of(node) {
                let matches = self.option_value(option).as_deref() == Some(value);
                if let Some(o) = self.node_mut(option) {
                    o.checked = matches;
                }
            }
            return;
        }
        if let Some(n) = self.node_mut(node) {
            n.value = Some(value.to_string());
        }
    }

    fn is_checked(&self, node: NodeId) -> bool {
        self.node(node).is_some_and(|n| n.checked)
    }

    fn set_checked(&mut self, node: NodeId, checked: bool) {
        // A checked radio unchecks the rest of its group
        if checked && self.attribute(node, "type") == Some("radio") {
            if let Some(name) = self.attribute(node, "name").map(str::to_string) {
                for other in self.find_by_name(&name) {
                    if let Some(o) = self.node_mut(other) {
                        o.checked = false;
                    }
                }
            }
        }
        if let Some(n) = self.node_mut(node) {
            n.checked = checked;
        }
    }

    fn set_disabled(&mut self, node: NodeId, disabled: bool) {
        if let Some(n) = self.node_mut(node) {
            n.disabled = disabled;
        }
    }

    fn is_disabled(&self, node: NodeId) -> bool {
        self.node(node).is_some_and(|n| n.disabled)
    }
}
