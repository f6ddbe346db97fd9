//! The UI-tree contract the engine renders into and reads from.
//!
//! The engine never assumes a concrete widget toolkit. A host provides an
//! implementation of [`UiTree`] (a browser DOM bridge, a terminal layout, or the
//! in-memory [`crate::Document`]) and forwards user events as
//! [`crate::UiEvent`]s.

use jsonform_core::prelude::*;

/// Handle to a node in a [`UiTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

/// Capabilities the engine needs from the host's UI substrate.
///
/// Setters on a node that no longer exists are no-ops; structural operations
/// report [`Error::NodeNotFound`].
pub trait UiTree {
    /// Root of the page
    fn root(&self) -> NodeId;

    /// Create a detached element
    fn create_element(&mut self, tag: &str) -> NodeId;

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()>;

    /// Insert `child` before the first existing child of `parent`
    fn prepend_child(&mut self, parent: NodeId, child: NodeId) -> Result<()>;

    /// Detach and drop `node` with its whole subtree
    fn remove(&mut self, node: NodeId) -> Result<()>;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// True while the node exists (attached or not)
    fn exists(&self, node: NodeId) -> bool;

    fn tag(&self, node: NodeId) -> Option<&str>;

    /// Look up an attached element by its `id` attribute
    fn find_by_id(&self, id: &str) -> Option<NodeId>;

    /// All attached elements whose `name` attribute equals `name`
    fn find_by_name(&self, name: &str) -> Vec<NodeId>;

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    fn remove_attribute(&mut self, node: NodeId, name: &str);

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str>;

    /// Add one or more space-separated classes
    fn add_class(&mut self, node: NodeId, classes: &str);

    /// Remove one or more space-separated classes
    fn remove_class(&mut self, node: NodeId, classes: &str);

    fn has_class(&self, node: NodeId, class: &str) -> bool;

    /// Replace the node's content with plain text
    fn set_text(&mut self, node: NodeId, text: &str);

    /// Replace the node's content with raw markup
    fn set_markup(&mut self, node: NodeId, markup: &str);

    /// Text content of the node and its descendants
    fn text(&self, node: NodeId) -> String;

    fn set_visible(&mut self, node: NodeId, visible: bool);

    fn is_visible(&self, node: NodeId) -> bool;

    /// Current value of an input-like element
    fn value(&self, node: NodeId) -> Option<String>;

    fn set_value(&mut self, node: NodeId, value: &str);

    /// Checked state of a checkbox/radio, selected state of an option
    fn is_checked(&self, node: NodeId) -> bool;

    fn set_checked(&mut self, node: NodeId, checked: bool);

    fn set_disabled(&mut self, node: NodeId, disabled: bool);

    fn is_disabled(&self, node: NodeId) -> bool;
}

/// Shorthand builders on top of [`UiTree`]
pub trait UiTreeExt: UiTree {
    /// Create an element, give it an id and append it to `parent`
    fn append_element(&mut self, parent: NodeId, tag: &str, id: Option<&str>) -> Result<NodeId> {
        let node = self.create_element(tag);
        if let Some(id) = id {
            self.set_attribute(node, "id", id);
        }
        self.append_child(parent, node)?;
        Ok(node)
    }

    /// Add `classes` unless empty
    fn add_classes(&mut self, node: NodeId, classes: &str) {
        if !classes.trim().is_empty() {
            self.add_class(node, classes);
        }
    }

    fn remove_by_id(&mut self, id: &str) -> Result<()> {
        let node = self
            .find_by_id(id)
            .ok_or_else(|| Error::node_not_found(format!("#{id}")))?;
        self.remove(node)
    }
}

impl<T: UiTree + ?Sized> UiTreeExt for T {}
