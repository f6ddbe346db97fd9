//! Markup serialisation of a [`Document`] subtree

use crate::document::{Content, Document, Node};
use crate::tree::NodeId;

const VOID_ELEMENTS: &[&str] = &["input", "br", "hr", "img", "meta", "link"];

/// Serialise `node` and its descendants.
///
/// Attributes are written in insertion order, followed by `class`, the live
/// `value`, and the boolean states (`checked`/`selected`, `disabled`,
/// `hidden`).
pub fn to_html(doc: &Document, node: NodeId) -> String {
    let mut out = String::new();
    write_node(doc, node, &mut out);
    out
}

fn write_node(doc: &Document, id: NodeId, out: &mut String) {
    let Some(node) = doc.node(id) else {
        return;
    };

    out.push('<');
    out.push_str(&node.tag);
    write_attributes(node, out);
    out.push('>');

    if VOID_ELEMENTS.contains(&node.tag.as_str()) {
        return;
    }

    if node.tag == "textarea" {
        if let Some(value) = &node.value {
            out.push_str(&escape_text(value));
        }
    }

    match &node.content {
        Content::Text(t) => out.push_str(&escape_text(t)),
        Content::Markup(m) => out.push_str(m),
        Content::None => {}
    }

    for child in &node.children {
        write_node(doc, *child, out);
    }

    out.push_str("</");
    out.push_str(&node.tag);
    out.push('>');
}

fn write_attributes(node: &Node, out: &mut String) {
    let live_value = node.value.is_some() && node.tag != "textarea";
    for (k, v) in &node.attrs {
        if k == "value" && live_value {
            continue;
        }
        push_attr(out, k, v);
    }
    if !node.classes.is_empty() {
        push_attr(out, "class", &node.classes.join(" "));
    }
    if live_value {
        if let Some(value) = &node.value {
            push_attr(out, "value", value);
        }
    }
    if node.checked {
        out.push_str(if node.tag == "option" {
            " selected"
        } else {
            " checked"
        });
    }
    if node.disabled {
        out.push_str(" disabled");
    }
    if !node.visible {
        out.push_str(" hidden");
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_attr(value));
    out.push('"');
}

/// Escape text content
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape an attribute value
pub fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

/// Drop everything between `<` and `>`; good enough for reading back
/// injected markup as text
pub fn strip_tags(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut in_tag = false;
    for c in markup.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}
