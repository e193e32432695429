//! Tree-to-HTML serialization.
//!
//! Serialization is read-only over the tree; rendering the same node twice
//! yields byte-identical output.

use compact_str::CompactString;

use crate::error::RenderError;
use crate::node::{Element, Node};
use crate::value::Value;

const DOCTYPE: &str = "<!DOCTYPE html>\n";

/// Serialize a node tree to an HTML fragment string.
pub fn render(node: &Node) -> Result<String, RenderError> {
    let mut out = String::new();
    write_node(node, &mut out, true)?;
    Ok(out)
}

/// Serialize a node tree as a complete document with a doctype line.
pub fn render_document(node: &Node) -> Result<String, RenderError> {
    let mut out = String::from(DOCTYPE);
    write_node(node, &mut out, true)?;
    Ok(out)
}

fn write_node(node: &Node, out: &mut String, escape_text: bool) -> Result<(), RenderError> {
    match node {
        Node::Text(text) => {
            if escape_text {
                out.push_str(&htmlize::escape_all_quotes(text.as_str()));
            } else {
                out.push_str(text);
            }
        }
        Node::Element(element) => write_element(element, out)?,
        Node::Fragment(children) => {
            for child in children {
                write_node(child, out, true)?;
            }
        }
    }
    Ok(())
}

fn write_element(element: &Element, out: &mut String) -> Result<(), RenderError> {
    out.push('<');
    out.push_str(&element.tag);
    for (name, value) in &element.attrs {
        write_attr(name, value, out)?;
    }
    if element.void {
        // Void elements drop any supplied children, by contract.
        out.push_str(" />");
        return Ok(());
    }
    out.push('>');
    for child in &element.children {
        // `safe` covers this element's direct text children only.
        write_node(child, out, !element.safe)?;
    }
    out.push_str("</");
    out.push_str(&element.tag);
    out.push('>');
    Ok(())
}

fn write_attr(name: &CompactString, value: &Value, out: &mut String) -> Result<(), RenderError> {
    let text: String = match value {
        Value::Str(s) => htmlize::escape_all_quotes(s.as_str()).into_owned(),
        Value::Int(n) => n.to_string(),
        Value::Bool(b) => if *b { "true" } else { "false" }.to_string(),
        other => {
            return Err(RenderError::InvalidAttributeType {
                name: name.clone(),
                found: other.type_name(),
            })
        }
    };

    out.push(' ');
    // Trailing underscore marks a reserved-word alias (class_, for_, ...).
    out.push_str(name.strip_suffix('_').unwrap_or(name));
    out.push_str("=\"");
    out.push_str(&text);
    out.push('"');
    Ok(())
}
