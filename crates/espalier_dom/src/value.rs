//! Runtime values.
//!
//! `Value` is the union carried by attribute bindings, template scopes, and
//! expression results. Maps keep insertion order (pair vector) so rendered
//! output stays deterministic.

use compact_str::CompactString;
use serde::Serialize;

use crate::error::RenderError;
use crate::node::Node;
use crate::render;

/// A runtime value.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(CompactString),
    List(Vec<Value>),
    Map(Vec<(CompactString, Value)>),
    /// A pre-built node tree, inserted as-is when it lands in child position.
    Node(Node),
}

impl Value {
    /// Name of the variant, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Node(_) => "node",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Coerce into text for child position.
    ///
    /// Scalars use their literal form (`Null` becomes the empty string),
    /// containers their JSON-like literal form, and nodes their rendered
    /// HTML.
    pub fn to_text(&self) -> Result<String, RenderError> {
        match self {
            Value::Null => Ok(String::new()),
            Value::Str(s) => Ok(s.to_string()),
            Value::Node(node) => render::render(node),
            Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::List(_) | Value::Map(_) => {
                let mut out = String::new();
                self.write_literal(&mut out)?;
                Ok(out)
            }
        }
    }

    fn write_literal(&self, out: &mut String) -> Result<(), RenderError> {
        match self {
            Value::Null => out.push_str("null"),
            Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Value::Int(n) => out.push_str(&n.to_string()),
            Value::Float(x) => out.push_str(&x.to_string()),
            Value::Str(s) => out.push_str(&format!("{:?}", s.as_str())),
            Value::List(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    item.write_literal(out)?;
                }
                out.push(']');
            }
            Value::Map(pairs) => {
                out.push('{');
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(&format!("{:?}", key.as_str()));
                    out.push_str(": ");
                    value.write_literal(out)?;
                }
                out.push('}');
            }
            Value::Node(node) => out.push_str(&render::render(node)?),
        }
        Ok(())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(CompactString::new(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(CompactString::from(s))
    }
}

impl From<CompactString> for Value {
    fn from(s: CompactString) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        Value::Node(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_text_coercion() {
        assert_eq!(Value::from("x").to_text().unwrap(), "x");
        assert_eq!(Value::from(42).to_text().unwrap(), "42");
        assert_eq!(Value::from(true).to_text().unwrap(), "true");
        assert_eq!(Value::Null.to_text().unwrap(), "");
    }

    #[test]
    fn container_text_coercion() {
        let map = Value::Map(vec![(CompactString::new("a"), Value::Int(1))]);
        assert_eq!(map.to_text().unwrap(), "{\"a\": 1}");

        let list = Value::List(vec![Value::Int(1), Value::from("x")]);
        assert_eq!(list.to_text().unwrap(), "[1, \"x\"]");
    }
}
