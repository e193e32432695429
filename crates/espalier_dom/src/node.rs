//! The renderable node tree.

use compact_str::CompactString;
use serde::Serialize;

use crate::error::RenderError;
use crate::meta;
use crate::render;
use crate::value::Value;

/// A renderable tree node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Node {
    /// A text leaf. Escaped at render time unless the owning element is
    /// marked `safe`.
    Text(CompactString),
    Element(Box<Element>),
    /// An ordered sequence of nodes with no wrapping tag.
    Fragment(Vec<Node>),
}

impl Node {
    pub fn text(text: impl Into<CompactString>) -> Node {
        Node::Text(text.into())
    }

    pub fn fragment(children: impl IntoChildren) -> Node {
        Node::Fragment(children.into_children())
    }

    /// Serialize this tree to an HTML string.
    pub fn render(&self) -> Result<String, RenderError> {
        render::render(self)
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(Box::new(element))
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(CompactString::new(text))
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(CompactString::from(text))
    }
}

/// An element node.
///
/// Attributes keep insertion order; rendered output order matches it.
/// `void` elements never emit children or a closing tag. `safe` disables
/// escaping for this element's direct text children only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub tag: CompactString,
    pub attrs: Vec<(CompactString, Value)>,
    pub children: Vec<Node>,
    pub void: bool,
    pub safe: bool,
}

impl Element {
    pub fn new(tag: impl Into<CompactString>) -> Element {
        let tag = tag.into();
        let void = meta::is_void_tag(&tag);
        Element {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
            void,
            safe: false,
        }
    }

    pub fn with_parts(
        tag: impl Into<CompactString>,
        attrs: Vec<(CompactString, Value)>,
        children: Vec<Node>,
    ) -> Element {
        let mut element = Element::new(tag);
        element.attrs = attrs;
        element.children = children;
        element
    }

    pub fn attr(mut self, name: impl Into<CompactString>, value: impl Into<Value>) -> Element {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Element {
        self.children.push(child.into());
        self
    }

    pub fn children(mut self, children: impl IntoChildren) -> Element {
        self.children.extend(children.into_children());
        self
    }

    /// Emit this element's direct text children verbatim instead of
    /// escaping them. Nested elements keep their own flag.
    pub fn safe(mut self, safe: bool) -> Element {
        self.safe = safe;
        self
    }

    pub fn into_node(self) -> Node {
        self.into()
    }
}

/// Child normalization: a single node, plain text, a list, an `Option`, or
/// nothing all become an ordered child vector.
pub trait IntoChildren {
    fn into_children(self) -> Vec<Node>;
}

impl IntoChildren for Vec<Node> {
    fn into_children(self) -> Vec<Node> {
        self
    }
}

impl IntoChildren for Node {
    fn into_children(self) -> Vec<Node> {
        vec![self]
    }
}

impl IntoChildren for Element {
    fn into_children(self) -> Vec<Node> {
        vec![self.into()]
    }
}

impl IntoChildren for &str {
    fn into_children(self) -> Vec<Node> {
        vec![Node::from(self)]
    }
}

impl IntoChildren for String {
    fn into_children(self) -> Vec<Node> {
        vec![Node::from(self)]
    }
}

impl IntoChildren for () {
    fn into_children(self) -> Vec<Node> {
        Vec::new()
    }
}

impl<C: IntoChildren> IntoChildren for Option<C> {
    fn into_children(self) -> Vec<Node> {
        match self {
            Some(children) => children.into_children(),
            None => Vec::new(),
        }
    }
}

impl<const N: usize> IntoChildren for [Node; N] {
    fn into_children(self) -> Vec<Node> {
        self.into_iter().collect()
    }
}

/// Attribute normalization for the builder entry points.
pub trait IntoAttrs {
    fn into_attrs(self) -> Vec<(CompactString, Value)>;
}

impl IntoAttrs for Vec<(CompactString, Value)> {
    fn into_attrs(self) -> Vec<(CompactString, Value)> {
        self
    }
}

impl IntoAttrs for () {
    fn into_attrs(self) -> Vec<(CompactString, Value)> {
        Vec::new()
    }
}

impl<K, V, const N: usize> IntoAttrs for [(K, V); N]
where
    K: Into<CompactString>,
    V: Into<Value>,
{
    fn into_attrs(self) -> Vec<(CompactString, Value)> {
        self.into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn children_normalize() {
        assert!(().into_children().is_empty());
        assert!(None::<Node>.into_children().is_empty());
        assert_eq!("hi".into_children(), vec![Node::text("hi")]);
        let node = Node::text("x");
        assert_eq!(node.clone().into_children(), vec![node]);
    }

    #[test]
    fn void_flag_follows_tag() {
        assert!(Element::new("br").void);
        assert!(!Element::new("div").void);
    }

    #[test]
    fn tree_serializes_to_json() {
        let node: Node = Element::new("div").attr("id", "x").child("hi").into();
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["Element"]["tag"], "div");
    }
}
