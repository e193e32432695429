//! HTML node model, element builders, and escaping serializer.
//!
//! This crate is the data surface the rest of the workspace builds on:
//!
//! - [`Node`] / [`Element`]: the renderable tree (text leaves, elements
//!   with ordered attributes, fragments).
//! - [`Value`]: the runtime value union used for attribute bindings and
//!   template scopes.
//! - [`render`] / [`render_document`]: read-only serialization with HTML
//!   escaping; `safe` elements emit their direct text children verbatim.
//! - [`builders`]: one constructor per known HTML element, plus `h()`.
//! - [`meta`]: static tag tables (void set, known set, attribute schema).
//!
//! # Example
//!
//! ```
//! use espalier_dom::builders::{div, p};
//! use espalier_dom::Node;
//!
//! let node: Node = div([("class", "greeting")], p((), "Hello!")).into();
//! assert_eq!(
//!     node.render().unwrap(),
//!     "<div class=\"greeting\"><p>Hello!</p></div>"
//! );
//! ```

pub mod builders;
pub mod error;
pub mod meta;
pub mod node;
pub mod render;
pub mod value;

pub use error::RenderError;
pub use node::{Element, IntoAttrs, IntoChildren, Node};
pub use render::{render, render_document};
pub use value::Value;
