//! Server-side HTML components with template compilation.
//!
//! Espalier builds HTML trees from composable, function-based components
//! and serializes them to escaped HTML strings for delivery inside a host
//! web framework. Trees come from two equivalent surfaces:
//!
//! - the **builder API** — one constructor per HTML element:
//!
//! ```
//! use espalier::builders::{div, p};
//!
//! let node = div([("class", "greeting")], p((), "Hello!"));
//! assert_eq!(
//!     node.into_node().render().unwrap(),
//!     r#"<div class="greeting"><p>Hello!</p></div>"#
//! );
//! ```
//!
//! - the **template compiler** — markup with `{{ expr }}` interpolation,
//!   `:attr="expr"` dynamic attributes, and custom tags resolved against
//!   registered components:
//!
//! ```
//! use espalier::{html, Scope};
//!
//! let globals = Scope::new().with("name", "World");
//! let node = html(r#"<p>Hello {{ name }}</p>"#, &globals, &Scope::new()).unwrap();
//! assert_eq!(node.render().unwrap(), "<p>Hello World</p>");
//! ```
//!
//! Scopes are explicit `(globals, locals)` parameters; locals shadow
//! globals everywhere. Expression evaluation is a pluggable capability and
//! a trust boundary — see [`Evaluator`]. With the `web` feature, the
//! [`web`] module wraps rendered trees into `rouille` responses.

pub mod context;

pub use espalier_compile::{
    compile, CompileError, CompileOptions, ComponentDef, EvalError, Evaluator, ExprEvaluator,
    ParamType, Props, ResolutionMode, Scope, ScopeChain, TemplateCompiler,
};
pub use espalier_dom::{
    builders, meta, render, render_document, Element, Node, RenderError, Value,
};
pub use espalier_parse::{parse, ParseError, ParserOptions, WhitespaceStrategy};

pub use context::{use_context, Context, ContextError};

#[cfg(feature = "web")]
pub use espalier_web as web;

/// Compile a template against a `(globals, locals)` scope pair.
///
/// Convenience alias for [`compile`].
pub fn html(
    source: &str,
    globals: &Scope,
    locals: &Scope,
) -> Result<Node, CompileError> {
    compile(source, globals, locals)
}
