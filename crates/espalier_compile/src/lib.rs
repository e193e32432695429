//! Template compiler for Espalier.
//!
//! Turns markup strings with `{{ expr }}` interpolation and
//! `:attr="expr"` dynamic attributes into [`espalier_dom::Node`] trees,
//! resolving custom tags against components registered in an explicit
//! `(globals, locals)` scope pair. Locals shadow globals at every
//! resolution point: attribute expressions, text interpolation, and
//! tag-to-component lookup.
//!
//! ```
//! use espalier_compile::{compile, Scope};
//!
//! let globals = Scope::new().with("name", "World");
//! let node = compile(
//!     r#"<div class="a"><p>Hello {{ name }}</p></div>"#,
//!     &globals,
//!     &Scope::new(),
//! )
//! .unwrap();
//! assert_eq!(
//!     node.render().unwrap(),
//!     r#"<div class="a"><p>Hello World</p></div>"#
//! );
//! ```
//!
//! Expression evaluation is a pluggable capability (and a trust
//! boundary) — see [`eval::Evaluator`].

pub mod compile;
pub mod error;
pub mod eval;
pub mod options;
pub mod registry;
pub mod scope;

pub use compile::{compile, TemplateCompiler};
pub use error::CompileError;
pub use eval::{EvalError, Evaluator, ExprEvaluator};
pub use options::{CompileOptions, ResolutionMode};
pub use registry::{ComponentDef, ComponentFn, ParamSpec, ParamType, Props};
pub use scope::{Scope, ScopeChain};
