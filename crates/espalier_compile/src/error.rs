//! Compiler errors.
//!
//! Everything here is fatal to the compile call that raised it; only the
//! markup parser recovers. The host's web adapter is expected to translate
//! these into a 500-class response.

use compact_str::CompactString;
use thiserror::Error;

use espalier_dom::RenderError;

use crate::eval::EvalError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    /// An embedded expression (attribute or interpolation) failed to
    /// evaluate. Carries the source expression text.
    #[error("failed to evaluate `{expr}`: {source}")]
    Eval {
        expr: String,
        #[source]
        source: EvalError,
    },

    /// A custom tag matched no registered component (strict mode only).
    #[error("cannot resolve a component for tag `{tag}`")]
    UnresolvedComponent { tag: CompactString },

    /// A supplied prop's runtime type does not match the declared one.
    #[error("prop `{prop}` of component `{component}`: expected {expected}, got {found}")]
    PropTypeMismatch {
        component: CompactString,
        prop: CompactString,
        expected: &'static str,
        found: &'static str,
    },

    /// Required props were absent; all missing names in one error.
    #[error("component `{component}` is missing {} required prop(s): {}", missing.len(), missing.join(", "))]
    MissingProps {
        component: CompactString,
        missing: Vec<String>,
    },

    /// `{{ ... }}` inside a static attribute value.
    #[error("attribute `{attr}` uses interpolation markers; bind it with a `:` prefix instead")]
    InterpolationInAttribute { attr: CompactString },

    /// Strict-mode schema violation on a built-in element.
    #[error("attribute `{attr}` on `<{tag}>`: {reason}")]
    InvalidAttribute {
        tag: CompactString,
        attr: CompactString,
        reason: String,
    },

    #[error(transparent)]
    Render(#[from] RenderError),
}
