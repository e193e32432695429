//! Compiler options.

use espalier_parse::ParserOptions;

/// Policy for tags that match neither a built-in element nor a registered
/// component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionMode {
    /// Render the tag as a generic element (default).
    #[default]
    Lenient,
    /// Raise `UnresolvedComponent`, and type-check built-in element
    /// attributes against the static schema.
    Strict,
}

/// Template compiler options.
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    pub resolution: ResolutionMode,
    pub parser: ParserOptions,
}
