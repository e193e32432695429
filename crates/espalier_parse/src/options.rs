//! Parser options.

/// Whitespace handling strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WhitespaceStrategy {
    /// Keep text runs exactly as written (default)
    #[default]
    Preserve,
    /// Drop whitespace-only runs between elements and collapse internal
    /// whitespace runs to single spaces
    Condense,
}

/// Parser options
#[derive(Debug, Clone)]
pub struct ParserOptions {
    /// Whitespace handling for text runs
    pub whitespace: WhitespaceStrategy,
    /// Whether to keep comment nodes in the tree
    pub comments: bool,
    /// Whether a tag is a void element (no children, no close tag)
    pub is_void_tag: fn(&str) -> bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            whitespace: WhitespaceStrategy::Preserve,
            comments: true,
            is_void_tag: espalier_dom::meta::is_void_tag,
        }
    }
}
