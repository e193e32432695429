//! Serializer errors.

use compact_str::CompactString;
use thiserror::Error;

/// Errors raised while serializing a node tree to HTML.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// An attribute value is not a string, integer, or boolean.
    #[error("invalid type for attribute `{name}`: expected string, integer, or boolean, got {found}")]
    InvalidAttributeType {
        name: CompactString,
        found: &'static str,
    },
}
