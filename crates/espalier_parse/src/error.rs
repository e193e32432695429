//! Parse diagnostics.
//!
//! Parse problems are recoverable: they are collected while the parser
//! keeps building a best-effort tree, and returned alongside it.

use serde::Serialize;
use thiserror::Error;

use crate::ast::SourceLocation;

/// Parse error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum ErrorCode {
    /// An element was never closed.
    MissingEndTag = 1,
    /// A closing tag matches no open element.
    InvalidEndTag = 2,
    /// `</>` with no tag name.
    MissingEndTagName = 3,
    /// Input ended inside a tag.
    EofInTag = 4,
    /// Input ended inside a comment.
    EofInComment = 5,
    /// Input ended inside a `{{ ... }}` marker.
    EofInInterpolation = 6,
}

impl ErrorCode {
    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingEndTag => "Element is missing its end tag.",
            Self::InvalidEndTag => "End tag has no matching open element.",
            Self::MissingEndTagName => "End tag is missing its name.",
            Self::EofInTag => "Unexpected end of input inside a tag.",
            Self::EofInComment => "Unexpected end of input inside a comment.",
            Self::EofInInterpolation => "Unexpected end of input inside an interpolation marker.",
        }
    }
}

/// A located, recoverable parse error.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[error("{}", self.code.message())]
pub struct ParseError {
    pub code: ErrorCode,
    pub loc: Option<SourceLocation>,
}

impl ParseError {
    pub fn new(code: ErrorCode, loc: Option<SourceLocation>) -> Self {
        Self { code, loc }
    }
}
