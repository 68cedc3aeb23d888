//! Parser error definitions.

use thiserror::Error;
use treearbo_tree::{Span, TreeError};

/// A notation syntax error.
///
/// Each syntax variant carries the text of the offending line and the span
/// of the offending characters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StringToTreeError {
    #[error("Too few tabs {line} {span}")]
    TooFewTabs { line: String, span: Span },

    #[error("Too many tabs {line} {span}")]
    TooManyTabs { line: String, span: Span },

    #[error("Wrong nodes separator {line} {span}")]
    WrongSeparator { line: String, span: Span },

    #[error("Unexpected EOF, LF required {line} {span}")]
    UnexpectedEof { line: String, span: Span },

    #[error(transparent)]
    Tree(#[from] TreeError),
}

impl StringToTreeError {
    /// Get the span of this error.
    pub fn span(&self) -> Option<&Span> {
        match self {
            StringToTreeError::TooFewTabs { span, .. } => Some(span),
            StringToTreeError::TooManyTabs { span, .. } => Some(span),
            StringToTreeError::WrongSeparator { span, .. } => Some(span),
            StringToTreeError::UnexpectedEof { span, .. } => Some(span),
            StringToTreeError::Tree(_) => None,
        }
    }

    /// Get the text of the offending line.
    pub fn line(&self) -> Option<&str> {
        match self {
            StringToTreeError::TooFewTabs { line, .. }
            | StringToTreeError::TooManyTabs { line, .. }
            | StringToTreeError::WrongSeparator { line, .. }
            | StringToTreeError::UnexpectedEof { line, .. } => Some(line),
            StringToTreeError::Tree(_) => None,
        }
    }
}
