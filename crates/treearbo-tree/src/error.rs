//! Tree and span error definitions.

use smol_str::SmolStr;
use thiserror::Error;

use crate::Span;

/// A span slicing error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SpanError {
    #[error("Begin value {begin} out of range {span}")]
    BeginOutOfRange { begin: isize, span: Span },

    #[error("End value {end} out of range {span}")]
    EndOutOfRange { end: isize, span: Span },

    #[error("End value {end} can't be less than begin value, {span}")]
    Inverted { end: isize, span: Span },
}

/// A tree construction error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TreeError {
    /// Structural labels cannot contain spaces, tabs, newlines or backslashes.
    #[error("Wrong type {ty:?}")]
    WrongType { ty: SmolStr },

    #[error("Empty type for a structural node")]
    EmptyType,
}
