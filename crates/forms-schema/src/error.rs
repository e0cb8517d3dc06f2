//! Error types for the form schema codec
//!
//! Provides:
//! - Syntax errors from the node-document parser
//! - Decode errors raised when text cannot become a form
//! - Per-field validation errors attached to questions and options

use serde::{Deserialize, Serialize};

/// Syntax error with 1-based source position
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}, column {column}: {message}")]
pub struct SyntaxError {
    /// Line of the offending character
    pub line: usize,
    /// Column of the offending character
    pub column: usize,
    /// What the parser expected
    pub message: String,
}

impl SyntaxError {
    /// Create syntax error at position
    pub fn new(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }
}

/// Errors while decoding a form document
///
/// Hosts catch these and fall back to an empty question list; a bad
/// document never ends an editing session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Text is not a well-formed node document
    #[error("malformed document at line {line}, column {column}: {message}")]
    MalformedDocument {
        line: usize,
        column: usize,
        message: String,
    },

    /// Document parsed but has no top-level `form` node
    #[error("document has no top-level form node")]
    MissingFormNode,
}

impl DecodeError {
    /// Create malformed document error
    pub fn malformed(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::MalformedDocument {
            line,
            column,
            message: message.into(),
        }
    }
}

impl From<SyntaxError> for DecodeError {
    fn from(err: SyntaxError) -> Self {
        Self::MalformedDocument {
            line: err.line,
            column: err.column,
            message: err.message,
        }
    }
}

/// Validation error attached to a question or option
///
/// Display text is the message shown next to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum FieldError {
    /// Question title is blank
    #[error("Question text cannot be empty.")]
    EmptyTitle,

    /// Option label is blank
    #[error("Option text cannot be empty.")]
    EmptyOptionLabel,

    /// Option label repeats another in the same question
    #[error("Duplicate option found.")]
    DuplicateOption,
}

/// Result type alias for decode operations
pub type DecodeResult<T> = Result<T, DecodeError>;
