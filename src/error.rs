//! Central error types for classcheck.
//!
//! Uses `thiserror` for ergonomic error definitions with automatic
//! `Display` and `From` implementations.
//!
//! The analysis passes themselves never fail: parse anomalies are tolerated
//! by bounding every walk on scope braces and stream end. Errors surface
//! only from stream construction (bracket linking) and serialization.

use thiserror::Error;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum CheckError {
    /// An opening bracket has no matching closer before the stream ends.
    #[error("unmatched opening '{bracket}' at token {index}")]
    UnmatchedOpen { bracket: char, index: usize },

    /// A closing bracket appeared with no opener on the stack.
    #[error("unmatched closing '{bracket}' at token {index}")]
    UnmatchedClose { bracket: char, index: usize },

    /// A closing bracket did not pair with the innermost opener.
    #[error("mismatched '{open}' closed by '{close}' at token {index}")]
    MismatchedBracket { open: char, close: char, index: usize },

    /// JSON serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Convenience type alias for Results using CheckError.
pub type Result<T> = std::result::Result<T, CheckError>;
