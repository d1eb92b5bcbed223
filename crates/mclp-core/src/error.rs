//! Error types for MCLP Forge

use thiserror::Error;

/// Main error type for MCLP Forge operations
#[derive(Debug, Error)]
pub enum MclpError {
    /// Structural or domain violation in the problem data.
    ///
    /// Raised while constructing [`ProblemData`](crate::ProblemData) or a
    /// model variant, always before any solver is invoked.
    #[error("Malformed input: `{field}` {reason}")]
    MalformedInput { field: String, reason: String },

    /// The MILP backend failed to produce an answer (crash, timeout, bad status)
    #[error("Solver error: {0}")]
    Solver(String),

    /// The assignment returned by a solver adapter violates its contract
    #[error("Invalid assignment: {0}")]
    InvalidAssignment(String),

    /// Error reading an instance file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Instance file is not valid in its declared format
    #[error("{format} parse error: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },
}

impl MclpError {
    /// Creates a [`MclpError::MalformedInput`] for the given input field.
    pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        MclpError::MalformedInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns the offending field name for malformed input errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            MclpError::MalformedInput { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Result type alias for MCLP Forge operations
pub type Result<T> = std::result::Result<T, MclpError>;
