//! Query parse errors

use thiserror::Error;

/// Error type for query parsing
#[derive(Debug, Error)]
pub enum QueryError {
    /// Structural error (missing SELECT/WHERE, unbalanced braces)
    #[error("Query syntax error: {0}")]
    Syntax(String),

    /// A prefixed name uses an unregistered prefix
    #[error("Unknown prefix in {0:?}")]
    UnknownPrefix(String),

    /// A pattern has the wrong number of terms
    #[error("Malformed pattern: {0:?}")]
    MalformedPattern(String),

    /// A projected variable does not appear in any pattern
    #[error("Output variable {0} is not bound by the query body")]
    UnboundOutput(String),
}

/// Result type for query operations
pub type Result<T> = std::result::Result<T, QueryError>;
