//! Inference error types
//!
//! Everything here is a load-phase configuration error: once a rule set
//! compiles, the fixed-point driver itself has no recoverable errors.

use thiserror::Error;

/// Reasoner errors
#[derive(Debug, Error)]
pub enum ReasonerError {
    /// Core store error
    #[error("Core error: {0}")]
    Core(#[from] parajudica_core::Error),

    /// A rule references a vocabulary term outside the registered namespaces
    #[error("Unknown vocabulary term in rule {rule}: {term}")]
    UnknownTerm { rule: String, term: String },

    /// A rule mints a label outside its framework's namespace
    #[error("Label ownership violation in rule {rule}: framework {framework} cannot mint {label}")]
    LabelOwnership {
        rule: String,
        framework: String,
        label: String,
    },

    /// Malformed rule definition (unbound head variable, variable label, ...)
    #[error("Invalid rule {rule}: {message}")]
    InvalidRule { rule: String, message: String },

    /// Duplicate or missing framework in a bundle selection
    #[error("Invalid framework selection: {0}")]
    FrameworkSelection(String),
}

/// Result type for reasoning operations
pub type Result<T> = std::result::Result<T, ReasonerError>;
