//! Core error types for taskrank-core.
//!
//! The engine itself has one designed failure mode: a detected
//! dependency cycle while scoring in strict mode. Input shape problems
//! belong to the collaborator layer, which uses [`ValidationError`] to
//! report them before a batch ever reaches the engine. Missing optional
//! fields are never errors; they degrade to documented defaults.

use thiserror::Error;

/// Core error type for taskrank-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A dependency cycle was detected while scoring in strict mode.
    /// Carries the identifiers of every task participating in a cycle.
    #[error("Circular dependency detected involving: {}", members.join(", "))]
    CircularDependency { members: Vec<String> },

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Field-level validation errors.
///
/// Raised by the collaborator layer (the CLI payload decoder) before a
/// batch reaches the engine; the engine assumes well-typed input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Importance rating outside the accepted 1-10 range
    #[error("importance must be between 1 and 10, got {0}")]
    ImportanceOutOfRange(i64),

    /// Negative effort estimate
    #[error("estimated_hours must be non-negative, got {0}")]
    NegativeHours(f64),

    /// Unparseable calendar date
    #[error("invalid due_date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    /// Task without a title (titles double as fallback identifiers)
    #[error("missing or empty title")]
    MissingTitle,

    /// Invalid value
    #[error("invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
