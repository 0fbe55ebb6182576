//! Domain error model.

use thiserror::Error;

use crate::validation::ValidationErrors;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures.
/// Conflicts and other storage failures belong to the infrastructure layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input failed one or more validation rules.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl DomainError {
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            DomainError::Validation(_) => ErrorCategory::BadRequest,
            DomainError::InvariantViolation(_) => ErrorCategory::Unprocessable,
        }
    }
}

impl From<ValidationErrors> for DomainError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}

/// Coarse response class for a failure.
///
/// Transports wrapping a use case map each category onto their own status
/// space (HTTP status codes, RPC codes, exit codes) instead of collapsing
/// every failure into a generic error.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Caller input was rejected before any state was touched.
    BadRequest,
    /// A referenced entity does not exist.
    NotFound,
    /// Input was well-formed but would break a domain invariant.
    Unprocessable,
    /// Concurrent modification; retrying with a fresh read may succeed.
    Conflict,
    /// The backing store could not complete the operation.
    Unavailable,
    /// The caller cancelled the operation or its deadline elapsed.
    Cancelled,
}

impl ErrorCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCategory::BadRequest => "bad_request",
            ErrorCategory::NotFound => "not_found",
            ErrorCategory::Unprocessable => "unprocessable",
            ErrorCategory::Conflict => "conflict",
            ErrorCategory::Unavailable => "unavailable",
            ErrorCategory::Cancelled => "cancelled",
        }
    }
}

impl core::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
