//! Input validation: small composable rules returning typed failures.
//!
//! Validators run before a use case touches any state. A rule produces at
//! most one [`FieldError`]; a [`Validator`] collects the failures of all its
//! rules so callers see every problem with a request at once.

use serde::{Deserialize, Serialize};

/// Validates a value of type `T`.
pub trait Validator<T: ?Sized> {
    fn validate(&self, value: &T) -> Result<(), ValidationErrors>;
}

/// A single rule failure attached to a named field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl core::fmt::Display for FieldError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Non-empty collection of rule failures (once returned as an error).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of a rule; passing rules yield `None`.
    pub fn check(&mut self, outcome: Option<FieldError>) -> &mut Self {
        if let Some(err) = outcome {
            self.0.push(err);
        }
        self
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// First failure recorded for `field`, if any.
    pub fn field(&self, field: &str) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }

    /// `Ok(())` when no rule failed, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), Self> {
        if self.0.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl From<FieldError> for ValidationErrors {
    fn from(value: FieldError) -> Self {
        Self(vec![value])
    }
}

impl core::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (idx, err) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            core::fmt::Display::fmt(err, f)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Reusable rule functions.
pub mod rules {
    use core::fmt::Display;

    use super::FieldError;

    /// `value` must be strictly greater than `bound`.
    pub fn greater_than<N>(field: &str, value: N, bound: N) -> Option<FieldError>
    where
        N: PartialOrd + Display,
    {
        if value > bound {
            None
        } else {
            Some(FieldError::new(
                field,
                format!("must be greater than {bound} (was {value})"),
            ))
        }
    }

    /// `value` must be greater than or equal to `bound`.
    pub fn at_least<N>(field: &str, value: N, bound: N) -> Option<FieldError>
    where
        N: PartialOrd + Display,
    {
        if value >= bound {
            None
        } else {
            Some(FieldError::new(
                field,
                format!("must be at least {bound} (was {value})"),
            ))
        }
    }

    /// `value` must contain at least one non-whitespace character.
    pub fn not_blank(field: &str, value: &str) -> Option<FieldError> {
        if value.trim().is_empty() {
            Some(FieldError::new(field, "cannot be empty"))
        } else {
            None
        }
    }
}
