use thiserror::Error;

use stockroom_core::{DomainError, ErrorCategory, ProductId, ValidationErrors};
use stockroom_infra::{HasCategory, Retryable, StoreError};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AddStocksError {
    /// Command rejected before the store was queried.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// No product exists for the id; nothing was written.
    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    /// The increment would break a product invariant; nothing was written.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// The store failed to load or commit; the increment is not applied.
    #[error("persistence failed: {0}")]
    Persistence(#[from] StoreError),

    /// The caller cancelled before the increment was committed.
    #[error("cancelled before the increment was committed")]
    Cancelled,
}

impl AddStocksError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AddStocksError::Validation(_) => ErrorCategory::BadRequest,
            AddStocksError::ProductNotFound(_) => ErrorCategory::NotFound,
            AddStocksError::InvariantViolation(_) => ErrorCategory::Unprocessable,
            AddStocksError::Persistence(e) => e.category(),
            AddStocksError::Cancelled => ErrorCategory::Cancelled,
        }
    }
}

impl From<ValidationErrors> for AddStocksError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}

impl From<DomainError> for AddStocksError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation(errors) => AddStocksError::Validation(errors),
            DomainError::InvariantViolation(msg) => AddStocksError::InvariantViolation(msg),
        }
    }
}

impl HasCategory for AddStocksError {
    fn category(&self) -> ErrorCategory {
        AddStocksError::category(self)
    }
}

/// Only store conflicts are worth re-running; a missing product stays missing.
impl Retryable for AddStocksError {
    fn is_retryable(&self) -> bool {
        matches!(self, AddStocksError::Persistence(e) if e.is_retryable())
    }
}
