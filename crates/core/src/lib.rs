//! `stockroom-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod validation;

pub use entity::{Entity, ExpectedVersion, Versioned};
pub use error::{DomainError, DomainResult, ErrorCategory};
pub use id::ProductId;
pub use validation::{FieldError, ValidationErrors, Validator};
