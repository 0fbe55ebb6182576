//! Products domain module.
//!
//! The `Product` entity and the business rules for changing its stock level,
//! implemented as deterministic domain logic (no IO, no storage).

pub mod product;

pub use product::Product;
