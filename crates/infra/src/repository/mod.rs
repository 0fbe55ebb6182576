//! Persistence port for versioned entities.
//!
//! Use cases load an entity with `find`, mutate it in memory and hand it back
//! with an explicit `save`. Nothing is tracked implicitly: whatever the entity
//! looks like when `save` is called is what gets stored, and only if nobody
//! else saved it in between.

pub mod in_memory;

pub use in_memory::InMemoryRepository;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use stockroom_core::{ErrorCategory, Versioned};

/// Store operation error.
///
/// These are **infrastructure errors** as opposed to domain errors
/// (validation, invariants). A caller that gets one must assume the write did
/// not happen.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Optimistic concurrency check failed; reload and retry.
    #[error("optimistic concurrency check failed: {0}")]
    Conflict(String),

    /// The backend could not serve the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict(_))
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            StoreError::Conflict(_) => ErrorCategory::Conflict,
            StoreError::Unavailable(_) => ErrorCategory::Unavailable,
        }
    }
}

/// Keyed store for a single entity type.
///
/// ## Save semantics
///
/// `save()`:
/// - compares the entity's `version()` with the stored version
///   (`ExpectedVersion::Exact`); an entity that was never saved has version 0
/// - on mismatch fails with `StoreError::Conflict` and stores nothing
/// - otherwise stores the entity atomically with `version + 1` and returns the
///   new version
/// - is commit-or-nothing if its future is dropped (e.g. by a dispatcher
///   timeout): either the full write lands or none of it does
///
/// ## Find semantics
///
/// `find()` is a single-key point read. It returns `Ok(None)` when no entity
/// exists for the id; `Err` is reserved for backend failures.
#[async_trait]
pub trait Repository<E>: Send + Sync
where
    E: Versioned + Clone + Send + Sync + 'static,
    E::Id: Send + Sync,
{
    async fn find(&self, id: &E::Id) -> Result<Option<E>, StoreError>;

    async fn save(&self, entity: &E) -> Result<u64, StoreError>;
}

#[async_trait]
impl<E, S> Repository<E> for Arc<S>
where
    S: Repository<E> + ?Sized,
    E: Versioned + Clone + Send + Sync + 'static,
    E::Id: Send + Sync,
{
    async fn find(&self, id: &E::Id) -> Result<Option<E>, StoreError> {
        (**self).find(id).await
    }

    async fn save(&self, entity: &E) -> Result<u64, StoreError> {
        (**self).save(entity).await
    }
}
