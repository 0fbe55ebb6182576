use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use stockroom_core::{Entity, ExpectedVersion, Versioned};

use super::{Repository, StoreError};

/// In-memory versioned entity store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug)]
pub struct InMemoryRepository<E: Entity> {
    entities: RwLock<HashMap<E::Id, E>>,
}

impl<E> InMemoryRepository<E>
where
    E: Versioned + Clone,
{
    pub fn new() -> Self {
        Self {
            entities: RwLock::new(HashMap::new()),
        }
    }

    /// Store `entity` without a version check (seeding, fixtures).
    pub fn insert(&self, entity: E) -> Result<u64, StoreError> {
        self.write(&entity, ExpectedVersion::Any)
    }

    /// Snapshot of the stored entity, if any.
    pub fn get(&self, id: &E::Id) -> Option<E> {
        let map = self.entities.read().ok()?;
        map.get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.entities.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn write(&self, entity: &E, expected: ExpectedVersion) -> Result<u64, StoreError> {
        let mut map = self
            .entities
            .write()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;

        let current = map.get(entity.id()).map(|e| e.version()).unwrap_or(0);
        if !expected.matches(current) {
            return Err(StoreError::conflict(format!(
                "expected {expected:?}, found {current} for {:?}",
                entity.id()
            )));
        }

        let next = current + 1;
        let mut stored = entity.clone();
        stored.set_version(next);
        map.insert(entity.id().clone(), stored);

        Ok(next)
    }
}

impl<E> Default for InMemoryRepository<E>
where
    E: Versioned + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E> Repository<E> for InMemoryRepository<E>
where
    E: Versioned + Clone + Send + Sync + 'static,
    E::Id: Send + Sync,
{
    async fn find(&self, id: &E::Id) -> Result<Option<E>, StoreError> {
        let map = self
            .entities
            .read()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        Ok(map.get(id).cloned())
    }

    async fn save(&self, entity: &E) -> Result<u64, StoreError> {
        self.write(entity, ExpectedVersion::Exact(entity.version()))
    }
}
