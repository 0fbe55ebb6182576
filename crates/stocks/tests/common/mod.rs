//! Repository test doubles shared by the integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Barrier;

use stockroom_core::ProductId;
use stockroom_infra::{CancellationToken, InMemoryRepository, Repository, StoreError};
use stockroom_products::Product;

pub fn seeded(products: &[(i32, i64)]) -> Arc<InMemoryRepository<Product>> {
    let repo = InMemoryRepository::new();
    for (id, stock) in products {
        repo.insert(Product::new(ProductId::new(*id), format!("Product {id}"), *stock).unwrap())
            .unwrap();
    }
    Arc::new(repo)
}

pub fn stock_of(repo: &InMemoryRepository<Product>, id: i32) -> i64 {
    repo.get(&ProductId::new(id)).unwrap().quantity_in_stock()
}

/// Counts calls before delegating.
pub struct RecordingRepository {
    pub inner: Arc<InMemoryRepository<Product>>,
    pub finds: AtomicUsize,
    pub saves: AtomicUsize,
}

impl RecordingRepository {
    pub fn new(inner: Arc<InMemoryRepository<Product>>) -> Self {
        Self {
            inner,
            finds: AtomicUsize::new(0),
            saves: AtomicUsize::new(0),
        }
    }

    pub fn finds(&self) -> usize {
        self.finds.load(Ordering::SeqCst)
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Repository<Product> for RecordingRepository {
    async fn find(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        self.finds.fetch_add(1, Ordering::SeqCst);
        self.inner.find(id).await
    }

    async fn save(&self, entity: &Product) -> Result<u64, StoreError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save(entity).await
    }
}

/// Reads work; every commit fails as if the backend were down.
pub struct UnavailableOnSave {
    pub inner: Arc<InMemoryRepository<Product>>,
}

#[async_trait]
impl Repository<Product> for UnavailableOnSave {
    async fn find(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        self.inner.find(id).await
    }

    async fn save(&self, _entity: &Product) -> Result<u64, StoreError> {
        Err(StoreError::unavailable("connection refused"))
    }
}

/// The lookup never completes.
pub struct HangingFind;

#[async_trait]
impl Repository<Product> for HangingFind {
    async fn find(&self, _id: &ProductId) -> Result<Option<Product>, StoreError> {
        std::future::pending().await
    }

    async fn save(&self, _entity: &Product) -> Result<u64, StoreError> {
        panic!("save must not be reached");
    }
}

/// Fires `token` as the lookup completes, i.e. while the commit is pending.
pub struct CancelAfterFind {
    pub inner: Arc<InMemoryRepository<Product>>,
    pub token: CancellationToken,
    pub saves: AtomicUsize,
}

#[async_trait]
impl Repository<Product> for CancelAfterFind {
    async fn find(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        let found = self.inner.find(id).await;
        self.token.cancel();
        found
    }

    async fn save(&self, entity: &Product) -> Result<u64, StoreError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save(entity).await
    }
}

/// Commits, then fires `token` and yields before acknowledging, i.e. the
/// caller cancels after the write already landed.
pub struct CancelAfterCommit {
    pub inner: Arc<InMemoryRepository<Product>>,
    pub token: CancellationToken,
}

#[async_trait]
impl Repository<Product> for CancelAfterCommit {
    async fn find(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        self.inner.find(id).await
    }

    async fn save(&self, entity: &Product) -> Result<u64, StoreError> {
        let version = self.inner.save(entity).await?;
        self.token.cancel();
        tokio::task::yield_now().await;
        Ok(version)
    }
}

/// Holds every lookup at a barrier so concurrent callers read the same version.
pub struct LockstepReads {
    pub inner: Arc<InMemoryRepository<Product>>,
    pub barrier: Barrier,
}

impl LockstepReads {
    pub fn new(inner: Arc<InMemoryRepository<Product>>, callers: usize) -> Self {
        Self {
            inner,
            barrier: Barrier::new(callers),
        }
    }
}

#[async_trait]
impl Repository<Product> for LockstepReads {
    async fn find(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        let found = self.inner.find(id).await;
        self.barrier.wait().await;
        found
    }

    async fn save(&self, entity: &Product) -> Result<u64, StoreError> {
        self.inner.save(entity).await
    }
}

/// Simulates a competing writer: the first commit lands someone else's
/// increment of `competing` units right before ours, so ours conflicts.
pub struct ConcurrentWriterOnce {
    pub inner: Arc<InMemoryRepository<Product>>,
    pub competing: i64,
    pub fired: AtomicBool,
}

#[async_trait]
impl Repository<Product> for ConcurrentWriterOnce {
    async fn find(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        self.inner.find(id).await
    }

    async fn save(&self, entity: &Product) -> Result<u64, StoreError> {
        if !self.fired.swap(true, Ordering::SeqCst) {
            let mut theirs = self.inner.find(&entity.id_typed()).await?.unwrap();
            theirs.increase_stock(self.competing).unwrap();
            self.inner.save(&theirs).await?;
        }
        self.inner.save(entity).await
    }
}
