//! Infrastructure layer: persistence port, request dispatch, retry, config.

pub mod command_dispatcher;
pub mod config;
pub mod repository;
pub mod retry;

pub use command_dispatcher::{CommandDispatcher, DispatchError, HasCategory, Request, RequestHandler};
pub use config::{ConfigError, InfraConfig};
pub use repository::{InMemoryRepository, Repository, StoreError};
pub use retry::{RetryConfig, Retryable, with_retry};

/// Re-exported so callers build cancellation signals from the same crate
/// the handlers observe.
pub use tokio_util::sync::CancellationToken;
