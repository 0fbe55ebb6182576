//! Caller-side retry for conflict-prone operations.
//!
//! Use cases never retry on their own; a caller that gets a conflict decides
//! whether to try again. `with_retry` re-runs the whole operation (fresh
//! read included) with exponential backoff while the error says it is worth
//! retrying.

use std::future::Future;
use std::time::Duration;

use crate::command_dispatcher::DispatchError;
use crate::repository::StoreError;

/// Errors that may succeed when the operation is re-run from scratch.
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

impl Retryable for StoreError {
    fn is_retryable(&self) -> bool {
        self.is_conflict()
    }
}

impl<E: Retryable> Retryable for DispatchError<E> {
    fn is_retryable(&self) -> bool {
        match self {
            DispatchError::Handler(e) => e.is_retryable(),
            DispatchError::Unregistered(_) | DispatchError::TimedOut(_) => false,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total calls, the first one included (1 disables retrying).
    pub max_attempts: u32,
    pub initial_backoff: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(20),
        }
    }
}

impl RetryConfig {
    /// Backoff before retry number `attempt + 1`: `initial_backoff * 2^attempt`.
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.initial_backoff.saturating_mul(factor)
    }
}

/// Run `action` until it succeeds, fails with a non-retryable error, or
/// `max_attempts` calls have been made (the last error is returned).
pub async fn with_retry<F, Fut, T, E>(config: RetryConfig, mut action: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + core::fmt::Display,
{
    let mut attempt = 0u32;
    loop {
        match action().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt + 1 < config.max_attempts => {
                let backoff = config.backoff_for(attempt);
                tracing::warn!(
                    attempt = attempt + 1,
                    max_attempts = config.max_attempts,
                    ?backoff,
                    error = %e,
                    "retryable failure, retrying"
                );
                tokio::time::sleep(backoff).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
