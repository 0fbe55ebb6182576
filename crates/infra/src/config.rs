//! Configuration loading and representation.
//!
//! Every key is optional and falls back to a default. Hosts read the process
//! environment with `InfraConfig::from_lookup(|key| std::env::var(key).ok())`.

use std::time::Duration;

use thiserror::Error;

use crate::retry::RetryConfig;

pub const DISPATCH_TIMEOUT_MS: &str = "STOCKROOM_DISPATCH_TIMEOUT_MS";
pub const RETRY_MAX_ATTEMPTS: &str = "STOCKROOM_RETRY_MAX_ATTEMPTS";
pub const RETRY_BACKOFF_MS: &str = "STOCKROOM_RETRY_BACKOFF_MS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}' ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InfraConfig {
    /// Upper bound for a single dispatched request; `None` waits forever.
    pub dispatch_timeout: Option<Duration>,
    /// Budget for callers that retry conflicts.
    pub retry: RetryConfig,
}

impl InfraConfig {
    /// Build from an arbitrary key lookup (tests pass a map instead of the
    /// process environment).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let dispatch_timeout = match parse_u64(&lookup, DISPATCH_TIMEOUT_MS)? {
            Some(0) => {
                return Err(ConfigError::Invalid {
                    key: DISPATCH_TIMEOUT_MS,
                    value: "0".to_string(),
                    reason: "must be greater than zero".to_string(),
                });
            }
            Some(ms) => Some(Duration::from_millis(ms)),
            None => defaults.dispatch_timeout,
        };

        let max_attempts = match parse_u64(&lookup, RETRY_MAX_ATTEMPTS)? {
            Some(0) => {
                return Err(ConfigError::Invalid {
                    key: RETRY_MAX_ATTEMPTS,
                    value: "0".to_string(),
                    reason: "at least one attempt is required".to_string(),
                });
            }
            Some(n) => u32::try_from(n).map_err(|e| ConfigError::Invalid {
                key: RETRY_MAX_ATTEMPTS,
                value: n.to_string(),
                reason: e.to_string(),
            })?,
            None => defaults.retry.max_attempts,
        };

        let initial_backoff = parse_u64(&lookup, RETRY_BACKOFF_MS)?
            .map(Duration::from_millis)
            .unwrap_or(defaults.retry.initial_backoff);

        let config = Self {
            dispatch_timeout,
            retry: RetryConfig {
                max_attempts,
                initial_backoff,
            },
        };
        tracing::debug!(?config, "infra config loaded");
        Ok(config)
    }
}

fn parse_u64(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<u64>, ConfigError> {
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<u64>()
        .map(Some)
        .map_err(|e| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        })
}
