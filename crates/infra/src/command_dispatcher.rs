//! Request dispatch (application-level orchestration).
//!
//! `CommandDispatcher` is an explicit registry from request type to handler.
//! Every use case registers its handler once at startup; dispatching a
//! request looks the handler up by the request's type and runs it under the
//! caller's cancellation token and the configured timeout.
//!
//! ```text
//! Request
//!   ↓
//! 1. Resolve handler by request type (unregistered → DispatchError::Unregistered)
//!   ↓
//! 2. Run handler (validation, load, mutate, save happen inside)
//!   ↓
//! 3. Enforce timeout (elapsed → handler future dropped, DispatchError::TimedOut)
//! ```
//!
//! The dispatcher adds no behavior of its own beyond routing and the
//! deadline, so calling a handler directly is always equivalent.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use stockroom_core::ErrorCategory;

use crate::config::InfraConfig;

/// An input value routed to exactly one handler.
pub trait Request: Send + 'static {
    type Response: Send + 'static;
    type Error: std::error::Error + Send + Sync + 'static;
}

/// Executes one request type.
///
/// Implementations must honour `cancel` at every suspension point and must
/// not leave a partial write behind when they return early.
#[async_trait]
pub trait RequestHandler<R: Request>: Send + Sync {
    async fn handle(&self, request: R, cancel: &CancellationToken) -> Result<R::Response, R::Error>;
}

#[derive(Debug, Error)]
pub enum DispatchError<E> {
    /// No handler was registered for the request type.
    #[error("no handler registered for {0}")]
    Unregistered(&'static str),
    /// The configured deadline elapsed before the handler finished.
    #[error("request timed out after {0:?}")]
    TimedOut(Duration),
    /// The handler ran and failed.
    #[error(transparent)]
    Handler(E),
}

impl<E> DispatchError<E> {
    /// The handler's own error, if the failure came from the handler.
    pub fn into_handler_error(self) -> Option<E> {
        match self {
            DispatchError::Handler(e) => Some(e),
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory
    where
        E: HasCategory,
    {
        match self {
            DispatchError::Unregistered(_) => ErrorCategory::Unavailable,
            DispatchError::TimedOut(_) => ErrorCategory::Cancelled,
            DispatchError::Handler(e) => e.category(),
        }
    }
}

/// Errors that know which response class they belong to.
pub trait HasCategory {
    fn category(&self) -> ErrorCategory;
}

type Registration<R> = Arc<dyn RequestHandler<R>>;

/// Explicit request → handler registry.
#[derive(Default)]
pub struct CommandDispatcher {
    handlers: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
    timeout: Option<Duration>,
}

impl CommandDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &InfraConfig) -> Self {
        Self::new().with_timeout(config.dispatch_timeout)
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Register `handler` for requests of type `R`, replacing any previous one.
    pub fn register<R, H>(&mut self, handler: H) -> &mut Self
    where
        R: Request,
        H: RequestHandler<R> + 'static,
    {
        let handler: Registration<R> = Arc::new(handler);
        if self
            .handlers
            .insert(TypeId::of::<R>(), Box::new(handler))
            .is_some()
        {
            tracing::debug!(request = std::any::type_name::<R>(), "handler replaced");
        }
        self
    }

    pub fn is_registered<R: Request>(&self) -> bool {
        self.handlers.contains_key(&TypeId::of::<R>())
    }

    fn resolve<R: Request>(&self) -> Option<Registration<R>> {
        self.handlers
            .get(&TypeId::of::<R>())
            .and_then(|h| h.downcast_ref::<Registration<R>>())
            .cloned()
    }

    /// Route `request` to its registered handler.
    #[tracing::instrument(skip_all, fields(request = std::any::type_name::<R>()))]
    pub async fn dispatch<R: Request>(
        &self,
        request: R,
        cancel: &CancellationToken,
    ) -> Result<R::Response, DispatchError<R::Error>> {
        let request_type = std::any::type_name::<R>();
        let handler = self.resolve::<R>().ok_or_else(|| {
            tracing::error!("no handler registered");
            DispatchError::Unregistered(request_type)
        })?;

        let handled = handler.handle(request, cancel);

        match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, handled).await {
                Ok(result) => result.map_err(DispatchError::Handler),
                Err(_) => {
                    tracing::warn!(timeout = ?limit, "request timed out");
                    Err(DispatchError::TimedOut(limit))
                }
            },
            None => handled.await.map_err(DispatchError::Handler),
        }
    }
}

impl core::fmt::Debug for CommandDispatcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CommandDispatcher")
            .field("handlers", &self.handlers.len())
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Ping(u32);

    #[derive(Debug, Error, PartialEq, Eq)]
    #[error("pong failed")]
    struct PongError;

    impl HasCategory for PongError {
        fn category(&self) -> ErrorCategory {
            ErrorCategory::BadRequest
        }
    }

    impl Request for Ping {
        type Response = u32;
        type Error = PongError;
    }

    struct Doubler;

    #[async_trait]
    impl RequestHandler<Ping> for Doubler {
        async fn handle(&self, request: Ping, _cancel: &CancellationToken) -> Result<u32, PongError> {
            if request.0 == 0 {
                return Err(PongError);
            }
            Ok(request.0 * 2)
        }
    }

    struct Tripler;

    #[async_trait]
    impl RequestHandler<Ping> for Tripler {
        async fn handle(&self, request: Ping, _cancel: &CancellationToken) -> Result<u32, PongError> {
            Ok(request.0 * 3)
        }
    }

    struct Sleeper;

    #[async_trait]
    impl RequestHandler<Ping> for Sleeper {
        async fn handle(&self, request: Ping, _cancel: &CancellationToken) -> Result<u32, PongError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(request.0)
        }
    }

    #[tokio::test]
    async fn routes_to_registered_handler() {
        let mut dispatcher = CommandDispatcher::new();
        dispatcher.register::<Ping, _>(Doubler);

        assert!(dispatcher.is_registered::<Ping>());
        let out = dispatcher.dispatch(Ping(21), &CancellationToken::new()).await.unwrap();
        assert_eq!(out, 42);
    }

    #[tokio::test]
    async fn handler_errors_pass_through() {
        let mut dispatcher = CommandDispatcher::new();
        dispatcher.register::<Ping, _>(Doubler);

        let err = dispatcher.dispatch(Ping(0), &CancellationToken::new()).await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::BadRequest);
        assert_eq!(err.into_handler_error(), Some(PongError));
    }

    #[tokio::test]
    async fn unregistered_request_is_reported() {
        let dispatcher = CommandDispatcher::new();
        assert!(!dispatcher.is_registered::<Ping>());

        let err = dispatcher.dispatch(Ping(1), &CancellationToken::new()).await.unwrap_err();
        assert!(matches!(err, DispatchError::Unregistered(name) if name.ends_with("Ping")));
    }

    #[tokio::test]
    async fn re_registering_replaces_handler() {
        let mut dispatcher = CommandDispatcher::new();
        dispatcher.register::<Ping, _>(Doubler).register::<Ping, _>(Tripler);

        let out = dispatcher.dispatch(Ping(2), &CancellationToken::new()).await.unwrap();
        assert_eq!(out, 6);
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_is_enforced() {
        let mut dispatcher = CommandDispatcher::new().with_timeout(Some(Duration::from_millis(50)));
        dispatcher.register::<Ping, _>(Sleeper);

        let err = dispatcher.dispatch(Ping(1), &CancellationToken::new()).await.unwrap_err();
        assert!(matches!(err, DispatchError::TimedOut(d) if d == Duration::from_millis(50)));
        assert_eq!(err.category(), ErrorCategory::Cancelled);
    }

    #[test]
    fn from_config_uses_dispatch_timeout() {
        let config = InfraConfig {
            dispatch_timeout: Some(Duration::from_millis(250)),
            ..InfraConfig::default()
        };
        let dispatcher = CommandDispatcher::from_config(&config);
        assert_eq!(dispatcher.timeout(), Some(Duration::from_millis(250)));
    }
}
