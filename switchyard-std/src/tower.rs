//! Tower integration.
//!
//! - [`Dispatcher`] is a `tower::Service<(R, S)>`, so tower layers can wrap a
//!   whole router.
//! - [`ServiceHandler`] turns a tower service into a terminal route handler.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use tower::{ServiceBuilder, ServiceExt};
//!
//! let service = ServiceBuilder::new()
//!     .timeout(Duration::from_secs(5))
//!     .service(router.into_dispatcher());
//! service.oneshot((request, response)).await?;
//! ```

use crate::{
    dispatch::{Dispatcher, Next},
    handler::{Handler, HandlerResult},
};
use futures::future::BoxFuture;
use std::task::{Context, Poll};
use switchyard_core::{Args, BoxError, DispatchError, Request};
use ::tower::{Service, ServiceExt};

impl<R, S> Service<(R, S)> for Dispatcher<R, S>
where
    R: Request,
    S: Send + 'static,
{
    type Response = ();
    type Error = DispatchError;
    type Future = BoxFuture<'static, Result<(), DispatchError>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, (req, res): (R, S)) -> Self::Future {
        let dispatcher = self.clone();
        Box::pin(async move { dispatcher.dispatch(req, res).await })
    }
}

/// A tower service used as a route handler.
///
/// The service receives the request and response and ends dispatch; its
/// `Next` is dropped.
#[derive(Debug, Clone)]
pub struct ServiceHandler<T> {
    service: T,
}

impl<T> ServiceHandler<T> {
    /// Wrap a service.
    pub fn new(service: T) -> Self {
        Self { service }
    }

    /// The wrapped service.
    pub fn inner(&self) -> &T {
        &self.service
    }
}

impl<R, S, T> Handler<R, S> for ServiceHandler<T>
where
    R: Request,
    S: Send + 'static,
    T: Service<(R, S), Response = ()> + Clone + Send + Sync + 'static,
    T::Error: Into<BoxError>,
    T::Future: Send,
{
    async fn call(&self, req: R, res: S, _next: Next<R, S>, _args: Args) -> HandlerResult {
        self.service
            .clone()
            .oneshot((req, res))
            .await
            .map_err(Into::into)
    }
}
