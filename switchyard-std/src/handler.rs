//! Route handlers.
//!
//! A handler is what a [`RouteEntry`] invokes once its guards pass. It
//! receives the request, the response, a one-shot [`Next`] continuation and
//! the entry's extra arguments, and decides whether dispatch goes on:
//!
//! - call `next.run(req, res).await` to hand the pair to the next matching
//!   entry, or
//! - return without calling it, which ends dispatch for this request.
//!
//! Handlers are async, so they may suspend before deciding. `Next` is
//! consumed by `run`, which makes continuing twice impossible.
//!
//! [`RouteEntry`]: crate::RouteEntry

use crate::dispatch::Next;
use futures::future::BoxFuture;
use std::future::Future;
use switchyard_core::{Args, BoxError, Request};

/// What a handler resolves to.
pub type HandlerResult = Result<(), BoxError>;

/// Conversion of a handler's output into a [`HandlerResult`].
///
/// # Default Implementations
///
/// - `()` → `Ok(())`
/// - `Result<(), E>` → the error boxed
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be returned from a route handler",
    label = "handlers must return `()` or `Result<(), E>`",
    note = "The error type must convert into `BoxError`."
)]
pub trait IntoOutcome {
    /// Convert into a [`HandlerResult`].
    fn into_outcome(self) -> HandlerResult;
}

impl IntoOutcome for () {
    fn into_outcome(self) -> HandlerResult {
        Ok(())
    }
}

impl<E> IntoOutcome for Result<(), E>
where
    E: Into<BoxError>,
{
    fn into_outcome(self) -> HandlerResult {
        self.map_err(Into::into)
    }
}

/// A route handler.
///
/// Implemented for every `Fn(R, S, Next<R, S>, Args) -> impl Future` whose
/// output is `()` or `Result<(), E>`. Implement it directly for handlers
/// that carry state.
///
/// This trait uses native `async fn` for static dispatch. Entries store
/// handlers as [`DynHandler`] trait objects.
///
/// # Example
///
/// ```rust
/// use switchyard_core::{Args, BoxError, HttpRequest};
/// use switchyard_std::{Handler, Next};
///
/// struct Audit;
///
/// impl Handler<HttpRequest, ()> for Audit {
///     async fn call(
///         &self,
///         req: HttpRequest,
///         res: (),
///         next: Next<HttpRequest, ()>,
///         _args: Args,
///     ) -> Result<(), BoxError> {
///         next.run(req, res).await
///     }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a route handler for `{R}`",
    label = "missing `Handler` implementation",
    note = "Handlers take `(request, response, next, args)` and return `()` or `Result<(), E>`."
)]
pub trait Handler<R, S>: Send + Sync + 'static {
    /// Handle one request.
    fn call(
        &self,
        req: R,
        res: S,
        next: Next<R, S>,
        args: Args,
    ) -> impl Future<Output = HandlerResult> + Send;
}

/// Object-safe version of [`Handler`].
pub trait DynHandler<R, S>: Send + Sync + 'static {
    /// Handle one request (dynamic dispatch version).
    fn call_dyn(&self, req: R, res: S, next: Next<R, S>, args: Args)
    -> BoxFuture<'_, HandlerResult>;
}

// Blanket implementation: Any type implementing Handler implements DynHandler automatically.
impl<R, S, T> DynHandler<R, S> for T
where
    R: Request,
    S: Send + 'static,
    T: Handler<R, S>,
{
    fn call_dyn(
        &self,
        req: R,
        res: S,
        next: Next<R, S>,
        args: Args,
    ) -> BoxFuture<'_, HandlerResult> {
        Box::pin(self.call(req, res, next, args))
    }
}

// Blanket impl for closures and async fns
impl<F, Fut, R, S> Handler<R, S> for F
where
    R: Request,
    S: Send + 'static,
    F: Fn(R, S, Next<R, S>, Args) -> Fut + Send + Sync + 'static,
    Fut: Future + Send,
    Fut::Output: IntoOutcome,
{
    async fn call(&self, req: R, res: S, next: Next<R, S>, args: Args) -> HandlerResult {
        (self)(req, res, next, args).await.into_outcome()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Teapot;

    impl std::fmt::Display for Teapot {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("short and stout")
        }
    }

    impl std::error::Error for Teapot {}

    #[test]
    fn test_unit_is_ok() {
        assert!(().into_outcome().is_ok());
    }

    #[test]
    fn test_error_is_boxed() {
        let err = Err::<(), _>(Teapot).into_outcome().unwrap_err();
        assert_eq!(err.to_string(), "short and stout");
    }

    #[test]
    fn test_box_error_passes_through() {
        let err = Err::<(), BoxError>("nope".into()).into_outcome().unwrap_err();
        assert_eq!(err.to_string(), "nope");
    }
}
