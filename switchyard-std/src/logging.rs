//! Request logging middleware.

use crate::{
    dispatch::Next,
    handler::{Handler, HandlerResult},
};
use switchyard_core::{Args, Request};

/// Middleware that logs each request it sees and continues dispatch.
///
/// Register it with [`RouteEntry::new`](crate::RouteEntry::new) and
/// [`RouterBuilder::add`](crate::RouterBuilder::add), usually first.
/// Without the `tracing` feature it only forwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingHandler;

impl<R, S> Handler<R, S> for LoggingHandler
where
    R: Request,
    S: Send + 'static,
{
    async fn call(&self, req: R, res: S, next: Next<R, S>, _args: Args) -> HandlerResult {
        #[cfg(feature = "tracing")]
        {
            tracing::info!(method = %req.method(), path = %req.path(), "request");
        }
        let result = next.run(req, res).await;
        #[cfg(feature = "tracing")]
        {
            if let Err(error) = &result {
                tracing::info!(%error, "request failed");
            }
        }
        result
    }
}
