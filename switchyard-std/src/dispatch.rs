//! The dispatcher loop and its continuation.
//!
//! [`Dispatcher`] drives a built [`Router`] against one request at a time:
//! it walks the entries in registration order, skips those whose guards
//! fail, and invokes the first match with a [`Next`] positioned just after
//! it. Whether dispatch goes further is up to that handler.
//!
//! # Behavior
//!
//! - A handler that calls `next.run(req, res)` resumes the walk after itself.
//! - A handler that returns without calling it ends dispatch for the request.
//! - When the walk runs past the last entry the fallback handler, if any,
//!   receives the pair; otherwise dispatch ends quietly.
//! - A handler error ends dispatch and is returned to the caller unchanged.

use crate::{
    entry::RouteEntry,
    handler::{DynHandler, HandlerResult, IntoOutcome},
    router::Router,
};
use futures::future::BoxFuture;
use std::{future::Future, sync::Arc};
use switchyard_core::{Args, DispatchError, Request};

#[cfg(feature = "tracing")]
use tracing::Instrument;

/// The continuation handed to a route handler.
///
/// Calling [`run`](Next::run) hands the request and response to the next
/// matching entry. `run` takes `self`, so a handler continues at most once.
/// Dropping a `Next` without running it is a terminal dispatch.
pub struct Next<R, S> {
    entries: Arc<[RouteEntry<R, S>]>,
    position: usize,
    fallback: Option<Arc<dyn DynHandler<R, S>>>,
}

impl<R, S> Next<R, S>
where
    R: Request,
    S: Send + 'static,
{
    /// Continue dispatch with the next matching entry.
    ///
    /// Resolves once the rest of the dispatch has finished, with the first
    /// error any later handler returned.
    pub fn run(self, req: R, res: S) -> BoxFuture<'static, HandlerResult> {
        Box::pin(async move {
            let mut position = self.position;
            while let Some(entry) = self.entries.get(position) {
                position += 1;

                let Some(found) = entry.matches(&req) else {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(entry = %entry, "entry skipped");
                    continue;
                };

                #[cfg(feature = "tracing")]
                tracing::debug!(entry = %entry, params = ?found.params, "entry matched");

                let next = Next {
                    entries: Arc::clone(&self.entries),
                    position,
                    fallback: self.fallback.clone(),
                };
                return entry.invoke(req, res, next, found).await;
            }

            match self.fallback {
                Some(fallback) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!("no entry left, running fallback");
                    let end = Next {
                        entries: Arc::clone(&self.entries),
                        position: self.entries.len(),
                        fallback: None,
                    };
                    fallback.call_dyn(req, res, end, Args::new()).await
                }
                None => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!("no entry left");
                    Ok(())
                }
            }
        })
    }

    /// How many entries are still ahead of this continuation.
    pub fn remaining(&self) -> usize {
        self.entries.len().saturating_sub(self.position)
    }
}

/// Drives a [`Router`] against incoming requests.
///
/// Cloning is cheap; clones share the router and fallback.
///
/// # Example
///
/// ```rust
/// use switchyard_core::HttpRequest;
/// use switchyard_std::{Dispatcher, RouterBuilder};
///
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let mut builder = RouterBuilder::<HttpRequest, ()>::new();
/// builder.get("/ping", |_req, _res, _next, _args| async {})?;
///
/// let dispatcher = Dispatcher::new(builder.build());
/// dispatcher.dispatch(HttpRequest::get("/ping"), ()).await?;
/// # Ok(())
/// # }
/// ```
pub struct Dispatcher<R, S> {
    router: Router<R, S>,
    fallback: Option<Arc<dyn DynHandler<R, S>>>,
}

impl<R, S> Clone for Dispatcher<R, S> {
    fn clone(&self) -> Self {
        Self {
            router: self.router.clone(),
            fallback: self.fallback.clone(),
        }
    }
}

impl<R, S> Dispatcher<R, S>
where
    R: Request,
    S: Send + 'static,
{
    /// Create a dispatcher for a built router.
    pub fn new(router: Router<R, S>) -> Self {
        Self {
            router,
            fallback: None,
        }
    }

    /// Set a handler for requests every entry let through.
    ///
    /// The fallback's own `Next` is already exhausted.
    pub fn with_fallback<F, Fut>(mut self, fallback: F) -> Self
    where
        F: Fn(R, S, Next<R, S>, Args) -> Fut + Send + Sync + 'static,
        Fut: Future + Send,
        Fut::Output: IntoOutcome,
    {
        self.fallback = Some(Arc::new(fallback));
        self
    }

    /// The router being driven.
    pub fn router(&self) -> &Router<R, S> {
        &self.router
    }

    /// A continuation positioned before the first entry.
    pub fn start(&self) -> Next<R, S> {
        Next {
            entries: self.router.shared_entries(),
            position: 0,
            fallback: self.fallback.clone(),
        }
    }

    /// Dispatch one request.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Handler`] with the first handler error.
    pub async fn dispatch(&self, req: R, res: S) -> Result<(), DispatchError> {
        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!("dispatch", method = %req.method(), path = %req.path());

        let run = self.start().run(req, res);

        #[cfg(feature = "tracing")]
        let run = run.instrument(span);

        run.await.map_err(|e| {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %e, "dispatch aborted by handler error");
            DispatchError::Handler(e)
        })
    }
}
