//! Explicit handler chains.
//!
//! A [`ChainNode`] is a handler plus an optional link to the next node. It is
//! a composition tool a caller assembles and invokes directly; it is not
//! driven by a [`Router`](crate::Router).
//!
//! Forwarding differs from route dispatch: a node forwards to its successor
//! automatically once its handler returns, unless the handler already did so
//! with [`ChainContext::proceed`]. Either way the successor runs exactly once
//! per invocation.
//!
//! The "has continued" flag lives on the [`ChainContext`] built for each
//! invocation, so a node graph can be shared and invoked concurrently.
//!
//! # Example
//!
//! ```rust
//! use switchyard_core::{BoxError, HttpRequest};
//! use switchyard_std::ChainBuilder;
//!
//! # async fn demo() -> Result<(), BoxError> {
//! let chain = ChainBuilder::<HttpRequest, Vec<String>>::new()
//!     .push(|cx| Box::pin(async move {
//!         cx.response_mut().push("auth".into());
//!         Ok(())
//!     }))
//!     .push(|cx| Box::pin(async move {
//!         cx.response_mut().push("handler".into());
//!         Ok(())
//!     }))
//!     .build()
//!     .expect("two nodes");
//!
//! let mut req = HttpRequest::get("/");
//! let mut res = Vec::new();
//! chain.invoke(&mut req, &mut res).await?;
//! assert_eq!(res, ["auth", "handler"]);
//! # Ok(())
//! # }
//! ```

use crate::handler::HandlerResult;
use futures::future::BoxFuture;
use std::{fmt, sync::Arc};
use switchyard_core::{Args, Request};

type ChainFn<R, S> =
    dyn for<'a, 'b> Fn(&'a mut ChainContext<'b, R, S>) -> BoxFuture<'a, HandlerResult> + Send + Sync;

/// One link of a handler chain.
pub struct ChainNode<R, S> {
    handler: Arc<ChainFn<R, S>>,
    next: Option<Arc<ChainNode<R, S>>>,
    args: Args,
}

impl<R, S> Clone for ChainNode<R, S> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
            next: self.next.clone(),
            args: self.args.clone(),
        }
    }
}

impl<R, S> ChainNode<R, S>
where
    R: Request,
    S: Send + 'static,
{
    /// A terminal node running `handler`.
    pub fn new<F>(handler: F) -> Self
    where
        F: for<'a, 'b> Fn(&'a mut ChainContext<'b, R, S>) -> BoxFuture<'a, HandlerResult>
            + Send
            + Sync
            + 'static,
    {
        Self {
            handler: Arc::new(handler),
            next: None,
            args: Args::new(),
        }
    }

    /// Link `next` after this node.
    pub fn with_next(mut self, next: impl Into<Arc<ChainNode<R, S>>>) -> Self {
        self.next = Some(next.into());
        self
    }

    /// Arguments forwarded to the next node.
    pub fn with_args(mut self, args: Args) -> Self {
        self.args = args;
        self
    }

    /// The successor, if any.
    pub fn next(&self) -> Option<&ChainNode<R, S>> {
        self.next.as_deref()
    }

    /// The arguments this node forwards.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Number of nodes from this one to the end of the chain.
    pub fn len(&self) -> usize {
        let mut len = 1;
        let mut node = self;
        while let Some(next) = node.next() {
            len += 1;
            node = next;
        }
        len
    }

    /// Run the chain from this node with no incoming arguments.
    pub fn invoke<'a>(&'a self, req: &'a mut R, res: &'a mut S) -> BoxFuture<'a, HandlerResult> {
        self.invoke_with(req, res, Args::new())
    }

    /// Run the chain from this node.
    ///
    /// # Errors
    ///
    /// The first handler error. Nodes after a failing handler do not run.
    pub fn invoke_with<'a>(
        &'a self,
        req: &'a mut R,
        res: &'a mut S,
        args: Args,
    ) -> BoxFuture<'a, HandlerResult> {
        Box::pin(async move {
            let mut cx = ChainContext {
                request: req,
                response: res,
                args,
                node: self,
                continued: false,
            };
            (self.handler)(&mut cx).await?;
            if !cx.continued {
                #[cfg(feature = "tracing")]
                tracing::trace!("chain node forwarding after handler returned");
                cx.proceed().await?;
            }
            Ok(())
        })
    }
}

impl<R, S> fmt::Debug for ChainNode<R, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainNode")
            .field("args", &self.args)
            .field("next", &self.next)
            .finish_non_exhaustive()
    }
}

/// Per-invocation view handed to a chain handler.
pub struct ChainContext<'b, R, S> {
    request: &'b mut R,
    response: &'b mut S,
    args: Args,
    node: &'b ChainNode<R, S>,
    continued: bool,
}

impl<R, S> ChainContext<'_, R, S>
where
    R: Request,
    S: Send + 'static,
{
    /// The request.
    pub fn request(&self) -> &R {
        &*self.request
    }

    /// The request, mutably.
    pub fn request_mut(&mut self) -> &mut R {
        &mut *self.request
    }

    /// The response.
    pub fn response(&self) -> &S {
        &*self.response
    }

    /// The response, mutably.
    pub fn response_mut(&mut self) -> &mut S {
        &mut *self.response
    }

    /// Arguments forwarded by the previous node.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Whether this invocation has already forwarded.
    pub fn has_continued(&self) -> bool {
        self.continued
    }

    /// Forward to the next node now.
    ///
    /// Only the first call forwards; later calls return `Ok(())` at once.
    /// At the end of the chain this only marks the invocation as continued.
    pub async fn proceed(&mut self) -> HandlerResult {
        if self.continued {
            return Ok(());
        }
        self.continued = true;
        match self.node.next() {
            Some(next) => {
                let args = self.node.args.clone();
                next.invoke_with(&mut *self.request, &mut *self.response, args)
                    .await
            }
            None => Ok(()),
        }
    }
}

/// Assembles a linear chain from an ordered list of handlers.
pub struct ChainBuilder<R, S> {
    links: Vec<(Arc<ChainFn<R, S>>, Args)>,
}

impl<R, S> Default for ChainBuilder<R, S>
where
    R: Request,
    S: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<R, S> ChainBuilder<R, S>
where
    R: Request,
    S: Send + 'static,
{
    /// An empty builder.
    pub fn new() -> Self {
        Self { links: Vec::new() }
    }

    /// Append a handler.
    pub fn push<F>(self, handler: F) -> Self
    where
        F: for<'a, 'b> Fn(&'a mut ChainContext<'b, R, S>) -> BoxFuture<'a, HandlerResult>
            + Send
            + Sync
            + 'static,
    {
        self.push_with_args(handler, Args::new())
    }

    /// Append a handler whose node forwards `args` to its successor.
    pub fn push_with_args<F>(mut self, handler: F, args: Args) -> Self
    where
        F: for<'a, 'b> Fn(&'a mut ChainContext<'b, R, S>) -> BoxFuture<'a, HandlerResult>
            + Send
            + Sync
            + 'static,
    {
        let handler: Arc<ChainFn<R, S>> = Arc::new(handler);
        self.links.push((handler, args));
        self
    }

    /// Link the handlers in order. `None` when nothing was pushed.
    pub fn build(self) -> Option<ChainNode<R, S>> {
        self.links
            .into_iter()
            .rev()
            .fold(None, |next, (handler, args)| {
                Some(ChainNode {
                    handler,
                    next: next.map(Arc::new),
                    args,
                })
            })
    }
}
