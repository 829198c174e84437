//! The route registry.
//!
//! Routes are registered on a [`RouterBuilder`] during setup and frozen into
//! a [`Router`] by [`RouterBuilder::build`]. Registration order is dispatch
//! order; nothing ever reorders entries. A built router is immutable and
//! shared between concurrent dispatches without locking.
//!
//! The router does no matching of its own. It only enumerates entries for a
//! [`Dispatcher`] to drive.
//!
//! [`Dispatcher`]: crate::Dispatcher

use crate::{
    dispatch::{Dispatcher, Next},
    entry::RouteEntry,
    handler::IntoOutcome,
    pattern::{PathPattern, PathSpec},
};
use std::{future::Future, sync::Arc};
use switchyard_core::{Args, Request, RouteError};

/// An immutable, ordered set of route entries.
///
/// Cloning is cheap; clones share the entries.
pub struct Router<R, S> {
    entries: Arc<[RouteEntry<R, S>]>,
}

impl<R, S> Clone for Router<R, S> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<R, S> Router<R, S>
where
    R: Request,
    S: Send + 'static,
{
    /// Start registering routes.
    pub fn builder() -> RouterBuilder<R, S> {
        RouterBuilder::new()
    }

    /// The entries, in dispatch order.
    pub fn entries(&self) -> &[RouteEntry<R, S>] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Wrap this router in a [`Dispatcher`].
    pub fn into_dispatcher(self) -> Dispatcher<R, S> {
        Dispatcher::new(self)
    }

    pub(crate) fn shared_entries(&self) -> Arc<[RouteEntry<R, S>]> {
        Arc::clone(&self.entries)
    }
}

/// Builder for constructing a [`Router`].
///
/// Every registration appends exactly one [`RouteEntry`].
///
/// # Example
///
/// ```rust
/// use switchyard_core::{BoxError, HttpRequest, Request};
/// use switchyard_std::RouterBuilder;
///
/// # fn main() -> Result<(), BoxError> {
/// let mut builder = RouterBuilder::<HttpRequest, ()>::new();
/// builder
///     .get("/user/:id", |req, _res, _next, _args| async move {
///         println!("user {}", req.param("id").unwrap_or_default());
///     })?
///     .post("/user", |_req, _res, _next, _args| async {})?;
/// builder.route("/item/:id")?
///     .get(|_req, _res, _next, _args| async {})
///     .delete(|_req, _res, _next, _args| async {});
///
/// assert_eq!(builder.build().len(), 4);
/// # Ok(())
/// # }
/// ```
pub struct RouterBuilder<R, S> {
    entries: Vec<RouteEntry<R, S>>,
}

impl<R, S> Default for RouterBuilder<R, S>
where
    R: Request,
    S: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<R, S> RouterBuilder<R, S>
where
    R: Request,
    S: Send + 'static,
{
    /// Create a new empty router builder.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a hand-built entry.
    pub fn add(&mut self, entry: RouteEntry<R, S>) -> &mut Self {
        #[cfg(feature = "tracing")]
        tracing::trace!(position = self.entries.len(), entry = %entry, "route registered");
        self.entries.push(entry);
        self
    }

    /// Register middleware for every request.
    pub fn use_all<F, Fut>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(R, S, Next<R, S>, Args) -> Fut + Send + Sync + 'static,
        Fut: Future + Send,
        Fut::Output: IntoOutcome,
    {
        self.add(RouteEntry::new(handler))
    }

    /// Register middleware for a path, any method.
    ///
    /// `PathSpec::Any` behaves like [`use_all`](Self::use_all).
    pub fn use_at<F, Fut>(
        &mut self,
        path: impl Into<PathSpec>,
        handler: F,
    ) -> Result<&mut Self, RouteError>
    where
        F: Fn(R, S, Next<R, S>, Args) -> Fut + Send + Sync + 'static,
        Fut: Future + Send,
        Fut::Output: IntoOutcome,
    {
        let pattern = PathPattern::compile(path)?;
        Ok(self.add(RouteEntry::new(handler).with_pattern(pattern)))
    }

    /// Register a handler for `GET` requests on `path`.
    pub fn get<F, Fut>(&mut self, path: impl Into<PathSpec>, handler: F) -> Result<&mut Self, RouteError>
    where
        F: Fn(R, S, Next<R, S>, Args) -> Fut + Send + Sync + 'static,
        Fut: Future + Send,
        Fut::Output: IntoOutcome,
    {
        self.verb(Some("GET"), path.into(), handler)
    }

    /// Register a handler for `PUT` requests on `path`.
    pub fn put<F, Fut>(&mut self, path: impl Into<PathSpec>, handler: F) -> Result<&mut Self, RouteError>
    where
        F: Fn(R, S, Next<R, S>, Args) -> Fut + Send + Sync + 'static,
        Fut: Future + Send,
        Fut::Output: IntoOutcome,
    {
        self.verb(Some("PUT"), path.into(), handler)
    }

    /// Register a handler for `POST` requests on `path`.
    pub fn post<F, Fut>(&mut self, path: impl Into<PathSpec>, handler: F) -> Result<&mut Self, RouteError>
    where
        F: Fn(R, S, Next<R, S>, Args) -> Fut + Send + Sync + 'static,
        Fut: Future + Send,
        Fut::Output: IntoOutcome,
    {
        self.verb(Some("POST"), path.into(), handler)
    }

    /// Register a handler for `DELETE` requests on `path`.
    pub fn delete<F, Fut>(&mut self, path: impl Into<PathSpec>, handler: F) -> Result<&mut Self, RouteError>
    where
        F: Fn(R, S, Next<R, S>, Args) -> Fut + Send + Sync + 'static,
        Fut: Future + Send,
        Fut::Output: IntoOutcome,
    {
        self.verb(Some("DELETE"), path.into(), handler)
    }

    /// Register a handler for every method on `path`.
    pub fn all<F, Fut>(&mut self, path: impl Into<PathSpec>, handler: F) -> Result<&mut Self, RouteError>
    where
        F: Fn(R, S, Next<R, S>, Args) -> Fut + Send + Sync + 'static,
        Fut: Future + Send,
        Fut::Output: IntoOutcome,
    {
        self.verb(None, path.into(), handler)
    }

    /// Register a hook that runs whenever the request carries parameter `name`.
    ///
    /// The parameter's value is the handler's sole extra argument.
    ///
    /// The guard reads the params present when this entry is reached. Values
    /// extracted from a path only exist there if an entry registered
    /// *earlier* matched and merged them; register the hook after the route
    /// that populates it.
    pub fn param<F, Fut>(&mut self, name: impl Into<String>, handler: F) -> Result<&mut Self, RouteError>
    where
        F: Fn(R, S, Next<R, S>, Args) -> Fut + Send + Sync + 'static,
        Fut: Future + Send,
        Fut::Output: IntoOutcome,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(RouteError::MissingParamName);
        }
        Ok(self.add(RouteEntry::new(handler).with_param(name)))
    }

    /// Start registering several methods on one path.
    ///
    /// The path is compiled once; each registration on the returned
    /// [`Route`] still appends its own, independent entry.
    pub fn route(&mut self, path: impl Into<PathSpec>) -> Result<Route<'_, R, S>, RouteError> {
        let path = path.into();
        if path.is_missing() {
            return Err(RouteError::MissingPath);
        }
        Ok(Route {
            builder: self,
            pattern: PathPattern::compile(path)?,
        })
    }

    /// Number of entries registered so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freeze the registrations into a [`Router`].
    pub fn build(self) -> Router<R, S> {
        #[cfg(feature = "tracing")]
        tracing::debug!(entries = self.entries.len(), "router built");
        Router {
            entries: self.entries.into(),
        }
    }

    fn verb<F, Fut>(
        &mut self,
        method: Option<&str>,
        path: PathSpec,
        handler: F,
    ) -> Result<&mut Self, RouteError>
    where
        F: Fn(R, S, Next<R, S>, Args) -> Fut + Send + Sync + 'static,
        Fut: Future + Send,
        Fut::Output: IntoOutcome,
    {
        if path.is_missing() {
            return Err(RouteError::MissingPath);
        }
        let pattern = PathPattern::compile(path)?;
        Ok(self.add(entry_for(pattern, method, handler)))
    }
}

fn entry_for<R, S, F, Fut>(pattern: PathPattern, method: Option<&str>, handler: F) -> RouteEntry<R, S>
where
    R: Request,
    S: Send + 'static,
    F: Fn(R, S, Next<R, S>, Args) -> Fut + Send + Sync + 'static,
    Fut: Future + Send,
    Fut::Output: IntoOutcome,
{
    let entry = RouteEntry::new(handler).with_pattern(pattern);
    match method {
        Some(method) => entry.with_method(method),
        None => entry,
    }
}

/// Chainable registration for one path, returned by [`RouterBuilder::route`].
pub struct Route<'a, R, S> {
    builder: &'a mut RouterBuilder<R, S>,
    pattern: PathPattern,
}

impl<R, S> Route<'_, R, S>
where
    R: Request,
    S: Send + 'static,
{
    /// Register a `GET` handler on this path.
    pub fn get<F, Fut>(self, handler: F) -> Self
    where
        F: Fn(R, S, Next<R, S>, Args) -> Fut + Send + Sync + 'static,
        Fut: Future + Send,
        Fut::Output: IntoOutcome,
    {
        self.register(Some("GET"), handler)
    }

    /// Register a `PUT` handler on this path.
    pub fn put<F, Fut>(self, handler: F) -> Self
    where
        F: Fn(R, S, Next<R, S>, Args) -> Fut + Send + Sync + 'static,
        Fut: Future + Send,
        Fut::Output: IntoOutcome,
    {
        self.register(Some("PUT"), handler)
    }

    /// Register a `POST` handler on this path.
    pub fn post<F, Fut>(self, handler: F) -> Self
    where
        F: Fn(R, S, Next<R, S>, Args) -> Fut + Send + Sync + 'static,
        Fut: Future + Send,
        Fut::Output: IntoOutcome,
    {
        self.register(Some("POST"), handler)
    }

    /// Register a `DELETE` handler on this path.
    pub fn delete<F, Fut>(self, handler: F) -> Self
    where
        F: Fn(R, S, Next<R, S>, Args) -> Fut + Send + Sync + 'static,
        Fut: Future + Send,
        Fut::Output: IntoOutcome,
    {
        self.register(Some("DELETE"), handler)
    }

    /// Register a handler for every method on this path.
    pub fn all<F, Fut>(self, handler: F) -> Self
    where
        F: Fn(R, S, Next<R, S>, Args) -> Fut + Send + Sync + 'static,
        Fut: Future + Send,
        Fut::Output: IntoOutcome,
    {
        self.register(None, handler)
    }

    /// The compiled path shared by this route's entries.
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    fn register<F, Fut>(self, method: Option<&str>, handler: F) -> Self
    where
        F: Fn(R, S, Next<R, S>, Args) -> Fut + Send + Sync + 'static,
        Fut: Future + Send,
        Fut::Output: IntoOutcome,
    {
        let entry = entry_for(self.pattern.clone(), method, handler);
        self.builder.add(entry);
        self
    }
}
