//! Application setup surface.
//!
//! An [`App`] pairs a [`RouterBuilder`] with its [`Settings`]. Registration
//! calls are forwarded to the builder unchanged; settings stay a plain value
//! owned by the app instead of process-wide state.

use crate::{
    dispatch::{Dispatcher, Next},
    handler::IntoOutcome,
    pattern::PathSpec,
    router::{Route, Router, RouterBuilder},
    settings::Settings,
};
use std::future::Future;
use switchyard_core::{Args, Request, RouteError};

/// An application under construction.
///
/// # Example
///
/// ```rust
/// use switchyard_core::HttpRequest;
/// use switchyard_std::{App, Settings};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut app = App::<HttpRequest, ()>::with_settings(Settings::from_toml_str("views = \"tpl\"")?);
/// app.settings_mut().enable("trust_proxy");
/// app.get("/", |_req, _res, _next, _args| async {})?;
///
/// let (dispatcher, settings) = app.into_dispatcher();
/// assert_eq!(dispatcher.router().len(), 1);
/// assert_eq!(settings.views, "tpl");
/// # Ok(())
/// # }
/// ```
pub struct App<R, S> {
    router: RouterBuilder<R, S>,
    settings: Settings,
}

impl<R, S> Default for App<R, S>
where
    R: Request,
    S: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<R, S> App<R, S>
where
    R: Request,
    S: Send + 'static,
{
    /// An app with default settings.
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    /// An app with the given settings.
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            router: RouterBuilder::new(),
            settings,
        }
    }

    /// The settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The settings, mutably.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// The router being built.
    pub fn router_mut(&mut self) -> &mut RouterBuilder<R, S> {
        &mut self.router
    }

    /// See [`RouterBuilder::use_all`].
    pub fn use_all<F, Fut>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(R, S, Next<R, S>, Args) -> Fut + Send + Sync + 'static,
        Fut: Future + Send,
        Fut::Output: IntoOutcome,
    {
        self.router.use_all(handler);
        self
    }

    /// See [`RouterBuilder::use_at`].
    pub fn use_at<F, Fut>(&mut self, path: impl Into<PathSpec>, handler: F) -> Result<&mut Self, RouteError>
    where
        F: Fn(R, S, Next<R, S>, Args) -> Fut + Send + Sync + 'static,
        Fut: Future + Send,
        Fut::Output: IntoOutcome,
    {
        self.router.use_at(path, handler)?;
        Ok(self)
    }

    /// See [`RouterBuilder::get`].
    pub fn get<F, Fut>(&mut self, path: impl Into<PathSpec>, handler: F) -> Result<&mut Self, RouteError>
    where
        F: Fn(R, S, Next<R, S>, Args) -> Fut + Send + Sync + 'static,
        Fut: Future + Send,
        Fut::Output: IntoOutcome,
    {
        self.router.get(path, handler)?;
        Ok(self)
    }

    /// See [`RouterBuilder::put`].
    pub fn put<F, Fut>(&mut self, path: impl Into<PathSpec>, handler: F) -> Result<&mut Self, RouteError>
    where
        F: Fn(R, S, Next<R, S>, Args) -> Fut + Send + Sync + 'static,
        Fut: Future + Send,
        Fut::Output: IntoOutcome,
    {
        self.router.put(path, handler)?;
        Ok(self)
    }

    /// See [`RouterBuilder::post`].
    pub fn post<F, Fut>(&mut self, path: impl Into<PathSpec>, handler: F) -> Result<&mut Self, RouteError>
    where
        F: Fn(R, S, Next<R, S>, Args) -> Fut + Send + Sync + 'static,
        Fut: Future + Send,
        Fut::Output: IntoOutcome,
    {
        self.router.post(path, handler)?;
        Ok(self)
    }

    /// See [`RouterBuilder::delete`].
    pub fn delete<F, Fut>(&mut self, path: impl Into<PathSpec>, handler: F) -> Result<&mut Self, RouteError>
    where
        F: Fn(R, S, Next<R, S>, Args) -> Fut + Send + Sync + 'static,
        Fut: Future + Send,
        Fut::Output: IntoOutcome,
    {
        self.router.delete(path, handler)?;
        Ok(self)
    }

    /// See [`RouterBuilder::all`].
    pub fn all<F, Fut>(&mut self, path: impl Into<PathSpec>, handler: F) -> Result<&mut Self, RouteError>
    where
        F: Fn(R, S, Next<R, S>, Args) -> Fut + Send + Sync + 'static,
        Fut: Future + Send,
        Fut::Output: IntoOutcome,
    {
        self.router.all(path, handler)?;
        Ok(self)
    }

    /// See [`RouterBuilder::param`].
    pub fn param<F, Fut>(&mut self, name: impl Into<String>, handler: F) -> Result<&mut Self, RouteError>
    where
        F: Fn(R, S, Next<R, S>, Args) -> Fut + Send + Sync + 'static,
        Fut: Future + Send,
        Fut::Output: IntoOutcome,
    {
        self.router.param(name, handler)?;
        Ok(self)
    }

    /// See [`RouterBuilder::route`].
    pub fn route(&mut self, path: impl Into<PathSpec>) -> Result<Route<'_, R, S>, RouteError> {
        self.router.route(path)
    }

    /// Freeze the routes, handing back the settings alongside.
    pub fn build(self) -> (Router<R, S>, Settings) {
        (self.router.build(), self.settings)
    }

    /// Freeze the routes into a [`Dispatcher`].
    pub fn into_dispatcher(self) -> (Dispatcher<R, S>, Settings) {
        let (router, settings) = self.build();
        (Dispatcher::new(router), settings)
    }
}
