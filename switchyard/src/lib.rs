//! # switchyard - Ordered Request Routing and Middleware Dispatch
//!
//! `switchyard` routes each incoming request through an ordered list of
//! guarded handlers. Every handler decides for itself whether dispatch goes
//! on: it either hands the request to the next matching entry through its
//! [`Next`] continuation, or it returns and the request is done.
//!
//! ## Quick Start
//!
//! ```rust
//! use switchyard::prelude::*;
//!
//! # async fn demo() -> Result<(), SwitchyardError> {
//! let mut app = App::<HttpRequest, ()>::new();
//! app.use_all(|req, res, next: Next<HttpRequest, ()>, _args| async move {
//!     // runs first for every request
//!     next.run(req, res).await
//! });
//! app.get("/user/:id", |req, _res, _next, _args| async move {
//!     assert_eq!(req.param("id"), Some("42"));
//! })?;
//!
//! let (dispatcher, _settings) = app.into_dispatcher();
//! dispatcher.dispatch(HttpRequest::get("/user/42"), ()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Two ways to compose
//!
//! - **Routes** ([`RouterBuilder`], [`Dispatcher`]): opt-in continuation. A
//!   handler that does not call `next` ends dispatch.
//! - **Chains** ([`ChainNode`], [`ChainBuilder`]): opt-out continuation. A
//!   node forwards to its successor after its handler returns unless the
//!   handler already called [`ChainContext::proceed`].
//!
//! ## Features
//!
//! - `tracing` (default): dispatch spans and match/skip events.
//! - `tower`: [`Dispatcher`] as a `tower::Service`, and tower services as
//!   handlers.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use switchyard_core::{
    // Request model
    Args,
    // Errors
    BoxError,
    DispatchError,
    HttpRequest,
    Params,
    Request,
    RouteError,
    SwitchyardError,
    canonical_media_type,
};

pub use switchyard_std::{
    // Setup
    App,
    // Chains
    ChainBuilder,
    ChainContext,
    ChainNode,
    ConfigError,
    // Dispatch
    Dispatcher,
    DynHandler,
    Handler,
    HandlerResult,
    IntoOutcome,
    LoggingHandler,
    Next,
    // Patterns
    PathPattern,
    PathSpec,
    // Registry
    Route,
    RouteEntry,
    RouteMatch,
    Router,
    RouterBuilder,
    Settings,
};

/// Tower integration.
#[cfg(feature = "tower")]
pub mod tower {
    pub use switchyard_std::tower::ServiceHandler;
}

/// Testing utilities.
pub mod testing {
    pub use switchyard_std::testing::{CountingHandler, Recorder, TestRequest};
}

/// Prelude module - common imports for Switchyard.
///
/// # Usage
///
/// ```rust
/// use switchyard::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        App, Args, BoxError, ChainBuilder, ChainContext, ChainNode, DispatchError, Dispatcher,
        Handler, HttpRequest, Next, PathSpec, Request, RouteError, RouterBuilder, Settings,
        SwitchyardError,
    };
}
