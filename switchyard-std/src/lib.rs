//! # switchyard-std
//!
//! Routing, dispatch and chaining for the Switchyard request dispatch engine.
//!
//! This crate provides:
//! - **Path patterns**: [`PathSpec`], [`PathPattern`]
//! - **Route entries**: [`RouteEntry`], [`RouteMatch`]
//! - **Registry**: [`RouterBuilder`], [`Router`], [`Route`]
//! - **Dispatch**: [`Dispatcher`], [`Next`], [`Handler`]
//! - **Chains**: [`ChainNode`], [`ChainContext`], [`ChainBuilder`]
//! - **Setup**: [`App`], [`Settings`]
//! - **Middleware**: [`LoggingHandler`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use switchyard_core;

mod app;
mod chain;
mod dispatch;
mod entry;
mod handler;
mod logging;
mod pattern;
mod router;
mod settings;
pub mod testing;

#[cfg(feature = "tower")]
pub mod tower;

pub use app::App;
pub use chain::{ChainBuilder, ChainContext, ChainNode};
pub use dispatch::{Dispatcher, Next};
pub use entry::{RouteEntry, RouteMatch};
pub use handler::{DynHandler, Handler, HandlerResult, IntoOutcome};
pub use logging::LoggingHandler;
pub use pattern::{PathPattern, PathSpec};
pub use router::{Route, Router, RouterBuilder};
pub use settings::{ConfigError, Settings};
