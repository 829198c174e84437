//! # switchyard-core
//!
//! Core types for the Switchyard request dispatch engine.
//!
//! This crate has minimal dependencies and is what an HTTP server integration
//! needs to hand requests to the engine: the [`Request`] trait it implements,
//! the parameter mapping the engine writes into, and the error hierarchy.
//!
//! The routing machinery itself (path patterns, route entries, the router and
//! its dispatcher, chain nodes) lives in `switchyard-std`.
//!
//! # Error Types
//!
//! - [`SwitchyardError`] - Top-level error type
//! - [`RouteError`] - Registration-time configuration errors
//! - [`DispatchError`] - Handler failures surfacing from a dispatch

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod http;
mod media;
mod request;

// Re-exports
pub use error::{BoxError, DispatchError, RouteError, SwitchyardError};
pub use http::HttpRequest;
pub use media::canonical_media_type;
pub use request::{Args, Params, Request};
