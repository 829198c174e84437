//! Error types for Switchyard.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`SwitchyardError`] - Top-level error type for all Switchyard operations
//! - [`RouteError`] - Configuration errors raised while registering routes
//! - [`DispatchError`] - Errors surfacing from a request's dispatch

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Switchyard operations.
#[derive(Error, Debug)]
pub enum SwitchyardError {
    /// A route could not be registered.
    #[error("route error: {0}")]
    Route(#[from] RouteError),

    /// A request's dispatch failed.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// Configuration errors, raised at registration time.
///
/// Once an entry has been built, matching it against a request never fails.
#[derive(Error, Debug)]
pub enum RouteError {
    /// The path specification could not be compiled.
    #[error("invalid path pattern `{pattern}`")]
    InvalidPattern {
        /// The offending path specification.
        pattern: String,
        /// The underlying compilation failure.
        #[source]
        source: BoxError,
    },

    /// The same `:name` token appears more than once in a pattern.
    #[error("parameter `{name}` appears more than once in `{pattern}`")]
    DuplicateParam {
        /// The offending path specification.
        pattern: String,
        /// The repeated parameter name.
        name: String,
    },

    /// A registration that requires a path was given none.
    #[error("no path provided")]
    MissingPath,

    /// A parameter hook was registered without a parameter name.
    #[error("no parameter name provided")]
    MissingParamName,
}

/// Errors that can occur while dispatching a request.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// A handler failed; dispatch for that request stopped there.
    #[error("handler failed")]
    Handler(#[source] BoxError),
}

// Convenience conversions
impl From<BoxError> for SwitchyardError {
    fn from(err: BoxError) -> Self {
        SwitchyardError::Custom(err)
    }
}

impl From<BoxError> for DispatchError {
    fn from(err: BoxError) -> Self {
        DispatchError::Handler(err)
    }
}
