//! Testing utilities.
//!
//! Helpers for exercising routers and handlers without a real transport.
//!
//! # Features
//!
//! - [`Recorder`]: a cloneable response double that logs what handlers did
//! - [`CountingHandler`]: a handler that counts invocations and continues
//! - [`TestRequest`]: the in-memory request type used throughout the tests

use crate::{
    dispatch::Next,
    handler::{Handler, HandlerResult},
};
use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicUsize, Ordering},
};
use switchyard_core::{Args, Request};

/// The request type used by the test suites.
pub type TestRequest = switchyard_core::HttpRequest;

// ============================================================================
// Recorder
// ============================================================================

/// A response double that records lines written by handlers.
///
/// Clones share the same log, so a test keeps one clone and hands the other
/// to the dispatcher.
///
/// # Example
///
/// ```rust
/// use switchyard_std::testing::Recorder;
///
/// let res = Recorder::new();
/// let handle = res.clone();
/// res.record("hello");
/// assert_eq!(handle.entries(), vec!["hello"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    entries: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line.
    pub fn record(&self, line: impl Into<String>) {
        self.lock().push(line.into());
    }

    /// A snapshot of everything recorded so far.
    pub fn entries(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Number of recorded lines.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.lock().clear();
    }

    // A handler that panicked mid-test must not hide what was recorded.
    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ============================================================================
// Counting Handler
// ============================================================================

/// A handler that counts invocations and then continues dispatch.
///
/// # Example
///
/// ```rust
/// use switchyard_std::{RouteEntry, testing::{CountingHandler, TestRequest}};
///
/// let counter = CountingHandler::new();
/// let _entry: RouteEntry<TestRequest, ()> = RouteEntry::new(counter.clone());
/// assert_eq!(counter.count(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CountingHandler {
    count: Arc<AtomicUsize>,
}

impl CountingHandler {
    /// Create a counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Invocations so far.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset to zero.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl<R, S> Handler<R, S> for CountingHandler
where
    R: Request,
    S: Send + 'static,
{
    async fn call(&self, req: R, res: S, next: Next<R, S>, _args: Args) -> HandlerResult {
        self.count.fetch_add(1, Ordering::SeqCst);
        next.run(req, res).await
    }
}
