//! Request trait consumed by the dispatch engine.

use std::collections::HashMap;

/// The request's parameter mapping.
///
/// Values are merged into it from query/body parsing (upstream) and from
/// path extraction (by matched route entries).
pub type Params = HashMap<String, String>;

/// Extra positional arguments handed to a handler after `next`.
pub type Args = Vec<String>;

/// The view of an incoming request the engine needs.
///
/// The HTTP server that accepted the connection owns parsing; it hands the
/// engine something implementing this trait. The response travels alongside
/// as an opaque value and is never inspected.
///
/// Requests must be `Send + 'static` so a dispatch can suspend and resume on
/// any worker.
///
/// # Example
///
/// ```rust
/// use switchyard_core::{Params, Request};
///
/// struct Bare {
///     path: String,
///     params: Params,
/// }
///
/// impl Request for Bare {
///     fn path(&self) -> &str { &self.path }
///     fn method(&self) -> &str { "GET" }
///     fn accepts(&self, _media_type: &str) -> bool { false }
///     fn params(&self) -> &Params { &self.params }
///     fn params_mut(&mut self) -> &mut Params { &mut self.params }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a routable Request",
    label = "missing `Request` implementation",
    note = "Requests expose a path, a method, content negotiation and a mutable parameter mapping."
)]
pub trait Request: Send + 'static {
    /// The request path, without the query string.
    fn path(&self) -> &str;

    /// The HTTP method, as an uppercase verb.
    fn method(&self) -> &str;

    /// Whether the client's `Accept` set contains `media_type`.
    fn accepts(&self, media_type: &str) -> bool;

    /// The current parameter mapping.
    fn params(&self) -> &Params;

    /// Mutable access to the parameter mapping.
    fn params_mut(&mut self) -> &mut Params;

    /// Look up a single parameter.
    fn param(&self, name: &str) -> Option<&str> {
        self.params().get(name).map(String::as_str)
    }
}

impl<T: Request> Request for Box<T> {
    fn path(&self) -> &str {
        (**self).path()
    }

    fn method(&self) -> &str {
        (**self).method()
    }

    fn accepts(&self, media_type: &str) -> bool {
        (**self).accepts(media_type)
    }

    fn params(&self) -> &Params {
        (**self).params()
    }

    fn params_mut(&mut self) -> &mut Params {
        (**self).params_mut()
    }
}
