//! Route entries: one guarded handler registration.
//!
//! An entry owns a compiled [`PathPattern`], three optional guards and a
//! handler. Matching is a pure function of the entry and the request: the
//! result is returned as a [`RouteMatch`] and nothing on the entry is
//! written, so one entry can be matched by any number of concurrent
//! dispatches.
//!
//! Guards are evaluated in this order, stopping at the first failure:
//!
//! 1. content type: the request must accept the configured media type
//! 2. method: exact, case-sensitive comparison
//! 3. path: see [`PathPattern::extract`]
//! 4. parameter presence: the request's current params must hold the key

use crate::{
    dispatch::Next,
    handler::{DynHandler, Handler, HandlerResult},
    pattern::PathPattern,
};
use futures::future::BoxFuture;
use std::{fmt, sync::Arc};
use switchyard_core::{Args, Params, Request, canonical_media_type};

/// The per-call result of a successful match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteMatch {
    /// Values extracted from the path, merged into the request before
    /// invocation.
    pub params: Params,
    /// Extra arguments for the handler.
    pub args: Args,
}

/// A single guarded handler registration.
pub struct RouteEntry<R, S> {
    pattern: PathPattern,
    method: Option<String>,
    content_type: Option<String>,
    param: Option<String>,
    args: Args,
    handler: Arc<dyn DynHandler<R, S>>,
}

impl<R, S> RouteEntry<R, S>
where
    R: Request,
    S: Send + 'static,
{
    /// Create an entry with no guards: it matches every request.
    pub fn new<H>(handler: H) -> Self
    where
        H: Handler<R, S>,
    {
        Self {
            pattern: PathPattern::MatchAll,
            method: None,
            content_type: None,
            param: None,
            args: Args::new(),
            handler: Arc::new(handler),
        }
    }

    /// Guard on a compiled path pattern.
    pub fn with_pattern(mut self, pattern: PathPattern) -> Self {
        self.pattern = pattern;
        self
    }

    /// Guard on an HTTP method.
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Guard on content negotiation. Shorthands such as `json` are expanded.
    pub fn with_content_type(mut self, content_type: impl AsRef<str>) -> Self {
        self.content_type = Some(canonical_media_type(content_type.as_ref()).to_owned());
        self
    }

    /// Guard on the presence of a request parameter.
    ///
    /// On match, the parameter's value replaces the extra arguments.
    pub fn with_param(mut self, name: impl Into<String>) -> Self {
        self.param = Some(name.into());
        self
    }

    /// Extra arguments handed to the handler after `next`.
    pub fn with_args(mut self, args: Args) -> Self {
        self.args = args;
        self
    }

    /// The path pattern.
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// The method guard.
    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    /// The content-type guard, expanded.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// The parameter-presence guard.
    pub fn param(&self) -> Option<&str> {
        self.param.as_deref()
    }

    /// Evaluate the guards against `req`.
    ///
    /// Returns `None` when any guard fails. The parameter guard looks at the
    /// params as they are *now*, before this entry's own path values are
    /// merged, so it sees whatever query parsing or earlier entries put
    /// there.
    pub fn matches(&self, req: &R) -> Option<RouteMatch> {
        if let Some(content_type) = &self.content_type {
            if !req.accepts(content_type) {
                return None;
            }
        }

        if let Some(method) = &self.method {
            if method != req.method() {
                return None;
            }
        }

        let params = self.pattern.extract(req.path())?;

        let args = match &self.param {
            Some(name) => vec![req.params().get(name)?.clone()],
            None => self.args.clone(),
        };

        Some(RouteMatch { params, args })
    }

    /// Merge `found` into the request and call the handler.
    ///
    /// Extracted path values overwrite existing keys.
    pub fn invoke(
        &self,
        mut req: R,
        res: S,
        next: Next<R, S>,
        found: RouteMatch,
    ) -> BoxFuture<'_, HandlerResult> {
        req.params_mut().extend(found.params);
        self.handler.call_dyn(req, res, next, found.args)
    }
}

impl<R, S> fmt::Display for RouteEntry<R, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method.as_deref().unwrap_or("ALL"), self.pattern)?;
        if let Some(content_type) = &self.content_type {
            write!(f, " accepts={content_type}")?;
        }
        if let Some(param) = &self.param {
            write!(f, " param={param}")?;
        }
        Ok(())
    }
}

impl<R, S> fmt::Debug for RouteEntry<R, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("pattern", &self.pattern)
            .field("method", &self.method)
            .field("content_type", &self.content_type)
            .field("param", &self.param)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchyard_core::HttpRequest;

    async fn noop(_req: HttpRequest, _res: (), _next: Next<HttpRequest, ()>, _args: Args) {}

    fn entry() -> RouteEntry<HttpRequest, ()> {
        RouteEntry::new(noop)
    }

    fn path(spec: &str) -> PathPattern {
        PathPattern::compile(spec).unwrap()
    }

    #[test]
    fn test_unguarded_entry_matches_everything() {
        let found = entry().matches(&HttpRequest::post("/any/where")).unwrap();
        assert_eq!(found, RouteMatch::default());
    }

    #[test]
    fn test_content_type_guard() {
        let entry = entry().with_pattern(path("/foo")).with_content_type("json");
        assert_eq!(entry.content_type(), Some("application/json"));

        let json = HttpRequest::get("/foo").with_header("Accept", "application/json");
        let html = HttpRequest::get("/foo").with_header("Accept", "text/html");
        assert!(entry.matches(&json).is_some());
        assert!(entry.matches(&html).is_none());
        assert!(entry.matches(&HttpRequest::get("/foo")).is_none());
    }

    #[test]
    fn test_method_guard_is_exact() {
        let entry = entry().with_pattern(path("/foo")).with_method("GET");
        assert!(entry.matches(&HttpRequest::get("/foo")).is_some());
        assert!(entry.matches(&HttpRequest::post("/foo")).is_none());
        assert!(entry.matches(&HttpRequest::new("get", "/foo")).is_none());
    }

    #[test]
    fn test_path_guard_extracts() {
        let entry = entry().with_pattern(path("/user/:user_id/comment/:comment_id"));
        assert!(entry.matches(&HttpRequest::get("/foo")).is_none());

        let found = entry.matches(&HttpRequest::get("/user/10/comment/11")).unwrap();
        assert_eq!(found.params.get("user_id").map(String::as_str), Some("10"));
        assert_eq!(found.params.get("comment_id").map(String::as_str), Some("11"));
        assert!(found.args.is_empty());
    }

    #[test]
    fn test_param_guard() {
        let entry = entry().with_pattern(path("/foo")).with_param("bar");
        assert!(entry.matches(&HttpRequest::get("/foo").with_param("baz", "1")).is_none());

        let found = entry
            .matches(&HttpRequest::get("/foo").with_param("bar", "baz"))
            .unwrap();
        assert_eq!(found.args, vec!["baz".to_string()]);
    }

    #[test]
    fn test_param_guard_replaces_fixed_args() {
        let entry = entry()
            .with_args(vec!["fixed".into()])
            .with_param("id");
        let found = entry.matches(&HttpRequest::get("/").with_param("id", "7")).unwrap();
        assert_eq!(found.args, vec!["7".to_string()]);

        let plain: RouteEntry<HttpRequest, ()> =
            RouteEntry::new(noop).with_args(vec!["fixed".into()]);
        let found = plain.matches(&HttpRequest::get("/")).unwrap();
        assert_eq!(found.args, vec!["fixed".to_string()]);
    }

    #[test]
    fn test_param_guard_ignores_own_path_values() {
        let entry = entry().with_pattern(path("/user/:id")).with_param("id");
        assert!(entry.matches(&HttpRequest::get("/user/3")).is_none());
    }

    #[test]
    fn test_matching_leaves_entry_untouched() {
        let entry = entry().with_pattern(path("/user/:id"));
        let a = entry.matches(&HttpRequest::get("/user/1")).unwrap();
        let b = entry.matches(&HttpRequest::get("/user/2")).unwrap();
        assert_eq!(a.params.get("id").map(String::as_str), Some("1"));
        assert_eq!(b.params.get("id").map(String::as_str), Some("2"));
    }

    #[test]
    fn test_display() {
        let entry = entry()
            .with_pattern(path("/user/:id"))
            .with_method("GET")
            .with_content_type("html");
        assert_eq!(entry.to_string(), "GET /user/:id accepts=text/html");
        let hook: RouteEntry<HttpRequest, ()> = RouteEntry::new(noop).with_param("id");
        assert_eq!(hook.to_string(), "ALL * param=id");
    }
}
