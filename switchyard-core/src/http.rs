//! A plain owned request, for servers that have already parsed their input
//! and for tests.

use crate::request::{Params, Request};

/// An owned, already-parsed HTTP request.
///
/// # Example
///
/// ```rust
/// use switchyard_core::{HttpRequest, Request};
///
/// let req = HttpRequest::new("GET", "/user/42")
///     .with_header("Accept", "text/html, application/json;q=0.9")
///     .with_param("page", "2");
///
/// assert!(req.accepts("application/json"));
/// assert_eq!(req.param("page"), Some("2"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct HttpRequest {
    method: String,
    path: String,
    headers: Vec<(String, String)>,
    params: Params,
}

impl HttpRequest {
    /// Create a request with the given method and path.
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            headers: Vec::new(),
            params: Params::new(),
        }
    }

    /// Shorthand for a `GET` request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new("GET", path)
    }

    /// Shorthand for a `POST` request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new("POST", path)
    }

    /// Add a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add a parameter, as query or body parsing would.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Look up a header by case-insensitive name. The first occurrence wins.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The media types listed in the `Accept` header, parameters stripped.
    pub fn accepted_types(&self) -> Vec<&str> {
        self.header("Accept")
            .map(|accept| {
                accept
                    .split(',')
                    .filter_map(|item| {
                        let media = item.split(';').next().unwrap_or_default().trim();
                        (!media.is_empty()).then_some(media)
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether the `Content-Type` header names `media_type`.
    pub fn is(&self, media_type: &str) -> bool {
        self.header("Content-Type").is_some_and(|value| {
            value
                .split(';')
                .any(|part| part.trim().eq_ignore_ascii_case(media_type))
        })
    }
}

impl Request for HttpRequest {
    fn path(&self) -> &str {
        &self.path
    }

    fn method(&self) -> &str {
        &self.method
    }

    fn accepts(&self, media_type: &str) -> bool {
        self.accepted_types()
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(media_type))
    }

    fn params(&self) -> &Params {
        &self.params
    }

    fn params_mut(&mut self) -> &mut Params {
        &mut self.params
    }
}
