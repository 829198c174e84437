//! Path pattern compilation.
//!
//! A [`PathSpec`] is what application code registers; a [`PathPattern`] is
//! what it compiles to. Compilation happens once, at registration time, and
//! is the only point where a path specification can be rejected.
//!
//! | Specification          | Pattern          | Match rule                      |
//! |------------------------|------------------|---------------------------------|
//! | `PathSpec::Any`, `"*"` | `MatchAll`       | every path                      |
//! | `"/files/*"`           | `Wildcard`       | anchored regex, `*` = `.*`      |
//! | `"/user/:id"`          | `Parametrized`   | anchored, case-insensitive      |
//! | `"/about"`             | `Literal`        | path ends with the literal      |
//! | `Regex`                | `Precompiled`    | the regex as given              |

use regex::Regex;
use std::fmt;
use switchyard_core::{Params, RouteError};

/// A path specification, as supplied at registration.
#[derive(Debug, Clone)]
pub enum PathSpec {
    /// No path guard: every path matches.
    Any,
    /// A path string, possibly containing `*` or `:name` tokens.
    Path(String),
    /// A precompiled regex, used verbatim.
    Regex(Regex),
}

impl PathSpec {
    /// Whether this specification is absent (`Any`) or an empty string.
    pub fn is_missing(&self) -> bool {
        match self {
            PathSpec::Any => true,
            PathSpec::Path(path) => path.is_empty(),
            PathSpec::Regex(_) => false,
        }
    }
}

impl From<&str> for PathSpec {
    fn from(path: &str) -> Self {
        PathSpec::Path(path.to_owned())
    }
}

impl From<String> for PathSpec {
    fn from(path: String) -> Self {
        PathSpec::Path(path)
    }
}

impl From<&String> for PathSpec {
    fn from(path: &String) -> Self {
        PathSpec::Path(path.clone())
    }
}

impl From<Regex> for PathSpec {
    fn from(regex: Regex) -> Self {
        PathSpec::Regex(regex)
    }
}

impl<T: Into<PathSpec>> From<Option<T>> for PathSpec {
    fn from(path: Option<T>) -> Self {
        path.map_or(PathSpec::Any, Into::into)
    }
}

/// A compiled path pattern.
///
/// Immutable once built; matching borrows it and returns a fresh result.
#[derive(Debug, Clone)]
pub enum PathPattern {
    /// Matches every path.
    MatchAll,
    /// Matches any path ending with the literal.
    Literal(String),
    /// A `*` pattern. The wildcard does not capture, so nothing is extracted.
    Wildcard {
        /// The specification this was compiled from.
        source: String,
        /// The anchored regex.
        regex: Regex,
    },
    /// A `:name` pattern; captures are exposed under the token names.
    Parametrized {
        /// The specification this was compiled from.
        source: String,
        /// The anchored, case-insensitive regex.
        regex: Regex,
        /// Token names, left to right.
        names: Vec<String>,
    },
    /// A caller-supplied regex.
    Precompiled(Regex),
}

impl PathPattern {
    /// Compile a path specification.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::DuplicateParam`] when a `:name` token repeats and
    /// [`RouteError::InvalidPattern`] when the generated regex is rejected.
    ///
    /// # Example
    ///
    /// ```rust
    /// use switchyard_std::PathPattern;
    ///
    /// let pattern = PathPattern::compile("/user/:id").unwrap();
    /// let params = pattern.extract("/user/42").unwrap();
    /// assert_eq!(params.get("id").map(String::as_str), Some("42"));
    /// ```
    pub fn compile(spec: impl Into<PathSpec>) -> Result<Self, RouteError> {
        match spec.into() {
            PathSpec::Any => Ok(PathPattern::MatchAll),
            PathSpec::Regex(regex) => Ok(PathPattern::Precompiled(regex)),
            PathSpec::Path(path) => Self::compile_path(path),
        }
    }

    fn compile_path(path: String) -> Result<Self, RouteError> {
        if path == "*" {
            return Ok(PathPattern::MatchAll);
        }

        // A wildcard takes precedence over `:name` tokens.
        if path.contains('*') {
            let body = path
                .split('*')
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(".*");
            let regex = build_regex(&path, &format!("^{body}$"))?;
            return Ok(PathPattern::Wildcard {
                source: path,
                regex,
            });
        }

        let segments = tokenize(&path);
        if !segments.iter().any(|s| matches!(s, Segment::Param(_))) {
            return Ok(PathPattern::Literal(path));
        }

        let mut names: Vec<String> = Vec::new();
        let mut body = String::from("(?i)^");
        for segment in segments {
            match segment {
                Segment::Text(text) => body.push_str(&regex::escape(text)),
                Segment::Param(name) => {
                    if names.iter().any(|n| n == name) {
                        return Err(RouteError::DuplicateParam {
                            pattern: path.clone(),
                            name: name.to_owned(),
                        });
                    }
                    names.push(name.to_owned());
                    body.push_str("([A-Za-z0-9_]+)");
                }
            }
        }
        body.push('$');

        let regex = build_regex(&path, &body)?;
        Ok(PathPattern::Parametrized {
            source: path,
            regex,
            names,
        })
    }

    /// Token names, in order. Empty for every kind but `Parametrized`.
    pub fn param_names(&self) -> &[String] {
        match self {
            PathPattern::Parametrized { names, .. } => names,
            _ => &[],
        }
    }

    /// Whether `path` matches, without extracting anything.
    pub fn is_match(&self, path: &str) -> bool {
        match self {
            PathPattern::MatchAll => true,
            PathPattern::Literal(literal) => path.ends_with(literal.as_str()),
            PathPattern::Wildcard { regex, .. }
            | PathPattern::Parametrized { regex, .. }
            | PathPattern::Precompiled(regex) => regex.is_match(path),
        }
    }

    /// Match `path` and return the extracted values, or `None` on mismatch.
    ///
    /// Captures are keyed by token name for `Parametrized` patterns. For a
    /// precompiled regex, named groups keep their name and the rest are keyed
    /// by position (`"0"`, `"1"`, …). Groups that did not take part in the
    /// match are left out. `Wildcard` and `Literal` extract nothing.
    pub fn extract(&self, path: &str) -> Option<Params> {
        match self {
            PathPattern::MatchAll => Some(Params::new()),
            PathPattern::Literal(literal) => path.ends_with(literal.as_str()).then(Params::new),
            PathPattern::Wildcard { regex, .. } => regex.is_match(path).then(Params::new),
            PathPattern::Precompiled(regex) => collect_captures(regex, &[], path),
            PathPattern::Parametrized { regex, names, .. } => collect_captures(regex, names, path),
        }
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathPattern::MatchAll => f.write_str("*"),
            PathPattern::Literal(literal) => f.write_str(literal),
            PathPattern::Wildcard { source, .. } | PathPattern::Parametrized { source, .. } => {
                f.write_str(source)
            }
            PathPattern::Precompiled(regex) => write!(f, "/{}/", regex.as_str()),
        }
    }
}

fn build_regex(source: &str, body: &str) -> Result<Regex, RouteError> {
    Regex::new(body).map_err(|e| RouteError::InvalidPattern {
        pattern: source.to_owned(),
        source: Box::new(e),
    })
}

fn collect_captures(regex: &Regex, names: &[String], path: &str) -> Option<Params> {
    let captures = regex.captures(path)?;
    let mut params = Params::new();
    for (index, group_name) in regex.capture_names().enumerate().skip(1) {
        let Some(value) = captures.get(index) else {
            continue;
        };
        let position = index - 1;
        let key = names
            .get(position)
            .cloned()
            .or_else(|| group_name.map(str::to_owned))
            .unwrap_or_else(|| position.to_string());
        params.insert(key, value.as_str().to_owned());
    }
    Some(params)
}

#[derive(Debug, PartialEq)]
enum Segment<'a> {
    Text(&'a str),
    Param(&'a str),
}

/// Split a path into literal text and `:identifier` tokens.
///
/// An identifier starts with a letter or underscore and continues with
/// letters, digits or underscores. A `:` not followed by one is literal text.
fn tokenize(path: &str) -> Vec<Segment<'_>> {
    let bytes = path.as_bytes();
    let mut segments = Vec::new();
    let mut text_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let starts_name = bytes[i] == b':'
            && bytes
                .get(i + 1)
                .is_some_and(|b| b.is_ascii_alphabetic() || *b == b'_');
        if !starts_name {
            i += 1;
            continue;
        }

        let name_start = i + 1;
        let mut name_end = name_start;
        while bytes
            .get(name_end)
            .is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'_')
        {
            name_end += 1;
        }

        if text_start < i {
            segments.push(Segment::Text(&path[text_start..i]));
        }
        segments.push(Segment::Param(&path[name_start..name_end]));
        text_start = name_end;
        i = name_end;
    }

    if text_start < bytes.len() {
        segments.push(Segment::Text(&path[text_start..]));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("/user/:id/comment/:cid"),
            vec![
                Segment::Text("/user/"),
                Segment::Param("id"),
                Segment::Text("/comment/"),
                Segment::Param("cid"),
            ]
        );
        assert_eq!(tokenize("/a:1"), vec![Segment::Text("/a:1")]);
        assert_eq!(tokenize(":x"), vec![Segment::Param("x")]);
    }

    #[test]
    fn test_classification() {
        assert!(matches!(PathPattern::compile(PathSpec::Any), Ok(PathPattern::MatchAll)));
        assert!(matches!(PathPattern::compile("*"), Ok(PathPattern::MatchAll)));
        assert!(matches!(PathPattern::compile("/api/*"), Ok(PathPattern::Wildcard { .. })));
        assert!(matches!(PathPattern::compile("/u/:id"), Ok(PathPattern::Parametrized { .. })));
        assert!(matches!(PathPattern::compile("/about"), Ok(PathPattern::Literal(_))));
        let regex = Regex::new("^/[a-z]oo").unwrap();
        assert!(matches!(PathPattern::compile(regex), Ok(PathPattern::Precompiled(_))));
        assert!(matches!(PathPattern::compile(None::<&str>), Ok(PathPattern::MatchAll)));
    }

    #[test]
    fn test_single_param() {
        let pattern = PathPattern::compile("/user/:id").unwrap();
        assert_eq!(pattern.param_names(), ["id"]);
        assert_eq!(pattern.extract("/user/42"), Some(params(&[("id", "42")])));
    }

    #[test]
    fn test_two_params() {
        let pattern = PathPattern::compile("/user/:id/comment/:cid").unwrap();
        assert_eq!(
            pattern.extract("/user/9/comment/3"),
            Some(params(&[("id", "9"), ("cid", "3")]))
        );
    }

    #[test]
    fn test_param_pattern_is_anchored() {
        let pattern = PathPattern::compile("/user/:id").unwrap();
        assert_eq!(pattern.extract("/user/42/edit"), None);
        assert_eq!(pattern.extract("/admin/user/42"), None);
        assert_eq!(pattern.extract("/user/"), None);
    }

    #[test]
    fn test_param_pattern_is_case_insensitive() {
        let pattern = PathPattern::compile("/User/:id").unwrap();
        assert_eq!(pattern.extract("/USER/7"), Some(params(&[("id", "7")])));
    }

    #[test]
    fn test_param_value_is_word_characters() {
        let pattern = PathPattern::compile("/file/:name").unwrap();
        assert!(pattern.is_match("/file/report_2024"));
        assert!(!pattern.is_match("/file/report.pdf"));
    }

    #[test]
    fn test_param_value_is_ascii_only() {
        let pattern = PathPattern::compile("/user/:id").unwrap();
        assert!(!pattern.is_match("/user/héllo"));
        assert!(!pattern.is_match("/user/٣"));
        assert_eq!(pattern.extract("/user/Bob_42"), Some(params(&[("id", "Bob_42")])));
    }

    #[test]
    fn test_literal_text_is_escaped() {
        let pattern = PathPattern::compile("/v1.0/:id").unwrap();
        assert!(pattern.is_match("/v1.0/5"));
        assert!(!pattern.is_match("/v1x0/5"));
    }

    #[test]
    fn test_duplicate_param_rejected() {
        let err = PathPattern::compile("/a/:id/b/:id").unwrap_err();
        assert!(matches!(err, RouteError::DuplicateParam { ref name, .. } if name == "id"));
    }

    #[test]
    fn test_match_all() {
        let pattern = PathPattern::compile(PathSpec::Any).unwrap();
        assert_eq!(pattern.extract("/"), Some(Params::new()));
        assert_eq!(pattern.extract("/anything/nested"), Some(Params::new()));
    }

    #[test]
    fn test_wildcard() {
        let pattern = PathPattern::compile("/api/*").unwrap();
        assert_eq!(pattern.extract("/api/anything/nested"), Some(Params::new()));
        assert_eq!(pattern.extract("/other"), None);
        assert!(pattern.param_names().is_empty());
    }

    #[test]
    fn test_wildcard_multiple_positions() {
        let pattern = PathPattern::compile("/*/files/*.txt").unwrap();
        assert_eq!(pattern.extract("/alice/files/notes.txt"), Some(Params::new()));
        assert!(!pattern.is_match("/alice/files/notes.md"));
    }

    #[test]
    fn test_literal_is_suffix_match() {
        let pattern = PathPattern::compile("/foo").unwrap();
        assert!(pattern.is_match("/foo"));
        assert!(pattern.is_match("/bar/foo"));
        assert!(!pattern.is_match("/foo/bar"));
        assert_eq!(pattern.extract("/bar"), None);
    }

    #[test]
    fn test_precompiled_regex_used_verbatim() {
        let pattern = PathPattern::compile(Regex::new("^/[a-z]oo").unwrap()).unwrap();
        assert!(pattern.is_match("/foo"));
        assert!(pattern.is_match("/zoo/extra"));
        assert!(!pattern.is_match("/faa"));
    }

    #[test]
    fn test_precompiled_captures() {
        let regex = Regex::new(r"^/(\d+)/(?P<slug>[a-z]+)(/x)?$").unwrap();
        let pattern = PathPattern::compile(regex).unwrap();
        assert_eq!(
            pattern.extract("/12/intro"),
            Some(params(&[("0", "12"), ("slug", "intro")]))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(PathPattern::compile("/user/:id").unwrap().to_string(), "/user/:id");
        assert_eq!(PathPattern::compile("*").unwrap().to_string(), "*");
        assert_eq!(PathPattern::compile("/a/*").unwrap().to_string(), "/a/*");
    }

    #[test]
    fn test_missing_spec() {
        assert!(PathSpec::Any.is_missing());
        assert!(PathSpec::from("").is_missing());
        assert!(!PathSpec::from("/").is_missing());
    }
}
