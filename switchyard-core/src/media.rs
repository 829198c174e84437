//! Media type shorthands.

/// Expand a content-type shorthand to its full media type.
///
/// `text`, `html` and `json` are expanded; anything else is returned as given.
///
/// ```rust
/// use switchyard_core::canonical_media_type;
///
/// assert_eq!(canonical_media_type("json"), "application/json");
/// assert_eq!(canonical_media_type("image/png"), "image/png");
/// ```
pub fn canonical_media_type(content_type: &str) -> &str {
    match content_type {
        "text" => "text/plain",
        "html" => "text/html",
        "json" => "application/json",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorthands_expand() {
        assert_eq!(canonical_media_type("text"), "text/plain");
        assert_eq!(canonical_media_type("html"), "text/html");
        assert_eq!(canonical_media_type("json"), "application/json");
    }

    #[test]
    fn test_full_types_pass_through() {
        assert_eq!(canonical_media_type("application/xml"), "application/xml");
        assert_eq!(canonical_media_type("JSON"), "JSON");
    }
}
