//! Request path → route resolution.
//!
//! Every request resolves to exactly one `Route`, once, before dispatch.
//!
//! # Rules (first match wins)
//! - query has `go-get=1`          → `Discovery` (any path)
//! - `/`                           → `List`
//! - `/favicon.ico`                → `Favicon`
//! - `/doc/<name>`, name non-empty → `Doc(name)` (percent-decoded)
//! - anything else                 → `NotFound`

use axum::http::Uri;

use crate::http::vanity::is_discovery;

pub const DOC_PREFIX: &str = "/doc/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Document listing.
    List,
    /// Single document by canonical name.
    Doc(String),
    /// Browsers ask for it; there is none.
    Favicon,
    /// go-import metadata for source fetchers.
    Discovery,
    NotFound,
}

impl Route {
    pub fn resolve(uri: &Uri) -> Self {
        if is_discovery(uri.query()) {
            return Route::Discovery;
        }

        match uri.path() {
            "/" => Route::List,
            "/favicon.ico" => Route::Favicon,
            path => match path.strip_prefix(DOC_PREFIX) {
                Some(name) if !name.is_empty() => match urlencoding::decode(name) {
                    Ok(name) => Route::Doc(name.into_owned()),
                    Err(_) => Route::NotFound,
                },
                _ => Route::NotFound,
            },
        }
    }

    /// Whether the response carries protected content.
    pub fn requires_auth(&self) -> bool {
        matches!(self, Route::List | Route::Doc(_) | Route::Discovery)
    }

    /// Low-cardinality name for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Route::List => "list",
            Route::Doc(_) => "doc",
            Route::Favicon => "favicon",
            Route::Discovery => "discovery",
            Route::NotFound => "not_found",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(uri: &str) -> Route {
        Route::resolve(&uri.parse().unwrap())
    }

    #[test]
    fn test_well_known_paths() {
        assert_eq!(resolve("/"), Route::List);
        assert_eq!(resolve("/favicon.ico"), Route::Favicon);
        assert_eq!(resolve("/doc/test.md"), Route::Doc("test.md".into()));
    }

    #[test]
    fn test_discovery_wins_on_any_path() {
        assert_eq!(resolve("/?go-get=1"), Route::Discovery);
        assert_eq!(resolve("/cmd/upspin?go-get=1"), Route::Discovery);
        assert_eq!(resolve("/doc/test.md?x=y&go-get=1"), Route::Discovery);
        assert_eq!(resolve("/?go-get=0"), Route::List);
    }

    #[test]
    fn test_doc_names_are_percent_decoded() {
        assert_eq!(
            resolve("/doc/release%20notes.md"),
            Route::Doc("release notes.md".into())
        );
        assert_eq!(resolve("/doc/%ff%fe"), Route::NotFound);
    }

    #[test]
    fn test_unmatched_paths() {
        assert_eq!(resolve("/doc/"), Route::NotFound);
        assert_eq!(resolve("/doc"), Route::NotFound);
        assert_eq!(resolve("/docs/test.md"), Route::NotFound);
        assert_eq!(resolve("/favicon.ico/"), Route::NotFound);
        assert_eq!(resolve("/index.html"), Route::NotFound);
    }

    #[test]
    fn test_auth_applies_to_content_only() {
        assert!(Route::List.requires_auth());
        assert!(Route::Doc("a".into()).requires_auth());
        assert!(Route::Discovery.requires_auth());
        assert!(!Route::Favicon.requires_auth());
        assert!(!Route::NotFound.requires_auth());
    }
}
