//! go-import discovery.
//!
//! `go get` fetches `https://<import path>?go-get=1` and parses a single
//! `<meta name="go-import" ...>` tag out of the body. The tag is emitted
//! verbatim; configuration validation guarantees neither value needs escaping.

use url::form_urlencoded;

use crate::config::VanityConfig;

/// Import path prefix and the repository it is fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VanityImport {
    source_base: String,
    source_repo: String,
    meta: String,
}

impl VanityImport {
    pub fn new(source_base: impl Into<String>, source_repo: impl Into<String>) -> Self {
        let source_base = source_base.into();
        let source_repo = source_repo.into();
        let meta = format!(r#"<meta name="go-import" content="{source_base} git {source_repo}">"#);
        Self {
            source_base,
            source_repo,
            meta,
        }
    }

    pub fn from_config(config: &VanityConfig) -> Self {
        Self::new(&config.source_base, &config.source_repo)
    }

    /// The complete `<meta>` tag.
    pub fn meta_tag(&self) -> &str {
        &self.meta
    }

    /// Response body: the tag and a trailing newline.
    pub fn body(&self) -> String {
        format!("{}\n", self.meta)
    }

    pub fn source_base(&self) -> &str {
        &self.source_base
    }

    pub fn source_repo(&self) -> &str {
        &self.source_repo
    }
}

/// True when the first `go-get` query parameter is `1`.
pub fn is_discovery(query: Option<&str>) -> bool {
    let Some(query) = query else {
        return false;
    };
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "go-get")
        .is_some_and(|(_, value)| value == "1")
}
