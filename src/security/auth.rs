//! HTTP Basic authorization.
//!
//! Credential verification sits behind the `Authorizer` trait; the dispatcher
//! only consumes its boolean verdict.

use axum::http::{header, HeaderMap};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use constant_time_eq::constant_time_eq;

use crate::config::AuthConfig;

/// Credentials presented via `Authorization: Basic ...`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Parse Basic credentials from request headers.
    ///
    /// Returns `None` when the header is absent, uses another scheme, or is
    /// not valid base64 / UTF-8 / `user:password`.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
        let (scheme, encoded) = value.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return None;
        }

        let decoded = STANDARD.decode(encoded.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (username, password) = decoded.split_once(':')?;

        Some(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

/// Decides whether a request may see content.
pub trait Authorizer: Send + Sync {
    fn authorized(&self, credentials: Option<&Credentials>) -> bool;

    /// Realm advertised in the `WWW-Authenticate` challenge.
    fn realm(&self) -> &str {
        "docs"
    }
}

/// Accepts every request, with or without credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl Authorizer for AllowAll {
    fn authorized(&self, _credentials: Option<&Credentials>) -> bool {
        true
    }
}

/// A single username/password pair compared in constant time.
#[derive(Clone)]
pub struct StaticCredentials {
    username: String,
    password: String,
    realm: String,
}

impl StaticCredentials {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        realm: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            realm: realm.into(),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.username, &config.password, &config.realm)
    }
}

impl Authorizer for StaticCredentials {
    fn authorized(&self, credentials: Option<&Credentials>) -> bool {
        let Some(credentials) = credentials else {
            return false;
        };
        // Evaluate both so timing does not reveal which half matched.
        let user_ok = constant_time_eq(credentials.username.as_bytes(), self.username.as_bytes());
        let pass_ok = constant_time_eq(credentials.password.as_bytes(), self.password.as_bytes());
        user_ok & pass_ok
    }

    fn realm(&self) -> &str {
        &self.realm
    }
}
