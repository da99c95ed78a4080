//! Configuration validation.
//!
//! Serde handles syntax; this module checks values the frontend depends on at
//! runtime: parseable bind addresses, a redirect host that is a bare
//! authority, go-import strings that can be emitted without escaping.
//!
//! Validation is a pure function and returns every problem, not just the first.

use std::fmt;
use std::net::SocketAddr;

use axum::http::uri::Authority;

use crate::config::schema::FrontendConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validate a parsed configuration.
pub fn validate_config(config: &FrontendConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_socket_addr(&mut errors, "listener.http_address", &config.listener.http_address);
    if let Some(tls) = &config.listener.tls {
        check_socket_addr(&mut errors, "listener.https_address", &config.listener.https_address);
        if tls.cert_path.trim().is_empty() {
            errors.push(ValidationError::new("listener.tls.cert_path", "must not be empty"));
        }
        if tls.key_path.trim().is_empty() {
            errors.push(ValidationError::new("listener.tls.key_path", "must not be empty"));
        }
    }

    let host = &config.security.https_host;
    if host.is_empty() {
        errors.push(ValidationError::new("security.https_host", "must not be empty"));
    } else if host.contains('@') || host.parse::<Authority>().is_err() {
        errors.push(ValidationError::new(
            "security.https_host",
            format!("{host:?} is not a valid host[:port]"),
        ));
    }

    if let Some(auth) = &config.auth {
        if auth.username.is_empty() {
            errors.push(ValidationError::new("auth.username", "must not be empty"));
        }
        if auth.username.contains(':') {
            errors.push(ValidationError::new("auth.username", "must not contain ':'"));
        }
        if auth.realm.contains('"') {
            errors.push(ValidationError::new("auth.realm", "must not contain '\"'"));
        }
    }

    check_literal(&mut errors, "vanity.source_base", &config.vanity.source_base);
    check_literal(&mut errors, "vanity.source_repo", &config.vanity.source_repo);

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }

    if config.observability.metrics_enabled {
        check_socket_addr(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_socket_addr(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            field,
            format!("{value:?} is not a socket address"),
        ));
    }
}

/// go-import values are written into an attribute verbatim.
fn check_literal(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.is_empty() {
        errors.push(ValidationError::new(field, "must not be empty"));
    } else if value
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '"' | '<' | '>' | '&'))
    {
        errors.push(ValidationError::new(
            field,
            "must not contain whitespace or any of \" < > &",
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{AuthConfig, TlsConfig};

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config(&FrontendConfig::default()).is_ok());
    }

    #[test]
    fn test_reports_every_error() {
        let mut config = FrontendConfig::default();
        config.security.https_host = "user@evil.example".into();
        config.vanity.source_repo = "https://example.com/\"><script>".into();
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["security.https_host", "vanity.source_repo", "timeouts.request_secs"]
        );
    }

    #[test]
    fn test_https_host_accepts_port() {
        let mut config = FrontendConfig::default();
        config.security.https_host = "docs.example.com:8443".into();
        assert!(validate_config(&config).is_ok());

        config.security.https_host = "docs.example.com/path".into();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_tls_paths_and_address_checked() {
        let mut config = FrontendConfig::default();
        config.listener.https_address = "not-an-address".into();
        config.listener.tls = Some(TlsConfig {
            cert_path: "".into(),
            key_path: "key.pem".into(),
        });

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "listener.https_address");
        assert_eq!(errors[1].field, "listener.tls.cert_path");
    }

    #[test]
    fn test_username_with_colon_rejected() {
        let mut config = FrontendConfig::default();
        config.auth = Some(AuthConfig {
            username: "a:b".into(),
            password: "pw".into(),
            realm: "docs".into(),
        });
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].to_string(), "auth.username: must not contain ':'");
    }
}
