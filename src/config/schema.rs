//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the frontend.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the documentation frontend.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FrontendConfig {
    /// Listener configuration (bind addresses, TLS).
    pub listener: ListenerConfig,

    /// HTTPS enforcement and HSTS policy.
    pub security: SecurityConfig,

    /// HTTP Basic credentials. Content is served openly when absent.
    pub auth: Option<AuthConfig>,

    /// Documentation corpus location.
    pub docs: DocsConfig,

    /// go-import discovery metadata.
    pub vanity: VanityConfig,

    /// Response compression.
    pub compression: CompressionConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Plain HTTP bind address. Requests here are redirected to HTTPS.
    pub http_address: String,

    /// HTTPS bind address, used only when `tls` is set.
    pub https_address: String,

    /// Optional TLS configuration.
    pub tls: Option<TlsConfig>,

    /// Seconds in-flight TLS connections get to finish on shutdown.
    pub shutdown_grace_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            http_address: "0.0.0.0:80".to_string(),
            https_address: "0.0.0.0:443".to_string(),
            tls: None,
            shutdown_grace_secs: 10,
        }
    }
}

/// TLS configuration for the HTTPS listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TlsConfig {
    /// Path to certificate file (PEM).
    pub cert_path: String,

    /// Path to private key file (PEM).
    pub key_path: String,
}

/// Transport security policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Host (and optional port) that plain HTTP requests are redirected to.
    pub https_host: String,

    /// `max-age` of the Strict-Transport-Security header, in seconds.
    pub hsts_max_age_secs: u64,

    /// Append `includeSubDomains` to the HSTS header.
    pub hsts_include_subdomains: bool,

    /// Redirect plain HTTP requests. Disable only for local development.
    pub force_https: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            https_host: "localhost:443".to_string(),
            hsts_max_age_secs: 86_400,
            hsts_include_subdomains: true,
            force_https: true,
        }
    }
}

/// HTTP Basic credentials.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,

    /// Realm advertised in `WWW-Authenticate`.
    #[serde(default = "default_realm")]
    pub realm: String,
}

fn default_realm() -> String {
    "docs".to_string()
}

/// Documentation corpus configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DocsConfig {
    /// Directory holding the `*.md` documents.
    pub path: String,

    /// Rebuild the index when the directory changes.
    pub watch: bool,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            path: "doc".to_string(),
            watch: false,
        }
    }
}

/// go-import discovery configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct VanityConfig {
    /// Canonical import path prefix (e.g. `upspin.io`).
    pub source_base: String,

    /// Version-control fetch URL.
    pub source_repo: String,
}

impl Default for VanityConfig {
    fn default() -> Self {
        Self {
            source_base: "upspin.io".to_string(),
            source_repo: "https://upspin.googlesource.com/upspin".to_string(),
        }
    }
}

/// Compression level applied to every enabled encoding.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CompressionLevel {
    Fastest,
    #[default]
    Default,
    Best,
}

/// Response compression configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CompressionConfig {
    pub gzip: bool,
    pub br: bool,
    pub deflate: bool,
    pub zstd: bool,
    pub level: CompressionLevel,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            gzip: true,
            br: true,
            deflate: true,
            zstd: true,
            level: CompressionLevel::Default,
        }
    }
}

impl CompressionConfig {
    /// True when at least one encoding is enabled.
    pub fn any_enabled(&self) -> bool {
        self.gzip || self.br || self.deflate || self.zstd
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error) or a full filter directive.
    pub log_level: String,

    /// Log line format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
