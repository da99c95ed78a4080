//! HTTPS enforcement and HSTS.
//!
//! # Responsibilities
//! - Redirect plain HTTP requests to the configured HTTPS host (307)
//! - Attach `Strict-Transport-Security` to every TLS response
//!
//! # Design Decisions
//! - The listener records the transport as a request extension; the
//!   middleware never inspects `Host` or forwarded headers
//! - Redirect target host comes from `SecurityPolicy` only, so a forged
//!   `Host` header cannot steer the redirect
//! - This layer runs before authorization: plain requests are redirected even
//!   without credentials
//! - Missing transport marker is treated as plain

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, uri::Authority, HeaderValue, Method, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::config::SecurityConfig;
use crate::docs::render::escape_html;
use crate::observability::metrics;

/// How a request reached the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transport {
    #[default]
    Plain,
    Tls,
}

impl Transport {
    pub fn scheme(self) -> &'static str {
        match self {
            Transport::Plain => "http",
            Transport::Tls => "https",
        }
    }
}

/// Errors building a policy from configuration.
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("invalid https host {0:?}")]
    InvalidHost(String),
}

/// Process-wide transport security policy. Immutable after construction.
#[derive(Debug, Clone)]
pub struct SecurityPolicy {
    https_host: Authority,
    hsts: HeaderValue,
    force_https: bool,
}

impl SecurityPolicy {
    pub fn new(
        https_host: &str,
        hsts_max_age_secs: u64,
        include_subdomains: bool,
        force_https: bool,
    ) -> Result<Self, PolicyError> {
        let https_host: Authority = https_host
            .parse()
            .map_err(|_| PolicyError::InvalidHost(https_host.to_string()))?;

        let mut value = format!("max-age={hsts_max_age_secs}");
        if include_subdomains {
            value.push_str("; includeSubDomains");
        }
        // Digits and ASCII letters only.
        let hsts = HeaderValue::try_from(value)
            .unwrap_or_else(|_| HeaderValue::from_static("max-age=0"));

        Ok(Self {
            https_host,
            hsts,
            force_https,
        })
    }

    pub fn from_config(config: &SecurityConfig) -> Result<Self, PolicyError> {
        Self::new(
            &config.https_host,
            config.hsts_max_age_secs,
            config.hsts_include_subdomains,
            config.force_https,
        )
    }

    /// `https://<https_host><path>[?<query>]` for the given request URI.
    pub fn redirect_target(&self, uri: &Uri) -> String {
        let path_and_query = uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        format!("https://{}{}", self.https_host, path_and_query)
    }

    pub fn hsts_header(&self) -> &HeaderValue {
        &self.hsts
    }

    pub fn https_host(&self) -> &str {
        self.https_host.as_str()
    }

    pub fn force_https(&self) -> bool {
        self.force_https
    }
}

/// Middleware applying the policy.
pub async fn enforce_https(
    State(policy): State<Arc<SecurityPolicy>>,
    request: Request,
    next: Next,
) -> Response {
    let transport = request
        .extensions()
        .get::<Transport>()
        .copied()
        .unwrap_or_default();

    match transport {
        Transport::Plain if policy.force_https => redirect(&policy, &request),
        Transport::Plain => next.run(request).await,
        Transport::Tls => {
            let mut response = next.run(request).await;
            response
                .headers_mut()
                .insert(header::STRICT_TRANSPORT_SECURITY, policy.hsts.clone());
            response
        }
    }
}

fn redirect(policy: &SecurityPolicy, request: &Request) -> Response {
    let target = policy.redirect_target(request.uri());
    let Ok(location) = HeaderValue::from_str(&target) else {
        tracing::warn!(uri = %request.uri(), "Cannot build redirect location");
        return StatusCode::BAD_REQUEST.into_response();
    };

    tracing::debug!(method = %request.method(), location = %target, "Redirecting to HTTPS");
    metrics::record_redirect();

    let body = if request.method() == Method::GET || request.method() == Method::HEAD {
        Body::from(format!(
            "<a href=\"{}\">Temporary Redirect</a>.\n",
            escape_html(&target)
        ))
    } else {
        Body::empty()
    };

    let mut response = Response::new(body);
    *response.status_mut() = StatusCode::TEMPORARY_REDIRECT;
    let headers = response.headers_mut();
    headers.insert(header::LOCATION, location);
    if request.method() == Method::GET || request.method() == Method::HEAD {
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/html; charset=utf-8"),
        );
    }
    response
}
