//! Per-request context.
//!
//! # Responsibilities
//! - Carry the request ID assigned by `SetRequestIdLayer`
//! - Resolve the route once
//! - Record transport, encoding preference and the authorization verdict
//!
//! # Design Decisions
//! - Built by the dispatcher, dropped with the request; never shared
//! - Authorization is evaluated only for routes that require it

use axum::http::{header, HeaderMap, HeaderName, Request};

use crate::http::route::Route;
use crate::security::{Authorizer, Credentials, Transport};

/// Header carrying the request ID.
pub static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Request ID from headers, or `"unknown"`.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Transient data about one request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
    pub path: String,
    pub route: Route,
    pub transport: Transport,
    /// Raw `Accept-Encoding`; the compression layer does the negotiation.
    pub accept_encoding: Option<String>,
    /// `true` for routes that need no authorization.
    pub authorized: bool,
}

impl RequestContext {
    pub fn from_request<B>(request: &Request<B>, authorizer: &dyn Authorizer) -> Self {
        let headers = request.headers();
        let route = Route::resolve(request.uri());
        let authorized = !route.requires_auth()
            || authorizer.authorized(Credentials::from_headers(headers).as_ref());

        Self {
            request_id: request_id(headers).to_string(),
            path: request.uri().path().to_string(),
            transport: request
                .extensions()
                .get::<Transport>()
                .copied()
                .unwrap_or_default(),
            accept_encoding: headers
                .get(header::ACCEPT_ENCODING)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            route,
            authorized,
        }
    }
}
