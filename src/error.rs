//! Request-scoped errors and their HTTP mapping.

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Body written for every 404, matching what tooling expects from a bare mux.
pub const NOT_FOUND_BODY: &str = "404 page not found\n";

/// Errors that end a request early.
///
/// None of these are fatal to the process: each maps to a status code and a
/// minimal plain-text body.
#[derive(Debug, Error)]
pub enum FrontendError {
    /// Requested document name is not in the index.
    #[error("document not found: {0}")]
    DocumentNotFound(String),

    /// Path matched no route (includes `/favicon.ico`).
    #[error("no route for {0}")]
    NotFound(String),

    /// Credentials missing or rejected.
    #[error("unauthorized")]
    Unauthorized { realm: Arc<str> },

    /// Only GET and HEAD are served.
    #[error("method {0} not allowed")]
    MethodNotAllowed(Method),
}

impl FrontendError {
    pub fn status(&self) -> StatusCode {
        match self {
            FrontendError::DocumentNotFound(_) | FrontendError::NotFound(_) => {
                StatusCode::NOT_FOUND
            }
            FrontendError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            FrontendError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for FrontendError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            FrontendError::DocumentNotFound(_) | FrontendError::NotFound(_) => {
                (status, NOT_FOUND_BODY).into_response()
            }
            FrontendError::Unauthorized { realm } => {
                let challenge = HeaderValue::from_str(&format!("Basic realm=\"{realm}\""))
                    .unwrap_or_else(|_| HeaderValue::from_static("Basic"));
                (
                    status,
                    [(header::WWW_AUTHENTICATE, challenge)],
                    "401 unauthorized\n",
                )
                    .into_response()
            }
            FrontendError::MethodNotAllowed(_) => (
                status,
                [(header::ALLOW, HeaderValue::from_static("GET, HEAD"))],
                "405 method not allowed\n",
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_variants_map_to_404() {
        let doc = FrontendError::DocumentNotFound("missing.md".into()).into_response();
        assert_eq!(doc.status(), StatusCode::NOT_FOUND);

        let path = FrontendError::NotFound("/favicon.ico".into()).into_response();
        assert_eq!(path.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_unauthorized_carries_challenge() {
        let response = FrontendError::Unauthorized {
            realm: Arc::from("docs"),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers()[header::WWW_AUTHENTICATE],
            "Basic realm=\"docs\""
        );
    }

    #[test]
    fn test_method_not_allowed_lists_allowed() {
        let response = FrontendError::MethodNotAllowed(Method::POST).into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "GET, HEAD");
    }
}
