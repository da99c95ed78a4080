//! Request dispatch.
//!
//! A single fallback handler resolves the route, applies the authorization
//! gate and produces the response. Errors become responses through
//! `FrontendError`'s `IntoResponse` impl.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    response::{Html, IntoResponse, Response},
};

use crate::docs::ContentResolver;
use crate::error::FrontendError;
use crate::http::request::RequestContext;
use crate::http::response::{document_page, listing_page};
use crate::http::route::Route;
use crate::http::vanity::VanityImport;
use crate::observability::metrics;
use crate::security::Authorizer;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<ContentResolver>,
    pub authorizer: Arc<dyn Authorizer>,
    pub vanity: Arc<VanityImport>,
}

/// Fallback handler for every path.
pub async fn dispatch(State(state): State<AppState>, request: Request) -> Response {
    let start = Instant::now();
    let ctx = RequestContext::from_request(&request, state.authorizer.as_ref());

    tracing::debug!(
        request_id = %ctx.request_id,
        method = %request.method(),
        path = %ctx.path,
        route = ctx.route.label(),
        scheme = ctx.transport.scheme(),
        accept_encoding = ctx.accept_encoding.as_deref().unwrap_or(""),
        "Dispatching request"
    );

    let response = match handle(&state, &ctx, request.method()) {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!(request_id = %ctx.request_id, error = %e, "Request rejected");
            e.into_response()
        }
    };

    metrics::record_request(ctx.route.label(), response.status().as_u16(), start);
    response
}

fn handle(state: &AppState, ctx: &RequestContext, method: &Method) -> Result<Response, FrontendError> {
    if method != Method::GET && method != Method::HEAD {
        return Err(FrontendError::MethodNotAllowed(method.clone()));
    }

    if !ctx.authorized {
        tracing::warn!(request_id = %ctx.request_id, path = %ctx.path, "Missing or invalid credentials");
        metrics::record_unauthorized(ctx.route.label());
        return Err(FrontendError::Unauthorized {
            realm: Arc::from(state.authorizer.realm()),
        });
    }

    match &ctx.route {
        Route::List => Ok(list(state)),
        Route::Doc(name) => doc(state, name),
        Route::Discovery => Ok(discovery(state)),
        Route::Favicon | Route::NotFound => Err(FrontendError::NotFound(ctx.path.clone())),
    }
}

fn list(state: &AppState) -> Response {
    Html(listing_page(&state.resolver.list())).into_response()
}

fn doc(state: &AppState, name: &str) -> Result<Response, FrontendError> {
    let doc = state.resolver.get(name)?;
    Ok(Html(document_page(&doc)).into_response())
}

fn discovery(state: &AppState) -> Response {
    (
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/html; charset=utf-8"),
        )],
        state.vanity.body(),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::{MarkdownRenderer, MemorySource, RawDocument};
    use crate::security::{AllowAll, StaticCredentials};
    use axum::{
        body::Body,
        http::{self, StatusCode},
        Router,
    };
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use tower::ServiceExt;

    fn state(authorizer: Arc<dyn Authorizer>) -> AppState {
        let source = MemorySource::new(vec![
            RawDocument::new("test.md", "# Test\n\nHello.\n"),
            RawDocument::new("other.md", "# Other\n"),
        ]);
        AppState {
            resolver: Arc::new(
                ContentResolver::load(Arc::new(source), Arc::new(MarkdownRenderer::new())).unwrap(),
            ),
            authorizer,
            vanity: Arc::new(VanityImport::new("upspin.io", "https://upspin.googlesource.com/upspin")),
        }
    }

    fn app(authorizer: Arc<dyn Authorizer>) -> Router {
        Router::new().fallback(dispatch).with_state(state(authorizer))
    }

    fn get(uri: &str) -> http::request::Builder {
        http::Request::builder().uri(uri)
    }

    async fn send(app: Router, request: http::Request<Body>) -> (StatusCode, http::HeaderMap, String) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, headers, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_listing() {
        let (status, headers, body) =
            send(app(Arc::new(AllowAll)), get("/").body(Body::empty()).unwrap()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "text/html; charset=utf-8");
        assert!(body.contains(r#"<a href="/doc/test.md">test.md</a>"#));
        assert!(body.contains(r#"<a href="/doc/other.md">other.md</a>"#));
        assert!(body.find("other.md").unwrap() < body.find("test.md").unwrap());
    }

    #[tokio::test]
    async fn test_doc_and_missing_doc() {
        let (status, _, body) = send(
            app(Arc::new(AllowAll)),
            get("/doc/test.md").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h1>Test</h1>"));

        let (status, _, body) = send(
            app(Arc::new(AllowAll)),
            get("/doc/notfounddoc").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, crate::error::NOT_FOUND_BODY);
    }

    #[tokio::test]
    async fn test_discovery_body() {
        let (status, headers, body) = send(
            app(Arc::new(AllowAll)),
            get("/?go-get=1").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(headers[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        assert_eq!(
            body.trim(),
            r#"<meta name="go-import" content="upspin.io git https://upspin.googlesource.com/upspin">"#
        );
    }

    #[tokio::test]
    async fn test_favicon_and_unknown_paths() {
        for uri in ["/favicon.ico", "/nope", "/doc/"] {
            let (status, _, _) =
                send(app(Arc::new(AllowAll)), get(uri).body(Body::empty()).unwrap()).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_credentials_gate_content_only() {
        let auth: Arc<dyn Authorizer> = Arc::new(StaticCredentials::new("reader", "secret", "upspin"));

        let (status, headers, _) =
            send(app(auth.clone()), get("/").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(headers[header::WWW_AUTHENTICATE], "Basic realm=\"upspin\"");

        let (status, _, _) =
            send(app(auth.clone()), get("/?go-get=1").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _, _) =
            send(app(auth.clone()), get("/favicon.ico").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let basic = format!("Basic {}", STANDARD.encode("reader:secret"));
        let (status, _, _) = send(
            app(auth.clone()),
            get("/favicon.ico")
                .header(header::AUTHORIZATION, basic.as_str())
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _, body) = send(
            app(auth),
            get("/doc/test.md")
                .header(header::AUTHORIZATION, basic.as_str())
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h1>Test</h1>"));
    }

    #[tokio::test]
    async fn test_only_get_and_head() {
        let (status, headers, _) = send(
            app(Arc::new(AllowAll)),
            http::Request::builder()
                .method(Method::POST)
                .uri("/")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(headers[header::ALLOW], "GET, HEAD");

        let (status, _, _) = send(
            app(Arc::new(AllowAll)),
            http::Request::builder()
                .method(Method::HEAD)
                .uri("/doc/test.md")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
}
