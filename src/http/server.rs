//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the dispatcher
//! - Wire up middleware (request ID, tracing, HTTPS policy, timeout, compression)
//! - Bind the plain listener and, when configured, the TLS listener
//! - Stop both listeners on shutdown

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::{extract::Request, middleware, Extension, Router};
use axum_server::tls_rustls::RustlsConfig;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info_span;

use crate::config::FrontendConfig;
use crate::docs::ContentResolver;
use crate::http::compression::compression_layer;
use crate::http::handlers::{dispatch, AppState};
use crate::http::request::request_id;
use crate::http::vanity::VanityImport;
use crate::lifecycle::Shutdown;
use crate::net::tls::load_tls_config;
use crate::security::{
    enforce_https, AllowAll, Authorizer, PolicyError, SecurityPolicy, StaticCredentials, Transport,
};

/// Errors that stop the server.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("invalid security policy: {0}")]
    Policy(#[from] PolicyError),

    #[error("invalid bind address {0:?}")]
    Address(String),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load TLS configuration: {0}")]
    Tls(#[source] std::io::Error),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP server for the documentation frontend.
pub struct HttpServer {
    config: FrontendConfig,
    policy: Arc<SecurityPolicy>,
    state: AppState,
}

impl HttpServer {
    /// Create a new server. The authorizer is derived from `config.auth`.
    pub fn new(config: FrontendConfig, resolver: Arc<ContentResolver>) -> Result<Self, ServeError> {
        let authorizer: Arc<dyn Authorizer> = match &config.auth {
            Some(auth) => Arc::new(StaticCredentials::from_config(auth)),
            None => {
                tracing::warn!("No credentials configured, documentation is served openly");
                Arc::new(AllowAll)
            }
        };
        if !config.compression.any_enabled() {
            tracing::info!("Response compression disabled");
        }
        let policy = Arc::new(SecurityPolicy::from_config(&config.security)?);
        let state = AppState {
            resolver,
            authorizer,
            vanity: Arc::new(VanityImport::from_config(&config.vanity)),
        };

        Ok(Self {
            config,
            policy,
            state,
        })
    }

    /// Replace the authorizer derived from configuration.
    pub fn with_authorizer(mut self, authorizer: Arc<dyn Authorizer>) -> Self {
        self.state.authorizer = authorizer;
        self
    }

    /// Build the full middleware stack for requests arriving over `transport`.
    ///
    /// Layers run outermost first: transport marker, request ID, trace span,
    /// HTTPS policy, timeout, compression, dispatcher.
    #[allow(deprecated)]
    pub fn app(&self, transport: Transport) -> Router {
        Router::new()
            .fallback(dispatch)
            .with_state(self.state.clone())
            .layer(compression_layer(&self.config.compression))
            .layer(TimeoutLayer::new(Duration::from_secs(
                self.config.timeouts.request_secs,
            )))
            .layer(middleware::from_fn_with_state(
                Arc::clone(&self.policy),
                enforce_https,
            ))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
                info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                    request_id = request_id(request.headers()),
                )
            }))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(Extension(transport))
    }

    /// Run the plain listener and, if TLS is configured, the HTTPS listener,
    /// until `shutdown` fires.
    pub async fn run(self, shutdown: &Shutdown) -> Result<(), ServeError> {
        let listener = bind(&self.config.listener.http_address).await?;
        let plain = serve(listener, self.app(Transport::Plain), shutdown.subscribe());

        match &self.config.listener.tls {
            Some(tls) => {
                let rustls = load_tls_config(Path::new(&tls.cert_path), Path::new(&tls.key_path))
                    .await
                    .map_err(ServeError::Tls)?;
                let addr: SocketAddr = self
                    .config
                    .listener
                    .https_address
                    .parse()
                    .map_err(|_| ServeError::Address(self.config.listener.https_address.clone()))?;
                let grace = Duration::from_secs(self.config.listener.shutdown_grace_secs);
                let secure = serve_tls(
                    addr,
                    rustls,
                    self.app(Transport::Tls),
                    shutdown.subscribe(),
                    grace,
                );
                tokio::try_join!(plain, secure)?;
            }
            None => {
                if self.policy.force_https() {
                    tracing::warn!(
                        https_host = self.policy.https_host(),
                        "No TLS configured here; plain requests redirect to an external HTTPS endpoint"
                    );
                }
                plain.await?;
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &FrontendConfig {
        &self.config
    }

    pub fn policy(&self) -> &SecurityPolicy {
        &self.policy
    }
}

async fn bind(address: &str) -> Result<TcpListener, ServeError> {
    TcpListener::bind(address)
        .await
        .map_err(|source| ServeError::Bind {
            address: address.to_string(),
            source,
        })
}

/// Serve `app` on an already bound listener until `shutdown` fires.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<(), ServeError> {
    let addr = listener.local_addr()?;
    tracing::info!(address = %addr, "HTTP listener started");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
            tracing::info!(address = %addr, "Shutdown signal received");
        })
        .await?;
    Ok(())
}

async fn serve_tls(
    addr: SocketAddr,
    config: RustlsConfig,
    app: Router,
    mut shutdown: broadcast::Receiver<()>,
    grace: Duration,
) -> Result<(), ServeError> {
    let handle = axum_server::Handle::new();
    let signal = handle.clone();
    tokio::spawn(async move {
        let _ = shutdown.recv().await;
        signal.graceful_shutdown(Some(grace));
    });

    tracing::info!(address = %addr, "HTTPS listener started");
    axum_server::bind_rustls(addr, config)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}
