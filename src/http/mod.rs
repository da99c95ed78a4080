//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, middleware stack, listeners)
//!     → security::https (redirect plain requests, HSTS on TLS)
//!     → compression.rs (Accept-Encoding negotiation)
//!     → handlers.rs (dispatch)
//!         → request.rs (RequestContext: route, transport, auth verdict)
//!         → route.rs (List | Doc | Favicon | Discovery | NotFound)
//!         → response.rs (HTML pages) / vanity.rs (go-import tag)
//!     → Send to client
//! ```

pub mod compression;
pub mod handlers;
pub mod request;
pub mod response;
pub mod route;
pub mod server;
pub mod vanity;

pub use handlers::AppState;
pub use request::{RequestContext, X_REQUEST_ID};
pub use route::Route;
pub use server::{serve, HttpServer, ServeError};
pub use vanity::VanityImport;
