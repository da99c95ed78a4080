//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Plain TCP connection (http_address)
//!     → axum::serve, requests tagged Transport::Plain
//!
//! TLS connection (https_address)
//!     → tls.rs (rustls config from PEM files)
//!     → axum_server::bind_rustls, requests tagged Transport::Tls
//! ```
//!
//! # Design Decisions
//! - TLS is optional; without it only the plain listener runs
//! - Certificates are loaded once at startup

pub mod tls;
