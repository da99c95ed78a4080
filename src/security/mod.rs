//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → https.rs (plain → 307 to HTTPS; TLS → HSTS on the way out)
//!     → [compression, dispatch]
//!     → auth.rs (Basic credentials, checked by the dispatcher for
//!       content-bearing routes only)
//! ```
//!
//! # Design Decisions
//! - Transport policy is decided before any credential check
//! - Redirect host comes from configuration, never from the request
//! - Credentials compared in constant time

pub mod auth;
pub mod https;

pub use auth::{AllowAll, Authorizer, Credentials, StaticCredentials};
pub use https::{enforce_https, PolicyError, SecurityPolicy, Transport};
