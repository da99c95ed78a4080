//! Documentation frontend library.

pub mod config;
pub mod docs;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod security;

pub use config::FrontendConfig;
pub use error::FrontendError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
