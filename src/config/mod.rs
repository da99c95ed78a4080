//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → FrontendConfig (validated, immutable)
//!     → split into SecurityPolicy, VanityImport, Authorizer, ...
//!       and handed to the server at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::AuthConfig;
pub use schema::CompressionConfig;
pub use schema::CompressionLevel;
pub use schema::DocsConfig;
pub use schema::FrontendConfig;
pub use schema::ListenerConfig;
pub use schema::LogFormat;
pub use schema::ObservabilityConfig;
pub use schema::SecurityConfig;
pub use schema::TlsConfig;
pub use schema::VanityConfig;
