//! Documentation frontend (v1)
//!
//! Serves a Markdown documentation corpus and go-import metadata behind
//! forced HTTPS, HSTS, Basic authentication and response compression.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌───────────────────────────────────────────────────────┐
//!                         │                    DOCS FRONTEND                       │
//!                         │                                                        │
//!   Client Request        │  ┌──────────┐   ┌──────────┐   ┌─────────────┐        │
//!   ──────────────────────┼─▶│   net    │──▶│ security │──▶│ compression │        │
//!    http:// or https://  │  │ plain/TLS│   │ 307/HSTS │   │ gzip/br/... │        │
//!                         │  └──────────┘   └──────────┘   └──────┬──────┘        │
//!                         │                                       │               │
//!                         │                                       ▼               │
//!                         │                               ┌──────────────┐        │
//!                         │                               │  dispatcher  │        │
//!                         │                               │ route + auth │        │
//!                         │                               └──┬────────┬──┘        │
//!                         │                                  │        │           │
//!                         │                                  ▼        ▼           │
//!   Client Response       │                          ┌──────────┐ ┌────────┐      │
//!   ◀─────────────────────┼──────────────────────────│   docs   │ │ vanity │      │
//!                         │                          │ resolver │ │go-import│     │
//!                         │                          └──────────┘ └────────┘      │
//!                         └───────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use docs_frontend::config::{self, ConfigError, FrontendConfig};
use docs_frontend::lifecycle::startup;
use docs_frontend::observability::logging;

#[derive(Parser)]
#[command(name = "docs-frontend")]
#[command(about = "HTTPS documentation frontend with go-import discovery", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory of Markdown documents (overrides `docs.path`).
    #[arg(long)]
    docs: Option<String>,

    /// Host[:port] plain requests are redirected to (overrides `security.https_host`).
    #[arg(long)]
    https_host: Option<String>,

    /// Log level or filter directive (overrides `observability.log_level`).
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn load(&self) -> Result<FrontendConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => config::load_config(path)?,
            None => FrontendConfig::default(),
        };

        if let Some(docs) = &self.docs {
            config.docs.path = docs.clone();
        }
        if let Some(host) = &self.https_host {
            config.security.https_host = host.clone();
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }

        config::validation::validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.load()?;

    logging::init_logging(&config.observability)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "docs-frontend starting");
    tracing::info!(
        http_address = %config.listener.http_address,
        https_address = %config.listener.https_address,
        tls = config.listener.tls.is_some(),
        https_host = %config.security.https_host,
        docs = %config.docs.path,
        "Configuration loaded"
    );

    if let Err(e) = startup::run(config).await {
        tracing::error!(error = %e, "Fatal error");
        return Err(e);
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
