//! Structured logging.
//!
//! `RUST_LOG` takes precedence over the configured level so operators can
//! turn up verbosity without editing the config file.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, ObservabilityConfig};

/// Install the global tracing subscriber.
///
/// Returns an error if a subscriber is already installed.
pub fn init_logging(
    config: &ObservabilityConfig,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter(&config.log_level).into());

    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
    }
}

/// Expand a bare level into a filter scoped to this crate and tower-http.
fn default_filter(level: &str) -> String {
    if level.contains('=') || level.contains(',') {
        level.to_string()
    } else {
        format!("docs_frontend={level},tower_http={level}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_level_is_scoped() {
        assert_eq!(default_filter("debug"), "docs_frontend=debug,tower_http=debug");
    }

    #[test]
    fn test_directive_passes_through() {
        assert_eq!(default_filter("docs_frontend=trace"), "docs_frontend=trace");
        assert_eq!(default_filter("info,hyper=warn"), "info,hyper=warn");
    }
}
