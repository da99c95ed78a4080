//! Startup orchestration.
//!
//! Order: metrics → document index → optional watcher → server. Any failure
//! before the listeners bind is fatal; nothing is served from a half-built
//! process.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use crate::config::FrontendConfig;
use crate::docs::{ContentResolver, DirectorySource, DocsWatcher, MarkdownRenderer};
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;

/// Build every subsystem from `config` and serve until a shutdown signal.
pub async fn run(config: FrontendConfig) -> Result<(), Box<dyn std::error::Error>> {
    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let resolver = Arc::new(ContentResolver::load(
        Arc::new(DirectorySource::new(&config.docs.path)),
        Arc::new(MarkdownRenderer::new()),
    )?);

    // Dropping the watcher stops it.
    let _watcher = if config.docs.watch {
        Some(DocsWatcher::new(Path::new(&config.docs.path), Arc::clone(&resolver)).run()?)
    } else {
        None
    };

    let server = HttpServer::new(config, resolver)?;

    let shutdown = Shutdown::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        trigger.trigger();
    });

    server.run(&shutdown).await?;
    Ok(())
}
