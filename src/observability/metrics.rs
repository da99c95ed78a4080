//! Metrics collection and exposition.
//!
//! # Metrics
//! - `frontend_requests_total` (counter): requests by route, status
//! - `frontend_request_duration_seconds` (histogram): latency by route
//! - `frontend_redirects_total` (counter): plain HTTP requests sent to HTTPS
//! - `frontend_unauthorized_total` (counter): rejected credential checks
//! - `frontend_documents` (gauge): documents in the current index

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_request(route: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "frontend_requests_total",
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("frontend_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_redirect() {
    metrics::counter!("frontend_redirects_total").increment(1);
}

pub fn record_unauthorized(route: &'static str) {
    metrics::counter!("frontend_unauthorized_total", "route" => route).increment(1);
}

pub fn record_documents(count: usize) {
    metrics::gauge!("frontend_documents").set(count as f64);
}
