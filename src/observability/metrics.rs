//! Metrics collection and exposition.
//!
//! # Metrics
//! - `edge_requests_total` (counter): requests by method, status, branch
//! - `edge_request_duration_seconds` (histogram): latency by method, branch
//! - `edge_upstream_errors_total` (counter): failed forwards by error kind
//!
//! Recording is a no-op until a recorder is installed, so handlers record
//! unconditionally and only the exporter depends on config.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one finished request.
pub fn record_request(method: &str, status: u16, branch: &'static str, start: Instant) {
    counter!(
        "edge_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "branch" => branch
    )
    .increment(1);
    histogram!(
        "edge_request_duration_seconds",
        "method" => method.to_string(),
        "branch" => branch
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record a failed forward.
pub fn record_upstream_error(kind: &'static str) {
    counter!("edge_upstream_errors_total", "kind" => kind).increment(1);
}
