//! Metrics collection and exposition.
//!
//! # Metrics
//! - `vless_clients_created_total` (counter): clients appended
//! - `vless_clients_deleted_total` (counter): client records removed
//! - `vless_reload_total` (counter): reload attempts by result
//! - `vless_reload_duration_seconds` (histogram): reload command latency
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with an HTTP listener on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_client_created() {
    counter!("vless_clients_created_total").increment(1);
}

pub fn record_clients_deleted(count: usize) {
    counter!("vless_clients_deleted_total").increment(count as u64);
}

pub fn record_reload(success: bool, start: Instant) {
    let result = if success { "success" } else { "failure" };
    counter!("vless_reload_total", "result" => result).increment(1);
    histogram!("vless_reload_duration_seconds").record(start.elapsed().as_secs_f64());
}
