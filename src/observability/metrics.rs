//! Metrics collection and exposition.
//!
//! # Metrics
//! - `prober_attempts_total` (counter): attempts by result (`success` or error kind)
//! - `prober_attempt_latency_seconds` (histogram): latency of successful attempts
//! - `prober_endpoints_total` (counter): endpoints by final outcome
//!
//! # Design Decisions
//! - Recording is a no-op unless a recorder is installed
//! - The prober is one-shot, so there is no scrape endpoint: the Prometheus
//!   text snapshot is written to a file at the end of the run

use std::path::Path;
use std::time::Duration;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::error::{ProberError, ProberResult};

/// Install the Prometheus recorder and describe the prober's metrics.
pub fn install_recorder() -> ProberResult<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ProberError::Metrics(e.to_string()))?;

    metrics::describe_counter!("prober_attempts_total", "Probe attempts by result");
    metrics::describe_histogram!(
        "prober_attempt_latency_seconds",
        "Latency of successful probe attempts"
    );
    metrics::describe_counter!("prober_endpoints_total", "Endpoints by final outcome");

    Ok(handle)
}

/// Write the current Prometheus text exposition to `path`.
pub async fn write_snapshot(handle: &PrometheusHandle, path: &Path) -> ProberResult<()> {
    tokio::fs::write(path, handle.render())
        .await
        .map_err(|e| ProberError::io(path, e))
}

pub fn record_attempt(result: &'static str) {
    metrics::counter!("prober_attempts_total", "result" => result).increment(1);
}

pub fn record_latency(latency: Duration) {
    metrics::histogram!("prober_attempt_latency_seconds").record(latency.as_secs_f64());
}

pub fn record_endpoint(success: bool) {
    let outcome = if success { "success" } else { "failure" };
    metrics::counter!("prober_endpoints_total", "outcome" => outcome).increment(1);
}
