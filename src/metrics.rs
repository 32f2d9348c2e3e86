//! Prometheus metrics for store activity and request latency.
//!
//! Recording is a no-op until a recorder is installed; the binary installs
//! the Prometheus recorder at startup and the router renders it at `/metrics`.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

use crate::error::ErrorKind;

// === Metric Name Constants ===

/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// Applications created counter metric name.
pub const METRIC_APPLICATIONS_CREATED: &str = "applications_created_total";
/// Applications updated counter metric name.
pub const METRIC_APPLICATIONS_UPDATED: &str = "applications_updated_total";
/// Applications deleted counter metric name.
pub const METRIC_APPLICATIONS_DELETED: &str = "applications_deleted_total";
/// Rejected requests counter metric name.
pub const METRIC_REQUESTS_REJECTED: &str = "requests_rejected_total";

/// Initialize all metric descriptions.
/// Call this once at startup, after installing a recorder.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );

    describe_counter!(
        METRIC_APPLICATIONS_CREATED,
        "Total number of applications created"
    );
    describe_counter!(
        METRIC_APPLICATIONS_UPDATED,
        "Total number of applications updated"
    );
    describe_counter!(
        METRIC_APPLICATIONS_DELETED,
        "Total number of applications deleted"
    );
    describe_counter!(
        METRIC_REQUESTS_REJECTED,
        "Total number of requests rejected, by error kind"
    );

    debug!("Metrics initialized");
}

/// Install the global Prometheus recorder and describe all metrics.
pub fn install_prometheus() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Increment applications created counter.
pub fn inc_applications_created() {
    counter!(METRIC_APPLICATIONS_CREATED).increment(1);
}

/// Increment applications updated counter.
pub fn inc_applications_updated() {
    counter!(METRIC_APPLICATIONS_UPDATED).increment(1);
}

/// Increment applications deleted counter.
pub fn inc_applications_deleted() {
    counter!(METRIC_APPLICATIONS_DELETED).increment(1);
}

/// Increment rejected requests counter.
pub fn inc_requests_rejected(kind: ErrorKind) {
    counter!(METRIC_REQUESTS_REJECTED, "kind" => kind.to_string()).increment(1);
}

/// RAII guard for timing a request.
/// Records latency for its endpoint when dropped.
pub struct LatencyTimer {
    start: Instant,
    endpoint: &'static str,
}

impl LatencyTimer {
    /// Start timing the given endpoint.
    pub fn new(endpoint: &'static str) -> Self {
        Self {
            start: Instant::now(),
            endpoint,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        let latency_ms = self.elapsed_ms();
        debug!(endpoint = self.endpoint, latency_ms, "Request handled");
        histogram!(METRIC_HTTP_REQUEST_LATENCY, "endpoint" => self.endpoint).record(latency_ms);
    }
}
