//! Prometheus metrics for request tracking.
//!
//! This module provides metrics for:
//! - HTTP request count and latency per matched route
//! - Validation failures per collection
//! - Records written per collection

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::debug;

use crate::store::Collection;

// === Metric Name Constants ===

/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// HTTP requests counter metric name.
pub const METRIC_HTTP_REQUESTS: &str = "http_requests_total";
/// Validation failures counter metric name.
pub const METRIC_VALIDATION_FAILURES: &str = "validation_failures_total";
/// Records written counter metric name.
pub const METRIC_RECORDS_WRITTEN: &str = "records_written_total";

/// Initialize all metric descriptions.
/// Call this once at startup, after the recorder is installed.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );
    describe_counter!(METRIC_HTTP_REQUESTS, "Total number of HTTP requests served");
    describe_counter!(
        METRIC_VALIDATION_FAILURES,
        "Total number of requests rejected by input validation"
    );
    describe_counter!(
        METRIC_RECORDS_WRITTEN,
        "Total number of records inserted or updated"
    );

    debug!("Metrics initialized");
}

/// Install the global Prometheus recorder and return a handle for rendering.
pub fn install_exporter() -> Result<PrometheusHandle, metrics_exporter_prometheus::BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Record HTTP request latency.
pub fn record_http_latency(start: Instant, method: &str, endpoint: &str, status: u16) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "method" => method.to_string(),
        "endpoint" => endpoint.to_string()
    )
    .record(latency_ms);
    counter!(
        METRIC_HTTP_REQUESTS,
        "method" => method.to_string(),
        "endpoint" => endpoint.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Increment validation failures counter.
pub fn inc_validation_failures(collection: Collection) {
    counter!(METRIC_VALIDATION_FAILURES, "collection" => collection.to_string()).increment(1);
}

/// Increment records written counter.
pub fn inc_records_written(collection: Collection) {
    counter!(METRIC_RECORDS_WRITTEN, "collection" => collection.to_string()).increment(1);
}

/// Middleware timing every request against its matched route.
///
/// Unmatched requests are labelled `unmatched` to keep label cardinality bounded.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;
    record_http_latency(start, &method, &endpoint, response.status().as_u16());
    response
}
