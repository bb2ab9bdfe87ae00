//! Metrics collection and exposition.
//!
//! # Metrics
//! - `qr_requests_total` (counter): requests by method, route, status
//! - `qr_request_duration_seconds` (histogram): latency by route
//! - `qr_encode_failures_total` (counter): encoder failures by level

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::qr::RecoveryLevel;
use crate::routing::Route;

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;

    ::metrics::describe_counter!("qr_requests_total", "Requests handled");
    ::metrics::describe_histogram!(
        "qr_request_duration_seconds",
        ::metrics::Unit::Seconds,
        "Request latency"
    );
    ::metrics::describe_counter!("qr_encode_failures_total", "Payloads the encoder rejected");

    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a completed request.
pub fn record_request(method: &str, route: &'static str, status: u16, start: Instant) {
    ::metrics::counter!(
        "qr_requests_total",
        "method" => method.to_string(),
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!("qr_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// Record a payload the encoder could not turn into an image.
pub fn record_encode_failure(level: RecoveryLevel) {
    ::metrics::counter!("qr_encode_failures_total", "level" => level.code()).increment(1);
}

/// Route-layer middleware timing every matched request.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .and_then(|path| Route::from_path(path.as_str()))
        .map_or("unknown", Route::name);

    let response = next.run(request).await;
    record_request(method.as_str(), route, response.status().as_u16(), start);
    response
}
