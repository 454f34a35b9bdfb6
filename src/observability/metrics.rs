//! Metrics collection and exposition.
//!
//! # Metrics
//! - `signing_proxy_requests_total` (counter): requests by route, method, status
//! - `signing_proxy_request_duration_seconds` (histogram): latency by route
//! - `signing_proxy_upstream_errors_total` (counter): failures by upstream, kind
//! - `signing_proxy_config_reloads_total` (counter): reloads by result

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder};

pub const REQUESTS_TOTAL: &str = "signing_proxy_requests_total";
pub const REQUEST_DURATION: &str = "signing_proxy_request_duration_seconds";
pub const UPSTREAM_ERRORS_TOTAL: &str = "signing_proxy_upstream_errors_total";
pub const CONFIG_RELOADS_TOTAL: &str = "signing_proxy_config_reloads_total";

/// Upstream calls are remote HTTPS round trips; buckets start at 10ms.
const DURATION_BUCKETS: &[f64] = &[0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0];

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .set_buckets_for_metric(Matcher::Full(REQUEST_DURATION.to_string()), DURATION_BUCKETS)?
        .install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_request(route: &str, method: &str, status: u16, start: Instant) {
    metrics::counter!(
        REQUESTS_TOTAL,
        "route" => route.to_string(),
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(REQUEST_DURATION, "route" => route.to_string())
        .record(start.elapsed().as_secs_f64());
}

pub fn record_upstream_error(upstream: &str, kind: &'static str) {
    metrics::counter!(UPSTREAM_ERRORS_TOTAL, "upstream" => upstream.to_string(), "kind" => kind)
        .increment(1);
}

pub fn record_config_reload(success: bool) {
    let result = if success { "success" } else { "failure" };
    metrics::counter!(CONFIG_RELOADS_TOTAL, "result" => result).increment(1);
}
