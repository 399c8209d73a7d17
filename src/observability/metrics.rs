//! # Metrics Collection
//!
//! Provides Prometheus metrics collection for the frontend API.

use crate::config::ObservabilityConfig;
use crate::errors::{LbApiError, Result};
use ::tracing::{info, warn};
use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Metrics recorder that tracks application metrics
#[derive(Debug, Clone, Default)]
pub struct MetricsRecorder;

impl MetricsRecorder {
    /// Create a new metrics recorder instance
    pub fn new() -> Self {
        Self
    }

    /// Record an HTTP request
    pub fn record_http_request(&self, method: &str, path: &str, status: u16, duration: f64) {
        let request_labels = [
            ("method", method.to_string()),
            ("path", path.to_string()),
            ("status", status.to_string()),
        ];
        counter!("http_requests_total", &request_labels).increment(1);

        let duration_labels = [("method", method.to_string()), ("path", path.to_string())];
        histogram!("http_request_duration_seconds", &duration_labels).record(duration);
    }

    /// Record a frontend read and how many rows it returned
    pub fn record_frontends_read(&self, matched: usize) {
        counter!("frontend_reads_total").increment(1);
        histogram!("frontend_read_rows").record(matched as f64);
    }

    /// Record a committed create batch
    pub fn record_frontends_created(&self, count: usize) {
        counter!("frontend_create_batches_total").increment(1);
        counter!("frontends_created_total").increment(count as u64);
    }

    /// Record a deleted frontend
    pub fn record_frontend_deleted(&self) {
        counter!("frontends_deleted_total").increment(1);
    }

    /// Record a request rejected before or by the store, labelled by error kind
    pub fn record_rejection(&self, operation: &str, error: &LbApiError) {
        let labels = [
            ("operation", operation.to_string()),
            ("reason", rejection_reason(error).to_string()),
        ];
        counter!("frontend_rejections_total", &labels).increment(1);
    }

    /// Register metric descriptions so Prometheus exports appear before events occur.
    pub fn register_frontend_metrics(&self) {
        describe_counter!("http_requests_total", Unit::Count, "HTTP requests by route and status");
        describe_histogram!(
            "http_request_duration_seconds",
            Unit::Seconds,
            "HTTP request latency"
        );
        describe_counter!("frontend_reads_total", Unit::Count, "Frontend read operations");
        describe_histogram!("frontend_read_rows", Unit::Count, "Rows returned per frontend read");
        describe_counter!(
            "frontend_create_batches_total",
            Unit::Count,
            "Committed frontend create batches"
        );
        describe_counter!("frontends_created_total", Unit::Count, "Frontends created");
        describe_counter!("frontends_deleted_total", Unit::Count, "Frontends deleted");
        describe_counter!(
            "frontend_rejections_total",
            Unit::Count,
            "Frontend requests rejected, grouped by reason"
        );
    }
}

fn rejection_reason(error: &LbApiError) -> &'static str {
    match error {
        LbApiError::InvalidTenant { .. } => "invalid_tenant",
        LbApiError::InvalidIdentifier { .. } => "invalid_identifier",
        LbApiError::InvalidParameter { .. } => "invalid_parameter",
        LbApiError::Validation { .. } => "validation",
        LbApiError::EmptyPayload => "empty_payload",
        LbApiError::NotFound { .. } => "not_found",
        LbApiError::Ambiguous { .. } => "ambiguous",
        LbApiError::Database { .. } => "store_failure",
        _ => "internal",
    }
}

/// Install the Prometheus exporter when metrics are enabled
pub async fn init_metrics(config: &ObservabilityConfig) -> Result<()> {
    if !config.enable_metrics {
        return Ok(());
    }

    let metrics_addr = match config.metrics_bind_address() {
        Some(addr) => addr,
        None => {
            warn!("Metrics disabled: no bind address configured");
            return Ok(());
        }
    };

    let socket_addr: SocketAddr = metrics_addr.parse().map_err(|e| {
        LbApiError::config(format!("Invalid metrics bind address '{}': {}", metrics_addr, e))
    })?;

    PrometheusBuilder::new()
        .with_http_listener(socket_addr)
        .add_global_label("service", &config.service_name)
        .install()
        .map_err(|e| LbApiError::config(format!("Failed to initialize metrics exporter: {}", e)))?;

    MetricsRecorder::new().register_frontend_metrics();

    info!(
        metrics_addr = %metrics_addr,
        service_name = %config.service_name,
        "Prometheus metrics exporter initialized"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_recorder_without_exporter() {
        // Recording without an installed recorder is a no-op.
        let recorder = MetricsRecorder::new();
        recorder.record_http_request("GET", "/v1/tenant/{tenant_id}/frontends", 200, 0.01);
        recorder.record_frontends_read(3);
        recorder.record_frontends_created(2);
        recorder.record_frontend_deleted();
        recorder.record_rejection("delete", &LbApiError::ambiguous("frontend", 2));
        recorder.register_frontend_metrics();
    }

    #[test]
    fn test_rejection_reasons() {
        assert_eq!(rejection_reason(&LbApiError::EmptyPayload), "empty_payload");
        assert_eq!(rejection_reason(&LbApiError::invalid_tenant("missing")), "invalid_tenant");
        assert_eq!(rejection_reason(&LbApiError::internal("boom")), "internal");
    }

    #[tokio::test]
    async fn test_init_metrics_disabled() {
        let config = ObservabilityConfig { enable_metrics: false, ..Default::default() };
        assert!(init_metrics(&config).await.is_ok());
    }
}
