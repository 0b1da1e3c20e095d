//! Prometheus export for the `metrics` facade.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use tracker_core::error::AppError;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the global Prometheus recorder. Call once at startup.
pub fn init_metrics() -> Result<(), AppError> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| AppError::InternalError(anyhow::anyhow!("Prometheus recorder: {}", e)))?;

    METRICS_HANDLE
        .set(handle)
        .map_err(|_| AppError::InternalError(anyhow::anyhow!("metrics already initialized")))
}

/// Current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized".to_string())
}
