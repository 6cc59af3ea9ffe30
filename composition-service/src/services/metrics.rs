//! Metrics collection and Prometheus export.
//!
//! Initializes the metrics exporter and provides the /metrics endpoint handler.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use service_core::error::AppError;
use std::sync::OnceLock;
use std::time::Duration;

/// Global handle to the Prometheus recorder.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// How a composition request ended, used as the `outcome` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Generated,
    Unconfigured,
    Failed,
}

impl Outcome {
    fn as_label(self) -> &'static str {
        match self {
            Outcome::Generated => "generated",
            Outcome::Unconfigured => "unconfigured",
            Outcome::Failed => "failed",
        }
    }
}

/// Install the Prometheus recorder. Call once at startup.
pub fn init_metrics() -> Result<(), AppError> {
    let handle = PrometheusBuilder::new().install_recorder().map_err(|e| {
        AppError::InternalError(anyhow::anyhow!("failed to install Prometheus recorder: {}", e))
    })?;

    METRICS_HANDLE.set(handle).map_err(|_| {
        AppError::InternalError(anyhow::anyhow!("metrics handle already initialized"))
    })
}

/// Current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized".to_string())
}

pub fn record_composition(outcome: Outcome) {
    counter!("composition_requests_total", "outcome" => outcome.as_label()).increment(1);
}

pub fn record_provider_latency(provider: &'static str, model: &str, elapsed: Duration) {
    histogram!(
        "composition_provider_latency_seconds",
        "provider" => provider,
        "model" => model.to_string()
    )
    .record(elapsed.as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_without_recorder_is_a_comment() {
        if METRICS_HANDLE.get().is_none() {
            assert!(get_metrics().starts_with('#'));
        }
    }

    #[test]
    fn outcome_labels_are_stable() {
        assert_eq!(Outcome::Generated.as_label(), "generated");
        assert_eq!(Outcome::Unconfigured.as_label(), "unconfigured");
        assert_eq!(Outcome::Failed.as_label(), "failed");
    }
}
