//! Metrics recording implementation using Prometheus.

use prometheus::{
    register_counter_vec_with_registry, register_histogram_vec_with_registry, CounterVec,
    Encoder, HistogramVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;
use tracing::error;

/// Trait for recording application metrics.
pub trait MetricsRecorder: Clone + Send + Sync + 'static {
    /// Records the outcome of a gate decision for a route access class.
    fn record_gate_decision(&self, access: &str, outcome: &str);

    /// Records a session resolution attempt with its result.
    fn record_session_resolution(&self, provider_name: &str, result: &str);

    /// Records how long a session resolution took.
    fn record_session_duration(&self, provider_name: &str, duration_secs: f64);
}

/// Prometheus metrics collector.
#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,

    gate_decisions_total: CounterVec,

    session_resolutions_total: CounterVec,
    session_resolution_duration_seconds: HistogramVec,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Creates a new metrics instance with its own Prometheus registry.
    pub fn new() -> Self {
        let registry = Arc::new(Registry::new());

        let gate_decisions_total = register_counter_vec_with_registry!(
            Opts::new(
                "gate_decisions_total",
                "Total route gate decisions by access class and outcome"
            ),
            &["access", "outcome"],
            registry.clone()
        )
        .expect("Failed to register gate_decisions_total");

        let session_resolutions_total = register_counter_vec_with_registry!(
            Opts::new(
                "session_resolutions_total",
                "Total session resolutions per provider"
            ),
            &["provider", "result"],
            registry.clone()
        )
        .expect("Failed to register session_resolutions_total");

        let session_resolution_duration_seconds = register_histogram_vec_with_registry!(
            "session_resolution_duration_seconds",
            "Session resolution duration in seconds",
            &["provider"],
            vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0],
            registry.clone()
        )
        .expect("Failed to register session_resolution_duration_seconds");

        Metrics {
            registry,
            gate_decisions_total,
            session_resolutions_total,
            session_resolution_duration_seconds,
        }
    }

    /// Renders all metrics in Prometheus text format.
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
            error!("Failed to encode metrics: {}", e);
            return String::new();
        }
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

impl MetricsRecorder for Metrics {
    fn record_gate_decision(&self, access: &str, outcome: &str) {
        self.gate_decisions_total
            .with_label_values(&[access, outcome])
            .inc();
    }

    fn record_session_resolution(&self, provider_name: &str, result: &str) {
        self.session_resolutions_total
            .with_label_values(&[provider_name, result])
            .inc();
    }

    fn record_session_duration(&self, provider_name: &str, duration_secs: f64) {
        self.session_resolution_duration_seconds
            .with_label_values(&[provider_name])
            .observe(duration_secs);
    }
}
