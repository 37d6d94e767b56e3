// src/metrics.rs
use axum::{routing::get, Router};
use metrics::{describe_counter, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

/// One-time metrics registration (so series show up on /metrics).
pub fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "engine_extractions_total",
            "Keyword extraction passes completed."
        );
        describe_counter!(
            "engine_extraction_timeouts_total",
            "Keyword extraction passes aborted on the caller's budget."
        );
        describe_counter!(
            "engine_extraction_rejects_total",
            "Bodies rejected as unprocessable (no terms after normalization)."
        );
        describe_counter!(
            "engine_interactions_applied_total",
            "Scored interactions merged into a user profile."
        );
        describe_counter!(
            "engine_interactions_ignored_total",
            "Interactions dropped as unrecognized kinds (weight 0)."
        );
        describe_counter!(
            "engine_recommendations_total",
            "Personalized recommendation requests served."
        );
        describe_counter!("engine_trending_total", "Trending requests served.");
    });
}

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Initialize the Prometheus recorder and expose a static gauge for the
    /// extraction budget.
    pub fn init(extraction_timeout_ms: u64) -> Self {
        let builder = PrometheusBuilder::new();

        let handle = builder
            .install_recorder()
            .expect("prometheus: install recorder");

        ensure_metrics_described();
        gauge!("engine_extraction_timeout_ms").set(extraction_timeout_ms as f64);

        Self { handle }
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}
