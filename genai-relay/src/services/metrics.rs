//! Prometheus metrics for genai-relay.

use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::OnceLock;

static METRICS: OnceLock<RelayMetrics> = OnceLock::new();

struct RelayMetrics {
    registry: Registry,
    requests_total: IntCounterVec,
    provider_latency_seconds: HistogramVec,
    provider_errors_total: IntCounterVec,
    tokens_total: IntCounterVec,
}

impl RelayMetrics {
    fn build() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let requests_total = IntCounterVec::new(
            Opts::new("genai_requests_total", "Total relay requests by route and outcome"),
            &["route", "status"],
        )?;

        let provider_latency_seconds = HistogramVec::new(
            HistogramOpts::new(
                "genai_provider_latency_seconds",
                "Generative model API latency in seconds",
            )
            .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0, 120.0]),
            &["model"],
        )?;

        let provider_errors_total = IntCounterVec::new(
            Opts::new("genai_provider_errors_total", "Total generative model errors"),
            &["error_type"],
        )?;

        // type: input, output
        let tokens_total = IntCounterVec::new(
            Opts::new("genai_tokens_total", "Total tokens processed"),
            &["model", "type"],
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(provider_latency_seconds.clone()))?;
        registry.register(Box::new(provider_errors_total.clone()))?;
        registry.register(Box::new(tokens_total.clone()))?;

        Ok(Self {
            registry,
            requests_total,
            provider_latency_seconds,
            provider_errors_total,
            tokens_total,
        })
    }
}

/// Initialize the registry. Safe to call more than once; later calls are no-ops.
pub fn init_metrics() -> prometheus::Result<()> {
    if METRICS.get().is_some() {
        return Ok(());
    }

    let metrics = RelayMetrics::build()?;
    if METRICS.set(metrics).is_ok() {
        tracing::info!("Prometheus metrics initialized");
    }
    Ok(())
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let Some(metrics) = METRICS.get() else {
        tracing::error!("Metrics registry not initialized");
        return "# Metrics registry not initialized\n".to_string();
    };

    let mut buffer = Vec::new();
    if let Err(e) = TextEncoder::new().encode(&metrics.registry.gather(), &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return format!("# Failed to encode metrics: {}\n", e);
    }

    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Failed to convert metrics to UTF-8");
            format!("# Failed to convert metrics to UTF-8: {}\n", e)
        }
    }
}

/// Record a finished relay request.
pub fn record_request(route: &str, status: &str) {
    if let Some(metrics) = METRICS.get() {
        metrics.requests_total.with_label_values(&[route, status]).inc();
    }
}

/// Record provider latency.
pub fn record_provider_latency(model: &str, duration_secs: f64) {
    if let Some(metrics) = METRICS.get() {
        metrics
            .provider_latency_seconds
            .with_label_values(&[model])
            .observe(duration_secs);
    }
}

/// Record a provider error.
pub fn record_provider_error(error_type: &str) {
    if let Some(metrics) = METRICS.get() {
        metrics
            .provider_errors_total
            .with_label_values(&[error_type])
            .inc();
    }
}

/// Record token usage reported by the provider.
pub fn record_tokens(model: &str, input_tokens: u64, output_tokens: u64) {
    if let Some(metrics) = METRICS.get() {
        metrics
            .tokens_total
            .with_label_values(&[model, "input"])
            .inc_by(input_tokens);
        metrics
            .tokens_total
            .with_label_values(&[model, "output"])
            .inc_by(output_tokens);
    }
}
