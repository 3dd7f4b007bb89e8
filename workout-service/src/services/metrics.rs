//! Prometheus metrics for workout-service.
//!
//! HTTP request metrics come from the `metrics` facade (see
//! `service_core::middleware::metrics`); plan generation metrics live in a
//! dedicated `prometheus` registry. Both are rendered by [`get_metrics`].

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub static WORKOUT_PLANS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static COMPLETION_TOKENS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static COMPLETION_LATENCY_SECONDS: OnceLock<HistogramVec> = OnceLock::new();

/// Outcome label for `workout_plans_total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanOutcome {
    Ok,
    ValidationError,
    RemoteError,
    ParseError,
}

impl PlanOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanOutcome::Ok => "ok",
            PlanOutcome::ValidationError => "validation_error",
            PlanOutcome::RemoteError => "remote_error",
            PlanOutcome::ParseError => "parse_error",
        }
    }
}

/// Initialize the recorder and all metrics. Call once at startup.
pub fn init_metrics() -> anyhow::Result<()> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install Prometheus recorder: {}", e))?;

    METRICS_HANDLE
        .set(handle)
        .map_err(|_| anyhow::anyhow!("Metrics handle already initialized"))?;

    let registry = Registry::new();

    let plans_total = IntCounterVec::new(
        Opts::new("workout_plans_total", "Workout plan requests by outcome"),
        &["outcome"],
    )?;

    // Token counter (input/output by model)
    let tokens_total = IntCounterVec::new(
        Opts::new("completion_tokens_total", "Tokens processed by the completion API"),
        &["model", "type"], // type: input, output
    )?;

    let latency = HistogramVec::new(
        HistogramOpts::new(
            "completion_latency_seconds",
            "Completion API latency in seconds",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0, 120.0]),
        &["model"],
    )?;

    registry.register(Box::new(plans_total.clone()))?;
    registry.register(Box::new(tokens_total.clone()))?;
    registry.register(Box::new(latency.clone()))?;

    let _ = REGISTRY.set(registry);
    let _ = WORKOUT_PLANS_TOTAL.set(plans_total);
    let _ = COMPLETION_TOKENS_TOTAL.set(tokens_total);
    let _ = COMPLETION_LATENCY_SECONDS.set(latency);

    tracing::info!("Prometheus metrics initialized");
    Ok(())
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let mut output = METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string());

    if let Some(registry) = REGISTRY.get() {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        if let Err(e) = encoder.encode(&registry.gather(), &mut buffer) {
            tracing::error!(error = %e, "Failed to encode metrics");
            return output;
        }
        match String::from_utf8(buffer) {
            Ok(custom) => output.push_str(&custom),
            Err(e) => tracing::error!(error = %e, "Failed to convert metrics to UTF-8"),
        }
    }

    output
}

// Helper functions for recording metrics

/// Record the outcome of a `POST /workout` request.
pub fn record_plan_outcome(outcome: PlanOutcome) {
    if let Some(counter) = WORKOUT_PLANS_TOTAL.get() {
        counter.with_label_values(&[outcome.as_str()]).inc();
    }
}

/// Record token usage for a completion.
pub fn record_tokens(model: &str, input_tokens: u32, output_tokens: u32) {
    if let Some(counter) = COMPLETION_TOKENS_TOTAL.get() {
        counter
            .with_label_values(&[model, "input"])
            .inc_by(u64::from(input_tokens));
        counter
            .with_label_values(&[model, "output"])
            .inc_by(u64::from(output_tokens));
    }
}

/// Record completion API latency.
pub fn record_completion_latency(model: &str, duration_secs: f64) {
    if let Some(histogram) = COMPLETION_LATENCY_SECONDS.get() {
        histogram.with_label_values(&[model]).observe(duration_secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_before_init_is_a_no_op() {
        record_plan_outcome(PlanOutcome::Ok);
        record_tokens("gpt-3.5-turbo", 10, 20);
        record_completion_latency("gpt-3.5-turbo", 0.5);
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(PlanOutcome::RemoteError.as_str(), "remote_error");
        assert_eq!(PlanOutcome::ParseError.as_str(), "parse_error");
    }
}
