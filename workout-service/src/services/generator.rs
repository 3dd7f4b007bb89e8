//! Workout plan generation: prompt, single completion call, parse.

use crate::models::{WorkoutPlan, WorkoutRequest};
use crate::services::metrics::{record_completion_latency, record_tokens};
use crate::services::parser::{parse_plan, PlanParseError};
use crate::services::prompt::build_messages;
use crate::services::providers::{CompletionProvider, FinishReason, GenerationParams};
use crate::services::validator::ValidationError;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

/// Sampling temperature for plan generation.
pub const TEMPERATURE: f32 = 0.7;

/// Output token cap for plan generation.
pub const MAX_OUTPUT_TOKENS: u32 = 600;

/// Failure of a `POST /workout` request.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The completion call failed; carries the provider's message.
    #[error("{0}")]
    Remote(String),

    #[error(transparent)]
    Parse(#[from] PlanParseError),
}

/// Generates plans through an injected completion provider.
#[derive(Clone)]
pub struct PlanGenerator {
    provider: Arc<dyn CompletionProvider>,
    model: String,
}

impl PlanGenerator {
    pub fn new(provider: Arc<dyn CompletionProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    pub fn provider(&self) -> &Arc<dyn CompletionProvider> {
        &self.provider
    }

    fn params(&self) -> GenerationParams {
        GenerationParams {
            model: self.model.clone(),
            temperature: TEMPERATURE,
            max_tokens: MAX_OUTPUT_TOKENS,
        }
    }

    /// Generate a plan for a validated request.
    ///
    /// Makes exactly one completion call. The parsed JSON is returned as the
    /// model wrote it; shape or ordering mismatches are only logged.
    pub async fn generate(&self, request: &WorkoutRequest) -> Result<Value, GenerationError> {
        let messages = build_messages(request);
        let params = self.params();

        let start = Instant::now();
        let response = self
            .provider
            .complete(&messages, &params)
            .await
            .map_err(|e| {
                tracing::error!(
                    provider = self.provider.name(),
                    model = %self.model,
                    error_kind = e.kind(),
                    error = %e,
                    "Completion request failed"
                );
                GenerationError::Remote(e.to_string())
            })?;
        let elapsed = start.elapsed().as_secs_f64();

        record_completion_latency(&self.model, elapsed);
        record_tokens(&self.model, response.input_tokens, response.output_tokens);

        tracing::info!(
            provider = self.provider.name(),
            model = %self.model,
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            finish_reason = response.finish_reason.as_str(),
            latency_secs = elapsed,
            "Completion received"
        );

        if response.finish_reason == FinishReason::Length {
            tracing::warn!(
                max_tokens = MAX_OUTPUT_TOKENS,
                "Completion hit the output token cap, plan may be truncated"
            );
        }

        let plan = parse_plan(&response.text).map_err(|e| {
            tracing::warn!(
                reason = %e.reason,
                raw_len = e.raw_output.len(),
                "Unable to parse completion as JSON"
            );
            e
        })?;

        inspect_plan(request, &plan);
        Ok(plan)
    }
}

/// Log when a parsed plan strays from the documented shape or ordering.
fn inspect_plan(request: &WorkoutRequest, plan: &Value) {
    match WorkoutPlan::deserialize(plan) {
        Ok(typed) if !typed.follows_rules_for(request.goal) => {
            tracing::warn!(
                goal = %request.goal,
                compound_first = typed.compound_before_isolation(),
                has_cardio = typed.includes_cardio(),
                "Generated plan does not follow ordering rules"
            );
        }
        Ok(_) => {}
        Err(e) => {
            tracing::warn!(error = %e, "Generated plan does not match the expected shape");
        }
    }
}
