use crate::services::metrics::{record_plan_outcome, PlanOutcome};
use crate::services::{validate_request, GenerationError};
use crate::startup::AppState;
use crate::utils::JsonObject;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};
use service_core::error::ErrorResponse;

/// Generate a workout plan.
///
/// Validation failures are 400s. Remote and parse failures are reported in a
/// 200 body (`{"error": ...}`), which is what existing clients expect.
pub async fn generate_workout(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<Json<Value>, GenerationError> {
    tracing::info!(
        body = %serde_json::to_string(&body).unwrap_or_default(),
        "Received workout request"
    );

    let result = plan_for(&state, &body).await;

    record_plan_outcome(match &result {
        Ok(_) => PlanOutcome::Ok,
        Err(GenerationError::Validation(_)) => PlanOutcome::ValidationError,
        Err(GenerationError::Remote(_)) => PlanOutcome::RemoteError,
        Err(GenerationError::Parse(_)) => PlanOutcome::ParseError,
    });

    result.map(Json)
}

async fn plan_for(state: &AppState, body: &Map<String, Value>) -> Result<Value, GenerationError> {
    let request = validate_request(body).map_err(|e| {
        tracing::warn!(field = e.field(), error = %e, "Rejected workout request");
        e
    })?;

    state.generator.generate(&request).await
}

impl IntoResponse for GenerationError {
    fn into_response(self) -> Response {
        match self {
            GenerationError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: err.to_string(),
                    details: None,
                }),
            )
                .into_response(),
            GenerationError::Remote(message) => {
                (StatusCode::OK, Json(json!({ "error": message }))).into_response()
            }
            GenerationError::Parse(err) => (
                StatusCode::OK,
                Json(json!({
                    "error": "Unable to parse output as JSON",
                    "raw_output": err.raw_output,
                })),
            )
                .into_response(),
        }
    }
}
