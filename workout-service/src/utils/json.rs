use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde_json::{Map, Value};
use service_core::error::AppError;

/// Extracts a request body that must be a JSON object, keeping its values
/// untyped so field validation can report its own messages.
pub struct JsonObject(pub Map<String, Value>);

#[async_trait]
impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(anyhow::anyhow!("Json parse error: {}", e.body_text())))?;

        match value {
            Value::Object(map) => Ok(JsonObject(map)),
            _ => Err(AppError::BadRequest(anyhow::anyhow!(
                "Request body must be a JSON object."
            ))),
        }
    }
}
