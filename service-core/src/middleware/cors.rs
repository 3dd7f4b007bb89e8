use crate::error::AppError;
use axum::http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;

/// CORS layer that only admits the given browser origin.
pub fn single_origin_cors(origin: &str) -> Result<CorsLayer, AppError> {
    let origin = origin.parse::<HeaderValue>().map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!("Invalid CORS origin '{}': {}", origin, e))
    })?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]))
}
