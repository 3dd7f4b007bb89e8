//! HTTP handlers for the workout service.

pub mod health;
pub mod workout;

pub use health::{health_check, metrics_endpoint, readiness_check};
pub use workout::generate_workout;
