pub mod generator;
pub mod metrics;
pub mod parser;
pub mod prompt;
pub mod providers;
pub mod validator;

pub use generator::{GenerationError, PlanGenerator};
pub use validator::{validate_request, ValidationError};
