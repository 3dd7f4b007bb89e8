use secrecy::Secret;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

#[derive(Debug, Clone, Deserialize)]
pub struct WorkoutConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub openai: OpenAiSettings,
    pub models: ModelConfig,
    pub cors: CorsConfig,
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiSettings {
    pub api_key: Secret<String>,
    pub base_url: String,
    /// Client timeout in seconds; unset means no client-side timeout.
    pub timeout_secs: Option<u64>,
    /// When false the mock provider serves the example plan.
    pub enabled: bool,
}

impl OpenAiSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Chat model used for plan generation (e.g., gpt-3.5-turbo)
    pub completion_model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// The single browser origin allowed to call the API.
    pub allowed_origin: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

impl WorkoutConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let enabled = parse_bool(&get_env("OPENAI_ENABLED", Some("true"), false)?)?;
        // Offline development does not need a real key.
        let api_key = if enabled {
            get_env("OPENAI_API_KEY", None, is_prod)?
        } else {
            env::var("OPENAI_API_KEY").unwrap_or_default()
        };

        let timeout_secs = match env::var("OPENAI_TIMEOUT_SECS") {
            Ok(raw) => Some(raw.trim().parse::<u64>().map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!(
                    "OPENAI_TIMEOUT_SECS must be a whole number of seconds: {}",
                    e
                ))
            })?),
            Err(_) => None,
        };

        Ok(WorkoutConfig {
            common: common_config,
            openai: OpenAiSettings {
                api_key: Secret::new(api_key),
                base_url: get_env("OPENAI_BASE_URL", Some(DEFAULT_OPENAI_BASE_URL), false)?,
                timeout_secs,
                enabled,
            },
            models: ModelConfig {
                completion_model: get_env("WORKOUT_MODEL", Some(DEFAULT_MODEL), false)?,
            },
            cors: CorsConfig {
                allowed_origin: get_env("CORS_ALLOWED_ORIGIN", Some(DEFAULT_CORS_ORIGIN), is_prod)?,
            },
            telemetry: TelemetryConfig {
                log_level: get_env("LOG_LEVEL", Some("info"), false)?,
                otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty()),
            },
        })
    }
}

fn parse_bool(value: &str) -> Result<bool, AppError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(AppError::ConfigError(anyhow::anyhow!(
            "Expected a boolean but got '{}'",
            other
        ))),
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
