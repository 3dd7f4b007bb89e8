#![allow(dead_code)]

use secrecy::Secret;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use workout_service::config::{
    CorsConfig, ModelConfig, OpenAiSettings, TelemetryConfig, WorkoutConfig,
};
use workout_service::services::providers::mock::MockCompletionProvider;
use workout_service::startup::Application;

pub const TEST_ORIGIN: &str = "http://localhost:5173";
pub const TEST_MODEL: &str = "gpt-3.5-turbo";

pub fn test_config() -> WorkoutConfig {
    WorkoutConfig {
        // Use random port for testing (port 0)
        common: CoreConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        openai: OpenAiSettings {
            api_key: Secret::new("test-api-key".to_string()),
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: Some(5),
            enabled: false,
        },
        models: ModelConfig {
            completion_model: TEST_MODEL.to_string(),
        },
        cors: CorsConfig {
            allowed_origin: TEST_ORIGIN.to_string(),
        },
        telemetry: TelemetryConfig {
            log_level: "debug".to_string(),
            otlp_endpoint: None,
        },
    }
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub provider: Arc<MockCompletionProvider>,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application with a mock provider answering `provider`'s reply.
    pub async fn spawn(provider: MockCompletionProvider) -> Self {
        let provider = Arc::new(provider);

        let app = Application::build_with_provider(test_config(), provider.clone())
            .await
            .expect("Failed to build test application");

        let port = app.http_port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            provider,
            client,
        }
    }

    pub async fn post_workout(&self, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}/workout", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to send request")
    }
}
