//! Application startup and lifecycle management.
//!
//! Builds the HTTP router around an injected completion provider and runs
//! it until a shutdown signal arrives.

use crate::config::WorkoutConfig;
use crate::handlers::{generate_workout, health_check, metrics_endpoint, readiness_check};
use crate::services::providers::mock::MockCompletionProvider;
use crate::services::providers::openai::{OpenAiConfig, OpenAiProvider};
use crate::services::providers::CompletionProvider;
use crate::services::PlanGenerator;
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    cors::single_origin_cors, metrics::metrics_middleware,
    security_headers::security_headers_middleware,
    tracing::{request_id_middleware, REQUEST_ID_HEADER},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: WorkoutConfig,
    pub generator: PlanGenerator,
}

/// Build the HTTP router for the given state.
pub fn build_router(state: AppState) -> Result<Router, AppError> {
    let cors = single_origin_cors(&state.config.cors.allowed_origin)?;

    let router = Router::new()
        .route("/workout", post(generate_workout))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_endpoint))
        .route_layer(from_fn(metrics_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state);

    Ok(router)
}

/// Completion provider selected by configuration.
pub fn provider_from_config(config: &WorkoutConfig) -> Result<Arc<dyn CompletionProvider>, AppError> {
    if !config.openai.enabled {
        tracing::warn!("OpenAI provider disabled, serving the example plan from the mock provider");
        return Ok(Arc::new(MockCompletionProvider::example_plan()));
    }

    let provider = OpenAiProvider::new(OpenAiConfig {
        api_key: config.openai.api_key.clone(),
        base_url: config.openai.base_url.clone(),
        timeout: config.openai.timeout(),
    })
    .map_err(|e| AppError::ConfigError(anyhow::anyhow!("{}", e)))?;

    tracing::info!(
        base_url = %config.openai.base_url,
        model = %config.models.completion_model,
        "Initialized OpenAI completion provider"
    );

    Ok(Arc::new(provider))
}

/// Application container for managing server lifecycle.
pub struct Application {
    http_port: u16,
    http_listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the provider named by the configuration.
    pub async fn build(config: WorkoutConfig) -> Result<Self, AppError> {
        let provider = provider_from_config(&config)?;
        Self::build_with_provider(config, provider).await
    }

    /// Build the application around an explicit completion provider.
    pub async fn build_with_provider(
        config: WorkoutConfig,
        provider: Arc<dyn CompletionProvider>,
    ) -> Result<Self, AppError> {
        let generator = PlanGenerator::new(provider, config.models.completion_model.clone());

        let state = AppState {
            config: config.clone(),
            generator,
        };
        let router = build_router(state)?;

        // Bind HTTP listener (port 0 = random port for testing)
        let http_addr = config.common.address();
        let http_listener = TcpListener::bind(&http_addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", http_addr, e);
            AppError::from(e)
        })?;
        let http_port = http_listener.local_addr()?.port();

        tracing::info!("Workout service: HTTP on port {}", http_port);

        Ok(Self {
            http_port,
            http_listener,
            router,
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn http_port(&self) -> u16 {
        self.http_port
    }

    /// Run the application until a shutdown signal is received.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.http_listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
