use service_core::observability::init_tracing;
use workout_service::config::WorkoutConfig;
use workout_service::services::metrics::init_metrics;
use workout_service::startup::Application;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = WorkoutConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "workout-service",
        &config.telemetry.log_level,
        config.telemetry.otlp_endpoint.as_deref(),
    )?;

    init_metrics()?;

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        anyhow::anyhow!("Startup error: {}", e)
    })?;

    app.run_until_stopped().await?;

    Ok(())
}
