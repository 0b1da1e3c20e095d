use tracker_core::observability::init_tracing;
use tracker_frontend::config::get_configuration;
use tracker_frontend::services::metrics::init_metrics;
use tracker_frontend::startup::Application;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let configuration = get_configuration().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing("tracker-frontend", &configuration.telemetry);
    init_metrics()?;

    let application = Application::build(configuration).await?;
    application.run_until_stopped().await.map_err(|e| {
        tracing::error!("Server error: {}", e);
        anyhow::anyhow!("Server error: {}", e)
    })?;

    Ok(())
}
