use dotenvy::dotenv;
use legalease_core::observability::init_tracing;
use legalease_web::config::get_configuration;
use legalease_web::startup::build_router;
use legalease_web::AppState;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let configuration = get_configuration().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "legalease-web",
        &configuration.telemetry.log_level,
        configuration.telemetry.otlp_endpoint.as_deref(),
    )
    .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    legalease_web::services::metrics::init_metrics()
        .map_err(|e| anyhow::anyhow!("Failed to register metrics: {}", e))?;

    let address = format!(
        "{}:{}",
        configuration.server.host, configuration.server.port
    );
    let backend = configuration.backend.url.clone();
    let app = build_router(AppState::new(configuration));

    let listener = tokio::net::TcpListener::bind(&address).await.map_err(|e| {
        tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
        anyhow::anyhow!("Failed to bind to address {}: {}", address, e)
    })?;

    info!(backend = %backend, "Starting legalease-web on {}", address);
    axum::serve(listener, app).await.map_err(|e| {
        tracing::error!("Server error: {}", e);
        anyhow::anyhow!("Server error: {}", e)
    })?;

    Ok(())
}
