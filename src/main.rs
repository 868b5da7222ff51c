use parcel_report::api::{self, AppState};
use parcel_report::config::{Config, DEFAULT_LOG_FILTER};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (reads .env if present)
    let config = Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .init();

    tracing::info!("Starting parcel report service v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Loaded configuration: {:?}", config);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;

    // Create app state
    let app_state = Arc::new(AppState::from_config(config).map_err(|e| anyhow::anyhow!("{}", e))?);

    // Create router with state
    let app = api::create_router(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
