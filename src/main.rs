use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use livelookup_bridge::config::Config;
use livelookup_bridge::handlers::AppState;
use livelookup_bridge::routes;

/// Main entry point for the live lookup bridge.
///
/// Initializes tracing, loads configuration, builds the directory client and
/// serves the router until the process is stopped.
///
/// # Returns
///
/// * `anyhow::Result<()>` - Ok if the server runs successfully, or an error if initialization fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "livelookup_bridge=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded successfully");

    let state = AppState::new(config.clone())?;
    tracing::info!(
        "Directory client initialized: {}",
        config.directory_base_url
    );

    let app = routes::app(Arc::new(state));

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
