//! # unicred-api: Binary Entry Point
//!
//! Reads configuration from the environment, opens the registry and serves
//! the API on `0.0.0.0:$PORT` (default 8080).

use unicred_api::state::{AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    let port = config.port;

    let state = AppState::from_config(config).map_err(|e| {
        tracing::error!("Registry initialization failed: {e}");
        e
    })?;

    let app = unicred_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("unicred API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
