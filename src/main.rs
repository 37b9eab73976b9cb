use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use risk_sentinel::{config::Config, routes, state::AppState};
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env().context("loading configuration")?;
    tracing::info!(base_url = %config.base_url, "flow backend");
    if config.api_key.is_some() {
        tracing::info!("bearer credential configured for flow backend");
    }

    let state = Arc::new(AppState::new(&config).context("building flow client")?);

    let app = routes::create_router(&config.static_dir)
        .with_state(state)
        .layer(CorsLayer::very_permissive());

    let port = config.port;
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    tracing::info!("risk sentinel proxy running at http://localhost:{port}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
