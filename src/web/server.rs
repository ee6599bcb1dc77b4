//! HTTP/WebSocket front door for UI clients and host hooks.

use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::routes::create_routes;
use super::AppState;
use crate::config::Config;
use crate::error::SentinelError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

/// Resolves `API_HOST`/`API_PORT` into a socket address.
pub fn bind_address(config: &Config) -> Result<SocketAddr> {
    let host = config.api_host.as_deref().unwrap_or(DEFAULT_HOST).trim();
    let ip: IpAddr = match host {
        "localhost" => IpAddr::from([127, 0, 0, 1]),
        other => other.parse().map_err(|_| {
            SentinelError::ConfigError(format!("API_HOST '{}' is not an IP address", other))
        })?,
    };

    Ok(SocketAddr::new(ip, config.api_port.unwrap_or(DEFAULT_PORT)))
}

/// Serves the client surface until Ctrl-C, then returns so the caller can
/// stop monitoring.
pub async fn start_server(state: AppState, config: &Config) -> Result<()> {
    let addr = bind_address(config)?;
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Pair sentinel listening on http://{} (ws at /ws)", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Routes plus the permissive CORS and request tracing layers UI clients need.
pub fn create_app(state: AppState) -> Router {
    create_routes(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
