//! API route definitions

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;
use super::websocket::ws_handler;
use super::AppState;

/// Create all API routes
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health_check))
        .route("/api/status", get(handlers::get_status))

        // Monitoring control
        .route("/api/control", post(handlers::control))

        // Host lifecycle hooks
        .route("/api/host/sync", post(handlers::host_sync))
        .route("/api/host/push", post(handlers::host_push))

        // WebSocket
        .route("/ws", get(ws_handler))

        .with_state(state)
}
