//! Request handlers for all API endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::{info, warn};

use super::models::*;
use super::websocket::ControlMessage;
use super::AppState;
use crate::monitor::host::PushPayload;

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}

pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        running: state.monitor.is_running().await,
        tokens_found: state.monitor.tokens_found(),
        tracked_tokens: state.monitor.tracked_tokens().await,
        connected_clients: state.hub.client_count().await,
    })
}

/// Accepts the same START_MONITORING / STOP_MONITORING messages as the WebSocket.
pub async fn control(
    State(state): State<AppState>,
    payload: Result<Json<ControlMessage>, JsonRejection>,
) -> Result<Json<SuccessResponse>, (StatusCode, Json<ErrorResponse>)> {
    let Json(message) = payload.map_err(|e| {
        warn!("Rejected control message: {}", e);
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Invalid control message".to_string(),
                details: Some(e.body_text()),
            }),
        )
    })?;

    let reply = match &message {
        ControlMessage::StartMonitoring { .. } => "Monitoring started",
        ControlMessage::StopMonitoring => "Monitoring stopped",
    };

    state.monitor.handle_control(message).await;
    info!("{} via API", reply);

    Ok(Json(SuccessResponse {
        success: true,
        message: reply.to_string(),
    }))
}

pub async fn host_sync(
    State(state): State<AppState>,
    Json(request): Json<SyncRequest>,
) -> Json<SyncResponse> {
    let report = state.monitor.on_periodic_wake(&request.tag).await;

    Json(SyncResponse {
        triggered: report.is_some(),
        alerted: report.map(|r| r.alerted).unwrap_or(0),
    })
}

pub async fn host_push(
    State(state): State<AppState>,
    Json(payload): Json<PushPayload>,
) -> Json<SuccessResponse> {
    let delivered = state.monitor.show_push_notification(&payload).await;

    Json(SuccessResponse {
        success: true,
        message: format!("Notification delivered to {} clients", delivered),
    })
}
