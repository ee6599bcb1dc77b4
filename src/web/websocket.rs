//! WebSocket endpoint for UI clients: outbound events, inbound control messages

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use super::AppState;
use crate::models::MonitoringConfig;

/// Messages pushed to connected clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientMessage {
    #[serde(rename_all = "camelCase")]
    StatusUpdate { tokens_found: u64 },

    NewToken { symbol: String, address: String },

    /// Host push payload to be shown as a system notification
    ShowNotification {
        title: String,
        body: String,
        icon: String,
        badge: String,
        vibrate: Vec<u32>,
    },
}

/// Control messages sent by clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ControlMessage {
    StartMonitoring { config: MonitoringConfig },
    StopMonitoring,
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();

    let subscription = state.hub.subscribe().await;
    let client_id = subscription.id;
    let mut rx = subscription.receiver;

    info!("New WebSocket client connected: {}", client_id);

    let status = ClientMessage::StatusUpdate {
        tokens_found: state.monitor.tokens_found(),
    };
    if let Ok(json) = serde_json::to_string(&status) {
        let _ = sender.send(Message::Text(json)).await;
    }

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(json) => {
                    if sender.send(Message::Text(json)).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    error!("Failed to serialize WebSocket message: {}", e);
                }
            }
        }
    });

    let monitor = state.monitor.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(Message::Text(text)) => match serde_json::from_str::<ControlMessage>(&text) {
                    Ok(control) => monitor.handle_control(control).await,
                    Err(e) => warn!("Ignoring unrecognised client message ({}): {}", e, text),
                },
                Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {
                    debug!("Received ping/pong");
                }
                Ok(Message::Close(_)) => {
                    info!("WebSocket client {} disconnected", client_id);
                    break;
                }
                Ok(Message::Binary(_)) => {
                    warn!("Received unexpected binary message");
                }
                Err(e) => {
                    error!("WebSocket error: {}", e);
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    state.hub.unsubscribe(client_id).await;
    info!("WebSocket connection closed: {}", client_id);
}
