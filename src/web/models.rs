//! Request and Response DTOs for the Web API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub running: bool,
    pub tokens_found: u64,
    pub tracked_tokens: usize,
    pub connected_clients: usize,
}

#[derive(Debug, Deserialize)]
pub struct SyncRequest {
    pub tag: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SyncResponse {
    pub triggered: bool,
    pub alerted: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: Option<String>,
}
