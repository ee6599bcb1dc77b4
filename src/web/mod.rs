//! HTTP and WebSocket surface for UI clients and host hooks

pub mod handlers;
pub mod hub;
pub mod models;
pub mod routes;
pub mod server;
pub mod websocket;

use std::sync::Arc;

use crate::monitor::Monitor;

use self::hub::ClientHub;

/// Shared application state for all API handlers
#[derive(Clone)]
pub struct AppState {
    /// The monitor driving the check cycle
    pub monitor: Arc<Monitor>,
    /// Connected UI clients
    pub hub: Arc<ClientHub>,
}

impl AppState {
    pub fn new(monitor: Arc<Monitor>) -> Self {
        let hub = monitor.hub().clone();
        Self { monitor, hub }
    }
}
