use anyhow::Result;
use dotenv::dotenv;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod api;
mod bot;
mod config;
mod error;
mod models;
mod monitor;
mod web;

use crate::api::dexscreener::DexScreenerClient;
use crate::bot::notification::NotificationManager;
use crate::config::Config;
use crate::monitor::{Monitor, MonitorSettings};
use crate::web::hub::ClientHub;
use crate::web::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables before RUST_LOG is read
    dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::load()?;
    info!("Configuration loaded successfully");

    let dexscreener = Arc::new(DexScreenerClient::new(
        &config.dexscreener_base_url,
        &config.search_query,
    )?);
    let notifier = Arc::new(NotificationManager::new(&config.telegram_api_base_url)?);
    let hub = Arc::new(ClientHub::new());

    let monitor = Monitor::new(dexscreener, notifier, hub, MonitorSettings::from(&config));
    info!("Monitor initialized for chain '{}'", config.target_chain);

    if let Some(credentials) = config.startup_monitoring() {
        info!("Telegram credentials found in environment, starting monitoring");
        monitor.start(credentials).await;
    } else {
        info!("Waiting for START_MONITORING from a client");
    }

    let state = AppState::new(monitor.clone());
    let result = web::server::start_server(state, &config).await;

    monitor.stop().await;
    result
}
