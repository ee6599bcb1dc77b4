//! New-pair monitoring pipeline
//!
//! fetch → filter → dedup → safety check → alert + client broadcast, driven by
//! the [`scheduler::Monitor`] on a fixed interval.

pub mod dedup;
pub mod filter;
pub mod host;
pub mod safety;
pub mod scheduler;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{MonitoringConfig, TradingPair};

pub use scheduler::{CycleReport, Monitor, MonitorSettings};

/// Source of freshly listed trading pairs.
#[async_trait]
pub trait PairSource: Send + Sync {
    async fn fetch_pairs(&self) -> Result<Vec<TradingPair>>;
}

/// Delivers an alert for a qualifying pair. Returns whether delivery succeeded.
#[async_trait]
pub trait AlertSender: Send + Sync {
    async fn send_alert(&self, pair: &TradingPair, config: &MonitoringConfig) -> bool;
}
