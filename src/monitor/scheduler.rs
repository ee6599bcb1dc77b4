//! Monitor lifecycle and the per-tick check cycle.

use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::{debug, error, info};

use super::dedup::SeenTokens;
use super::filter::select_candidates;
use super::safety::{evaluate, SafetyThresholds};
use super::{AlertSender, PairSource};
use crate::config::Config;
use crate::models::MonitoringConfig;
use crate::web::hub::ClientHub;
use crate::web::websocket::{ClientMessage, ControlMessage};

#[derive(Debug, Clone)]
pub struct MonitorSettings {
    pub target_chain: String,
    pub max_candidates: usize,
    pub poll_interval: Duration,
    pub sync_tag: String,
    pub thresholds: SafetyThresholds,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for MonitorSettings {
    fn from(config: &Config) -> Self {
        Self {
            target_chain: config.target_chain.clone(),
            max_candidates: config.max_candidates,
            poll_interval: config.poll_interval(),
            sync_tag: config.sync_tag.clone(),
            thresholds: config.safety_thresholds(),
        }
    }
}

/// Outcome of a single check cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub fetched: usize,
    pub candidates: usize,
    pub alerted: usize,
}

/// Owns the monitoring state: stored credentials, alerted addresses, the found
/// counter and the recurring timer.
pub struct Monitor {
    source: Arc<dyn PairSource>,
    notifier: Arc<dyn AlertSender>,
    hub: Arc<ClientHub>,
    settings: MonitorSettings,
    config: RwLock<Option<MonitoringConfig>>,
    seen: SeenTokens,
    tokens_found: AtomicU64,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl Monitor {
    pub fn new(
        source: Arc<dyn PairSource>,
        notifier: Arc<dyn AlertSender>,
        hub: Arc<ClientHub>,
        settings: MonitorSettings,
    ) -> Arc<Self> {
        Arc::new(Self {
            source,
            notifier,
            hub,
            settings,
            config: RwLock::new(None),
            seen: SeenTokens::new(),
            tokens_found: AtomicU64::new(0),
            timer: Mutex::new(None),
        })
    }

    pub fn settings(&self) -> &MonitorSettings {
        &self.settings
    }

    pub fn hub(&self) -> &Arc<ClientHub> {
        &self.hub
    }

    pub fn tokens_found(&self) -> u64 {
        self.tokens_found.load(Ordering::SeqCst)
    }

    pub async fn tracked_tokens(&self) -> usize {
        self.seen.len().await
    }

    pub async fn is_running(&self) -> bool {
        self.timer.lock().await.is_some()
    }

    /// Stops any previous run, stores `config`, runs one check immediately and
    /// then repeats it every poll interval until [`Monitor::stop`] is called.
    ///
    /// The timer is installed before the initial check, so dropping this future
    /// part-way never leaves credentials stored without a recurring check.
    pub async fn start(self: &Arc<Self>, config: MonitoringConfig) {
        self.stop().await;

        *self.config.write().await = Some(config);

        let monitor = Arc::clone(self);
        let period = self.settings.poll_interval;
        let first_tick = Instant::now() + period;
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(first_tick, period);
            loop {
                ticker.tick().await;
                // Each cycle runs on its own task so stopping the timer never
                // cancels a cycle already in flight.
                let monitor = Arc::clone(&monitor);
                tokio::spawn(async move {
                    monitor.run_check().await;
                });
            }
        });

        {
            let mut timer = self.timer.lock().await;
            if let Some(previous) = timer.replace(handle) {
                // A concurrent start slipped in between our stop and now
                previous.abort();
            }
        }
        info!(
            "🚀 Monitoring started (chain: {}, every {}s)",
            self.settings.target_chain,
            period.as_secs()
        );

        self.run_check().await;
        self.broadcast_status().await;
    }

    /// Cancels the recurring timer and forgets the stored credentials. Safe to
    /// call when not running.
    pub async fn stop(&self) {
        let handle = self.timer.lock().await.take();
        match handle {
            Some(handle) => {
                handle.abort();
                info!("⏹️ Monitoring stopped");
            }
            None => debug!("Stop requested but monitoring is not running"),
        }
        *self.config.write().await = None;
    }

    pub async fn handle_control(self: &Arc<Self>, message: ControlMessage) {
        match message {
            ControlMessage::StartMonitoring { config } => self.start(config).await,
            ControlMessage::StopMonitoring => self.stop().await,
        }
    }

    /// One fetch → filter → dedup → safety → notify pass. Errors end the cycle
    /// early and are only logged.
    pub async fn run_check(&self) -> CycleReport {
        let mut report = CycleReport::default();

        let Some(config) = self.config.read().await.clone() else {
            debug!("No monitoring config stored, skipping check");
            return report;
        };

        let pairs = match self.source.fetch_pairs().await {
            Ok(pairs) => pairs,
            Err(e) => {
                error!("Error checking tokens: {:?}", e);
                return report;
            }
        };
        report.fetched = pairs.len();

        let candidates = select_candidates(
            pairs,
            &self.settings.target_chain,
            self.settings.max_candidates,
        );
        report.candidates = candidates.len();
        debug!(
            "🔍 {} of {} pairs are {} candidates",
            report.candidates, report.fetched, self.settings.target_chain
        );

        let now_ms = Utc::now().timestamp_millis();
        for pair in candidates {
            let address = pair.token_address().to_string();
            if self.seen.has(&address).await {
                continue;
            }

            if let Err(reason) = evaluate(&pair, now_ms, &self.settings.thresholds) {
                debug!("Skipping {} ({}): {}", pair.base_token.symbol, address, reason);
                continue;
            }

            // Marked before sending: a failed alert is never retried.
            if !self.seen.mark_seen(&address).await {
                continue;
            }
            let found = self.tokens_found.fetch_add(1, Ordering::SeqCst) + 1;
            info!("✅ New token found: {} ({}) - total {}", pair.base_token.symbol, address, found);

            self.notifier.send_alert(&pair, &config).await;

            self.hub
                .broadcast(ClientMessage::NewToken {
                    symbol: pair.base_token.symbol.clone(),
                    address,
                })
                .await;
            self.hub
                .broadcast(ClientMessage::StatusUpdate { tokens_found: found })
                .await;

            report.alerted += 1;
        }

        report
    }

    pub async fn broadcast_status(&self) {
        self.hub
            .broadcast(ClientMessage::StatusUpdate {
                tokens_found: self.tokens_found(),
            })
            .await;
    }
}
