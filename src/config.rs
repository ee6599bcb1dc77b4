use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::error::SentinelError;
use crate::models::MonitoringConfig;
use crate::monitor::safety::SafetyThresholds;

pub const DEFAULT_DEXSCREENER_BASE_URL: &str = "https://api.dexscreener.com";
pub const DEFAULT_TELEGRAM_API_BASE_URL: &str = "https://api.telegram.org";

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    pub api_host: Option<String>,
    pub api_port: Option<u16>,

    pub dexscreener_base_url: String,
    pub search_query: String,
    pub target_chain: String,
    pub poll_interval_secs: u64,
    pub max_candidates: usize,

    pub telegram_api_base_url: String,
    // Auto-start credentials; monitoring otherwise waits for a START_MONITORING message
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,

    pub sync_tag: String,

    pub min_liquidity_usd: f64,
    pub max_liquidity_volume_ratio: f64,
    pub max_pair_age_minutes: f64,
}

impl Default for Config {
    fn default() -> Self {
        let thresholds = SafetyThresholds::default();
        Self {
            api_host: None,
            api_port: None,
            dexscreener_base_url: DEFAULT_DEXSCREENER_BASE_URL.to_string(),
            search_query: "SOL".to_string(),
            target_chain: "solana".to_string(),
            poll_interval_secs: 60,
            max_candidates: 20,
            telegram_api_base_url: DEFAULT_TELEGRAM_API_BASE_URL.to_string(),
            telegram_bot_token: None,
            telegram_chat_id: None,
            sync_tag: "check-tokens".to_string(),
            min_liquidity_usd: thresholds.min_liquidity_usd,
            max_liquidity_volume_ratio: thresholds.max_liquidity_volume_ratio,
            max_pair_age_minutes: thresholds.max_age_minutes,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let api_port = match env::var("API_PORT").ok() {
            Some(port) => Some(
                port.trim()
                    .parse::<u16>()
                    .context("Failed to parse API_PORT as a port number")?,
            ),
            None => None,
        };

        let poll_interval_secs: u64 = env::var("POLL_INTERVAL_SECS")
            .unwrap_or_else(|_| defaults.poll_interval_secs.to_string())
            .parse()
            .context("Failed to parse POLL_INTERVAL_SECS")?;
        if poll_interval_secs == 0 {
            return Err(SentinelError::ConfigError(
                "POLL_INTERVAL_SECS must be greater than zero".to_string(),
            )
            .into());
        }

        Ok(Self {
            api_host: env::var("API_HOST").ok(),
            api_port,

            dexscreener_base_url: env::var("DEXSCREENER_BASE_URL")
                .unwrap_or(defaults.dexscreener_base_url),
            search_query: env::var("SEARCH_QUERY").unwrap_or(defaults.search_query),
            target_chain: env::var("TARGET_CHAIN").unwrap_or(defaults.target_chain),
            poll_interval_secs,
            max_candidates: env::var("MAX_CANDIDATES")
                .unwrap_or_else(|_| defaults.max_candidates.to_string())
                .parse()
                .context("Failed to parse MAX_CANDIDATES")?,

            telegram_api_base_url: env::var("TELEGRAM_API_BASE_URL")
                .unwrap_or(defaults.telegram_api_base_url),
            telegram_bot_token: env::var("TELEGRAM_BOT_TOKEN").ok().filter(|v| !v.is_empty()),
            telegram_chat_id: env::var("TELEGRAM_CHAT_ID").ok().filter(|v| !v.is_empty()),

            sync_tag: env::var("SYNC_TAG").unwrap_or(defaults.sync_tag),

            min_liquidity_usd: env::var("MIN_LIQUIDITY_USD")
                .unwrap_or_else(|_| defaults.min_liquidity_usd.to_string())
                .parse()
                .context("Failed to parse MIN_LIQUIDITY_USD")?,
            max_liquidity_volume_ratio: env::var("MAX_LIQUIDITY_VOLUME_RATIO")
                .unwrap_or_else(|_| defaults.max_liquidity_volume_ratio.to_string())
                .parse()
                .context("Failed to parse MAX_LIQUIDITY_VOLUME_RATIO")?,
            max_pair_age_minutes: env::var("MAX_PAIR_AGE_MINUTES")
                .unwrap_or_else(|_| defaults.max_pair_age_minutes.to_string())
                .parse()
                .context("Failed to parse MAX_PAIR_AGE_MINUTES")?,
        })
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn safety_thresholds(&self) -> SafetyThresholds {
        SafetyThresholds {
            min_liquidity_usd: self.min_liquidity_usd,
            max_liquidity_volume_ratio: self.max_liquidity_volume_ratio,
            max_age_minutes: self.max_pair_age_minutes,
        }
    }

    /// Credentials for starting monitoring at boot, when both are present.
    pub fn startup_monitoring(&self) -> Option<MonitoringConfig> {
        match (&self.telegram_bot_token, &self.telegram_chat_id) {
            (Some(bot_token), Some(chat_id)) => Some(MonitoringConfig {
                bot_token: bot_token.clone(),
                chat_id: chat_id.clone(),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.poll_interval(), Duration::from_secs(60));
        assert_eq!(config.max_candidates, 20);
        assert_eq!(config.target_chain, "solana");
        assert_eq!(config.sync_tag, "check-tokens");

        let thresholds = config.safety_thresholds();
        assert_eq!(thresholds.min_liquidity_usd, 25_000.0);
        assert_eq!(thresholds.max_liquidity_volume_ratio, 8.0);
        assert_eq!(thresholds.max_age_minutes, 30.0);
    }

    #[test]
    fn test_startup_monitoring_requires_both_credentials() {
        let mut config = Config::default();
        assert!(config.startup_monitoring().is_none());

        config.telegram_bot_token = Some("123:abc".to_string());
        assert!(config.startup_monitoring().is_none());

        config.telegram_chat_id = Some("-100200".to_string());
        let monitoring = config.startup_monitoring().unwrap();
        assert_eq!(monitoring.bot_token, "123:abc");
        assert_eq!(monitoring.chat_id, "-100200");
    }
}
