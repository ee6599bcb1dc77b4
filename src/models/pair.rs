use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Envelope returned by the DexScreener search endpoint.
///
/// Entries stay raw until [`SearchResponse::into_pairs`] so a single
/// malformed listing cannot sink the whole batch.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub pairs: Option<Vec<Value>>,
}

impl SearchResponse {
    /// Decodes every entry, skipping (and logging) those that are not pairs.
    pub fn into_pairs(self) -> Vec<TradingPair> {
        self.pairs
            .unwrap_or_default()
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<TradingPair>(entry) {
                Ok(pair) => Some(pair),
                Err(e) => {
                    warn!("Skipping malformed DexScreener pair: {}", e);
                    None
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingPair {
    pub chain_id: String,
    pub base_token: BaseToken,
    #[serde(default)]
    pub price_usd: Option<String>,
    #[serde(default)]
    pub liquidity: Option<PairLiquidity>,
    #[serde(default)]
    pub volume: Option<PairVolume>,
    /// Milliseconds since the Unix epoch
    #[serde(default)]
    pub pair_created_at: Option<i64>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BaseToken {
    pub address: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PairLiquidity {
    #[serde(default)]
    pub usd: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PairVolume {
    #[serde(default)]
    pub h24: Option<f64>,
}

impl TradingPair {
    pub fn token_address(&self) -> &str {
        &self.base_token.address
    }

    pub fn liquidity_usd(&self) -> f64 {
        self.liquidity.as_ref().and_then(|l| l.usd).unwrap_or(0.0)
    }

    pub fn volume_h24(&self) -> f64 {
        self.volume.as_ref().and_then(|v| v.h24).unwrap_or(0.0)
    }

    /// Creation timestamp used for ordering; missing timestamps sort as the epoch.
    pub fn created_at_or_epoch(&self) -> i64 {
        self.pair_created_at.unwrap_or(0)
    }

    /// Age in (fractional) minutes relative to `now_ms`, or `None` without a timestamp.
    pub fn age_minutes(&self, now_ms: i64) -> Option<f64> {
        self.pair_created_at
            .map(|created| (now_ms - created) as f64 / 60_000.0)
    }

    pub fn price(&self) -> Option<f64> {
        self.price_usd.as_deref().and_then(|p| p.trim().parse::<f64>().ok())
    }
}
