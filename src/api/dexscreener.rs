use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::SentinelError;
use crate::models::{SearchResponse, TradingPair};
use crate::monitor::PairSource;

const SEARCH_ENDPOINT: &str = "/latest/dex/search";
const SEARCH_RANK_BY: &str = "pairAge";
const SEARCH_ORDER: &str = "desc";
const SEARCH_LIMIT: u32 = 50;
const API_TIMEOUT_SECS: u64 = 20;

#[derive(Debug, Clone)]
pub struct DexScreenerClient {
    base_url: String,
    search_query: String,
    client: Client,
}

impl DexScreenerClient {
    pub fn new(base_url: &str, search_query: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(API_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client for DexScreener")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            search_query: search_query.to_string(),
            client,
        })
    }

    /// Fetches the most recently created pairs matching the search term.
    /// An absent `pairs` field yields an empty list; entries that do not
    /// decode are dropped with a warning.
    pub async fn fetch_latest_pairs(&self) -> Result<Vec<TradingPair>> {
        let url = format!("{}{}", self.base_url, SEARCH_ENDPOINT);
        let limit = SEARCH_LIMIT.to_string();

        debug!("Fetching latest pairs from DexScreener: {} (q={})", url, self.search_query);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", self.search_query.as_str()),
                ("rankBy", SEARCH_RANK_BY),
                ("order", SEARCH_ORDER),
                ("limit", limit.as_str()),
            ])
            .send()
            .await
            .context("Failed to send request to DexScreener search API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            warn!("DexScreener search API error: {} - {}", status, error_text);
            return Err(SentinelError::ApiError(format!(
                "DexScreener search returned {}",
                status
            ))
            .into());
        }

        let data: SearchResponse = response
            .json()
            .await
            .context("Failed to parse DexScreener search response")?;

        let pairs = data.into_pairs();
        debug!("DexScreener returned {} pairs", pairs.len());
        Ok(pairs)
    }
}

#[async_trait]
impl PairSource for DexScreenerClient {
    async fn fetch_pairs(&self) -> Result<Vec<TradingPair>> {
        self.fetch_latest_pairs().await
    }
}
