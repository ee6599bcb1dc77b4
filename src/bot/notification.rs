use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, Url};
use std::time::Duration;
use teloxide::prelude::*;
use teloxide::types::{ParseMode, Recipient};
use teloxide::utils::html::escape;
use tracing::{error, info};

use crate::bot::format::{format_age, format_price, format_usd_amount};
use crate::error::SentinelError;
use crate::models::{MonitoringConfig, TradingPair};
use crate::monitor::AlertSender;

const CHART_BASE_URL: &str = "https://dexscreener.com";
const API_TIMEOUT_SECS: u64 = 20;

/// Formats new-pair alerts and delivers them through the Telegram Bot API.
/// Credentials arrive with each start, so a `Bot` is built per send on a
/// shared HTTP client.
pub struct NotificationManager {
    client: Client,
    api_url: Url,
}

impl NotificationManager {
    pub fn new(api_url: &str) -> Result<Self> {
        let api_url = Url::parse(api_url).map_err(|e| {
            SentinelError::ConfigError(format!("Invalid Telegram API URL '{}': {}", api_url, e))
        })?;
        let client = Client::builder()
            .timeout(Duration::from_secs(API_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client for Telegram")?;

        Ok(Self { client, api_url })
    }

    fn bot(&self, token: &str) -> Bot {
        Bot::with_client(token, self.client.clone()).set_api_url(self.api_url.clone())
    }

    /// Sends the alert for `pair`. Failures are logged and reported as `false`.
    pub async fn send_alert(&self, pair: &TradingPair, config: &MonitoringConfig) -> bool {
        let message = build_alert_message(pair, Utc::now().timestamp_millis());

        match self
            .bot(&config.bot_token)
            .send_message(recipient(&config.chat_id), message)
            .parse_mode(ParseMode::Html)
            .await
        {
            Ok(_) => {
                info!("📨 Alert sent for {} ({})", pair.base_token.symbol, pair.token_address());
                true
            }
            Err(e) => {
                error!("Failed to send alert for {}: {}", pair.token_address(), e);
                false
            }
        }
    }
}

#[async_trait]
impl AlertSender for NotificationManager {
    async fn send_alert(&self, pair: &TradingPair, config: &MonitoringConfig) -> bool {
        NotificationManager::send_alert(self, pair, config).await
    }
}

/// Numeric ids go out as chat ids, anything else as a `@channel` username.
pub fn recipient(chat_id: &str) -> Recipient {
    match chat_id.trim().parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) => Recipient::ChannelUsername(chat_id.trim().to_string()),
    }
}

pub fn chart_url(pair: &TradingPair) -> String {
    format!("{}/{}/{}", CHART_BASE_URL, pair.chain_id, pair.token_address())
}

/// Renders the HTML alert body for `pair` as of `now_ms`.
pub fn build_alert_message(pair: &TradingPair, now_ms: i64) -> String {
    let chart = chart_url(pair);
    let trade = pair
        .url
        .as_deref()
        .filter(|u| !u.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| chart.clone());

    format!(
        "🚨 <b>New Token Alert</b> 🚨\n\n\
        <b>{}</b> ({})\n\n\
        💰 Price: ${}\n\
        💧 Liquidity: ${}\n\
        📊 Volume 24h: ${}\n\
        ⏰ Age: {}\n\n\
        📋 Contract:\n\
        <code>{}</code>\n\n\
        <a href=\"{}\">📈 Chart</a> | <a href=\"{}\">🛒 Trade</a>",
        escape(&pair.base_token.symbol),
        escape(&pair.base_token.name),
        format_price(pair.price()),
        format_usd_amount(pair.liquidity_usd()),
        format_usd_amount(pair.volume_h24()),
        format_age(pair.pair_created_at, now_ms),
        escape(pair.token_address()),
        escape(&chart),
        escape(&trade),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BaseToken, PairLiquidity, PairVolume};
    use mockito::Matcher;
    use serde_json::json;

    const NOW: i64 = 1_700_000_000_000;

    fn pair(url: Option<&str>) -> TradingPair {
        TradingPair {
            chain_id: "solana".to_string(),
            base_token: BaseToken {
                address: "Mint111".to_string(),
                symbol: "PEPE<3".to_string(),
                name: "Pepe & Friends".to_string(),
            },
            price_usd: Some("0.0000123".to_string()),
            liquidity: Some(PairLiquidity { usd: Some(31_250.5) }),
            volume: Some(PairVolume { h24: Some(12_000.0) }),
            pair_created_at: Some(NOW - 7 * 60_000),
            url: url.map(str::to_string),
        }
    }

    #[test]
    fn test_alert_message_contents() {
        let message = build_alert_message(&pair(Some("https://dexscreener.com/solana/pairaddr")), NOW);

        assert!(message.contains("<b>PEPE&lt;3</b> (Pepe &amp; Friends)"));
        assert!(message.contains("Price: $0.00001230"));
        assert!(message.contains("Liquidity: $31,250.5"));
        assert!(message.contains("Volume 24h: $12,000"));
        assert!(message.contains("Age: 7m ago"));
        assert!(message.contains("<code>Mint111</code>"));
        assert!(message.contains("<a href=\"https://dexscreener.com/solana/Mint111\">📈 Chart</a>"));
        assert!(message.contains("<a href=\"https://dexscreener.com/solana/pairaddr\">🛒 Trade</a>"));
    }

    #[test]
    fn test_trade_link_falls_back_to_chart() {
        let message = build_alert_message(&pair(None), NOW);
        assert!(message.contains("<a href=\"https://dexscreener.com/solana/Mint111\">🛒 Trade</a>"));
    }

    #[test]
    fn test_fresh_pair_is_just_now() {
        let mut fresh = pair(None);
        fresh.pair_created_at = Some(NOW - 10_000);
        assert!(build_alert_message(&fresh, NOW).contains("Age: Just now"));
    }

    #[test]
    fn test_recipient_from_chat_id() {
        assert_eq!(recipient("-1001234"), Recipient::Id(ChatId(-1001234)));
        assert_eq!(
            recipient("@pair_alerts"),
            Recipient::ChannelUsername("@pair_alerts".to_string())
        );
    }

    fn send_message_path(token: &str) -> Matcher {
        Matcher::Regex(format!(r"(?i)^/bot{}/sendmessage$", token))
    }

    #[tokio::test]
    async fn test_send_alert_reports_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", send_message_path("bad"))
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#)
            .create_async()
            .await;

        let manager = NotificationManager::new(&server.url()).unwrap();
        let config = MonitoringConfig {
            bot_token: "bad".to_string(),
            chat_id: "0".to_string(),
        };

        assert!(!manager.send_alert(&pair(None), &config).await);
    }

    #[tokio::test]
    async fn test_send_alert_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", send_message_path("1:ok"))
            .match_body(Matcher::PartialJson(json!({
                "chat_id": 42,
                "parse_mode": "HTML"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"ok":true,"result":{
                    "message_id":7,
                    "from":{"id":1,"is_bot":true,"first_name":"Sentinel","username":"sentinel_bot"},
                    "chat":{"id":42,"first_name":"Ada","type":"private"},
                    "date":1700000000,
                    "text":"alert"
                }}"#,
            )
            .create_async()
            .await;

        let manager = NotificationManager::new(&server.url()).unwrap();
        let config = MonitoringConfig {
            bot_token: "1:ok".to_string(),
            chat_id: "42".to_string(),
        };

        assert!(manager.send_alert(&pair(None), &config).await);
        mock.assert_async().await;
    }

    #[test]
    fn test_invalid_api_url_rejected() {
        assert!(NotificationManager::new("not a url").is_err());
    }
}
