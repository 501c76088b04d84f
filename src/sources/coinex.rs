use crate::error::SourceError;
use crate::sources::MarketDataSource;
use crate::types::TickerSnapshot;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

pub const COINEX_API_URL: &str = "https://api.coinex.com/v2";

/// Bytes of an error body kept in logs.
const ERROR_BODY_LIMIT: usize = 200;

/// CoinEx response envelope.
#[derive(Debug, Deserialize)]
struct CoinExResponse<T> {
    code: i64,
    data: Option<T>,
    #[serde(default)]
    message: String,
}

impl<T> CoinExResponse<T> {
    fn into_data(self) -> Result<T, SourceError> {
        if self.code != 0 {
            return Err(SourceError::Api {
                code: self.code,
                message: self.message,
            });
        }
        self.data
            .ok_or_else(|| SourceError::Malformed("response has no data".to_string()))
    }
}

/// CoinEx 24h spot ticker.
#[derive(Debug, Deserialize)]
struct CoinExTicker {
    market: String,
    last: String,
    open: String,
    value: String,
}

/// CoinEx spot kline.
#[derive(Debug, Deserialize)]
struct CoinExKline {
    market: String,
    created_at: i64,
    close: String,
}

/// CoinEx public REST client.
#[derive(Clone)]
pub struct CoinExClient {
    client: Client,
    base_url: String,
}

impl CoinExClient {
    /// Create a new CoinEx client.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .user_agent("Sentinel/1.0")
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, SourceError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(&url).query(query).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(
                "CoinEx API returned {}: {}",
                status,
                truncate_body(&text, ERROR_BODY_LIMIT)
            );
            return Err(SourceError::Unavailable(format!(
                "CoinEx API error: {}",
                status
            )));
        }

        let body: CoinExResponse<T> = response.json().await?;
        body.into_data()
    }
}

#[async_trait]
impl MarketDataSource for CoinExClient {
    async fn list_active_markets(&self) -> Result<Vec<TickerSnapshot>, SourceError> {
        let tickers: Vec<CoinExTicker> = self.get("/spot/ticker", &[]).await?;
        let total = tickers.len();
        let snapshots = parse_tickers(tickers);

        debug!(
            "CoinEx listed {} markets ({} usable)",
            total,
            snapshots.len()
        );
        Ok(snapshots)
    }

    async fn price_history(
        &self,
        market: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<f64>, SourceError> {
        let query = [
            ("market", market.to_string()),
            ("period", interval.to_string()),
            ("limit", limit.to_string()),
        ];
        let klines: Vec<CoinExKline> = self.get("/spot/kline", &query).await?;
        parse_closes(klines)
    }

    fn source_name(&self) -> &'static str {
        "coinex"
    }
}

/// Convert raw tickers, skipping entries with unparsable or non-positive prices.
fn parse_tickers(tickers: Vec<CoinExTicker>) -> Vec<TickerSnapshot> {
    tickers
        .into_iter()
        .filter_map(|ticker| {
            let last: f64 = ticker.last.parse().ok()?;
            let value: f64 = ticker.value.parse().ok()?;
            if last <= 0.0 {
                return None;
            }

            let open: f64 = ticker.open.parse().unwrap_or(0.0);
            let change_percent_24h = if open > 0.0 {
                (last - open) / open * 100.0
            } else {
                0.0
            };

            Some(TickerSnapshot {
                market: ticker.market,
                last_price: last,
                change_percent_24h,
                traded_value: value,
            })
        })
        .collect()
}

/// Cut `text` to at most `max` bytes without splitting a character.
fn truncate_body(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Closing prices ordered by candle time.
fn parse_closes(mut klines: Vec<CoinExKline>) -> Result<Vec<f64>, SourceError> {
    klines.sort_by_key(|k| k.created_at);
    klines
        .iter()
        .map(|k| {
            k.close.parse::<f64>().map_err(|_| {
                SourceError::Malformed(format!("{}: bad close '{}'", k.market, k.close))
            })
        })
        .collect()
}
