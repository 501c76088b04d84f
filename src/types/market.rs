use serde::{Deserialize, Serialize};
use std::ops::Deref;

use crate::error::SourceError;

/// 24h ticker statistics for a single market at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerSnapshot {
    pub market: String,
    pub last_price: f64,
    pub change_percent_24h: f64,
    /// 24h traded value in quote currency.
    pub traded_value: f64,
}

impl TickerSnapshot {
    /// Check whether the market is quoted in the given currency (e.g. "USDT").
    pub fn is_quoted_in(&self, quote: &str) -> bool {
        self.market.ends_with(quote)
    }
}

/// Chronological (oldest first) closing prices for one market.
///
/// Always non-empty, every price finite and positive.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries(Vec<f64>);

impl PriceSeries {
    /// Validate and wrap a list of closing prices.
    pub fn new(prices: Vec<f64>) -> Result<Self, SourceError> {
        if prices.is_empty() {
            return Err(SourceError::Malformed("empty price series".to_string()));
        }

        if let Some(bad) = prices.iter().find(|p| !p.is_finite() || **p <= 0.0) {
            return Err(SourceError::Malformed(format!(
                "price series contains invalid close {}",
                bad
            )));
        }

        Ok(Self(prices))
    }

    /// First (oldest) price.
    pub fn first(&self) -> f64 {
        self.0[0]
    }

    /// Last (most recent) price.
    pub fn last(&self) -> f64 {
        self.0[self.0.len() - 1]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl Deref for PriceSeries {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}
