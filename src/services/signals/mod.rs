//! Technical signals service module.
//!
//! Provides the indicator library and derives the per-market
//! [`SignalSet`] consumed by the scoring engine.

pub mod indicators;

use crate::error::IndicatorError;
use crate::types::{MomentumSnapshot, PriceSeries, SignalSet};
use indicators::{classify_trend, Macd, Rsi, Volatility};
use tracing::debug;

/// Trait for implementing technical indicators over closing prices.
pub trait Indicator: Send + Sync {
    /// Value produced by the indicator.
    type Output;

    /// Unique identifier for this indicator.
    fn id(&self) -> &str;

    /// Minimum number of prices required for calculation.
    fn min_periods(&self) -> usize;

    /// Calculate the indicator from chronological closing prices.
    fn calculate(&self, prices: &[f64]) -> Result<Self::Output, IndicatorError>;
}

/// Fail with `InsufficientData` unless at least `required` prices are present.
pub fn ensure_periods(prices: &[f64], required: usize) -> Result<(), IndicatorError> {
    if prices.len() < required {
        return Err(IndicatorError::InsufficientData {
            required,
            available: prices.len(),
        });
    }
    Ok(())
}

/// Derives a [`SignalSet`] from a price series.
pub struct SignalEngine {
    rsi: Rsi,
    volatility: Volatility,
    macd: Macd,
}

impl Default for SignalEngine {
    fn default() -> Self {
        Self::new(Rsi::DEFAULT_PERIOD)
    }
}

impl SignalEngine {
    pub fn new(rsi_period: usize) -> Self {
        Self {
            rsi: Rsi::new(rsi_period),
            volatility: Volatility,
            macd: Macd::new(),
        }
    }

    /// Compute all signals for a series. Short history degrades to
    /// neutral values instead of failing.
    pub fn derive(&self, series: &PriceSeries) -> SignalSet {
        let rsi = self.rsi.value_or_neutral(series);
        let volatility = self.volatility.calculate(series).unwrap_or(0.0);

        let momentum = match self.macd.calculate(series) {
            Ok(output) => Some(MomentumSnapshot {
                macd: output.macd,
                signal: output.signal,
                histogram: output.histogram,
            }),
            Err(e) => {
                debug!("{} unavailable: {}", self.macd.id(), e);
                None
            }
        };

        SignalSet {
            rsi,
            trend: classify_trend(series),
            volatility,
            momentum,
        }
    }
}
