//! Relative Strength Index (RSI) indicator.

use crate::error::IndicatorError;
use crate::services::signals::{ensure_periods, Indicator};

/// RSI (Relative Strength Index) indicator.
///
/// Measures momentum by comparing the magnitude of recent gains to recent losses,
/// using Wilder smoothing. Values range from 0-100:
/// - Below 30: Oversold (potential buy signal)
/// - Above 70: Overbought (potential sell signal)
pub struct Rsi {
    period: usize,
}

impl Default for Rsi {
    fn default() -> Self {
        Self {
            period: Self::DEFAULT_PERIOD,
        }
    }
}

impl Rsi {
    pub const DEFAULT_PERIOD: usize = 14;

    /// Value reported when there is not enough history.
    pub const NEUTRAL: f64 = 50.0;

    pub fn new(period: usize) -> Self {
        Self {
            period: period.max(1),
        }
    }

    /// RSI of the series, or [`Rsi::NEUTRAL`] when history is too short.
    pub fn value_or_neutral(&self, prices: &[f64]) -> f64 {
        self.calculate(prices).unwrap_or(Self::NEUTRAL)
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn id(&self) -> &str {
        "rsi"
    }

    fn min_periods(&self) -> usize {
        self.period + 1
    }

    fn calculate(&self, prices: &[f64]) -> Result<f64, IndicatorError> {
        ensure_periods(prices, self.min_periods())?;

        let period = self.period as f64;
        let mut gains = Vec::with_capacity(prices.len() - 1);
        let mut losses = Vec::with_capacity(prices.len() - 1);

        for window in prices.windows(2) {
            let change = window[1] - window[0];
            if change > 0.0 {
                gains.push(change);
                losses.push(0.0);
            } else {
                gains.push(0.0);
                losses.push(-change);
            }
        }

        // Seed with simple averages over the first period
        let mut avg_gain: f64 = gains.iter().take(self.period).sum::<f64>() / period;
        let mut avg_loss: f64 = losses.iter().take(self.period).sum::<f64>() / period;

        for (gain, loss) in gains.iter().zip(&losses).skip(self.period) {
            avg_gain = (avg_gain * (period - 1.0) + gain) / period;
            avg_loss = (avg_loss * (period - 1.0) + loss) / period;
        }

        if avg_loss == 0.0 {
            return Ok(100.0);
        }

        let rs = avg_gain / avg_loss;
        Ok((100.0 - (100.0 / (1.0 + rs))).clamp(0.0, 100.0))
    }
}
