//! Exponential Moving Average (EMA) indicator.

use crate::error::IndicatorError;
use crate::services::signals::{ensure_periods, Indicator};

/// EMA (Exponential Moving Average) indicator.
///
/// Seeded with the simple mean of the first `period` prices, then
/// smoothed with `k = 2 / (period + 1)` over the remainder.
pub struct Ema {
    period: usize,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Indicator for Ema {
    type Output = f64;

    fn id(&self) -> &str {
        match self.period {
            12 => "ema12",
            26 => "ema26",
            _ => "ema",
        }
    }

    fn min_periods(&self) -> usize {
        self.period.max(1)
    }

    fn calculate(&self, prices: &[f64]) -> Result<f64, IndicatorError> {
        ensure_periods(prices, self.min_periods())?;

        let period = self.min_periods();
        let multiplier = 2.0 / (period as f64 + 1.0);

        // First EMA is SMA
        let sma: f64 = prices.iter().take(period).sum::<f64>() / period as f64;

        let mut ema = sma;
        for price in prices.iter().skip(period) {
            ema = (price - ema) * multiplier + ema;
        }

        Ok(ema)
    }
}
