//! Volatility as coefficient of variation.

use crate::error::IndicatorError;
use crate::services::signals::Indicator;

/// Sample standard deviation divided by the mean.
///
/// Scale-invariant; returns 0 for fewer than two prices.
#[derive(Debug, Clone, Copy, Default)]
pub struct Volatility;

impl Indicator for Volatility {
    type Output = f64;

    fn id(&self) -> &str {
        "volatility"
    }

    fn min_periods(&self) -> usize {
        2
    }

    fn calculate(&self, prices: &[f64]) -> Result<f64, IndicatorError> {
        let n = prices.len();
        if n < self.min_periods() {
            return Ok(0.0);
        }

        // Ratio is scale-invariant, so work relative to the largest price
        // to keep sums of huge prices finite.
        let peak = prices.iter().fold(0.0_f64, |acc, p| acc.max(p.abs()));
        if !peak.is_finite() || peak == 0.0 {
            return Ok(0.0);
        }

        let mean = prices.iter().map(|p| p / peak).sum::<f64>() / n as f64;
        if mean <= 0.0 {
            return Ok(0.0);
        }

        let variance = prices
            .iter()
            .map(|p| (p / peak - mean).powi(2))
            .sum::<f64>()
            / (n - 1) as f64;

        Ok(variance.sqrt() / mean)
    }
}
