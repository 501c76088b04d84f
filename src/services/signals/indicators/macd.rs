//! MACD (Moving Average Convergence Divergence) approximation.

use crate::error::IndicatorError;
use crate::services::signals::indicators::Ema;
use crate::services::signals::{ensure_periods, Indicator};

/// Derives the MACD signal line from the current MACD value.
///
/// A true signal line is an EMA over past MACD values, which requires
/// history retained between evaluations. Implementations that keep such
/// history can be swapped in behind this trait.
pub trait SignalLine: Send + Sync {
    fn signal(&self, macd: f64) -> f64;
}

/// Stateless signal line: a fixed fraction of the current MACD value.
///
/// This is an approximation, not a 9-period EMA of MACD.
#[derive(Debug, Clone, Copy)]
pub struct FractionalSignal {
    ratio: f64,
}

impl FractionalSignal {
    pub const DEFAULT_RATIO: f64 = 0.9;

    pub fn new(ratio: f64) -> Self {
        Self { ratio }
    }
}

impl Default for FractionalSignal {
    fn default() -> Self {
        Self::new(Self::DEFAULT_RATIO)
    }
}

impl SignalLine for FractionalSignal {
    fn signal(&self, macd: f64) -> f64 {
        macd * self.ratio
    }
}

/// MACD values for the most recent price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdOutput {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// MACD momentum indicator.
///
/// - MACD Line = EMA(fast) over the last `fast` prices - EMA(slow) over the last `slow` prices
/// - Signal Line = provided by a [`SignalLine`]
/// - Histogram = MACD Line - Signal Line
pub struct Macd<S: SignalLine = FractionalSignal> {
    fast_period: usize,
    slow_period: usize,
    signal_line: S,
}

impl Macd {
    /// Standard 12/26 MACD with the fractional signal line.
    pub fn new() -> Self {
        Self::with_signal_line(FractionalSignal::default())
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SignalLine> Macd<S> {
    pub fn with_signal_line(signal_line: S) -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_line,
        }
    }
}

impl<S: SignalLine> Indicator for Macd<S> {
    type Output = MacdOutput;

    fn id(&self) -> &str {
        "macd"
    }

    fn min_periods(&self) -> usize {
        self.slow_period
    }

    fn calculate(&self, prices: &[f64]) -> Result<MacdOutput, IndicatorError> {
        ensure_periods(prices, self.min_periods())?;

        let len = prices.len();
        let fast = Ema::new(self.fast_period).calculate(&prices[len - self.fast_period..])?;
        let slow = Ema::new(self.slow_period).calculate(&prices[len - self.slow_period..])?;

        let macd = fast - slow;
        let signal = self.signal_line.signal(macd);

        Ok(MacdOutput {
            macd,
            signal,
            histogram: macd - signal,
        })
    }
}
