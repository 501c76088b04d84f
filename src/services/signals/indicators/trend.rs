//! Trend classification.

use crate::types::{PriceSeries, Trend};

/// Compare the last price against the first.
///
/// Only ever yields `Bullish` or `Bearish`; an unchanged series is `Bearish`.
pub fn classify_trend(series: &PriceSeries) -> Trend {
    if series.last() > series.first() {
        Trend::Bullish
    } else {
        Trend::Bearish
    }
}
