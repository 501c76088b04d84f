//! Composite market scoring.
//!
//! Turns a [`SignalSet`] plus liquidity and spread figures into a 0-100
//! score. Every threshold and point adjustment lives in [`ScoringWeights`]
//! so the heuristic can be tuned without touching the algorithm.

use crate::types::{SignalSet, Trend};
use serde::{Deserialize, Serialize};

/// Named scoring profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScoringProfile {
    /// Mean reversion with a healthy-momentum band. Canonical default.
    #[default]
    Standard,
    /// Heavier RSI extremes, MACD histogram and breakout volume confirmation.
    Breakout,
}

impl ScoringProfile {
    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "standard" | "default" => Some(Self::Standard),
            "breakout" => Some(Self::Breakout),
            _ => None,
        }
    }

    /// Weight table for this profile.
    pub fn weights(&self) -> ScoringWeights {
        match self {
            Self::Standard => ScoringWeights::default(),
            Self::Breakout => ScoringWeights {
                rsi_oversold: 25,
                rsi_overbought: -20,
                rsi_healthy: 0,
                momentum_positive: 15,
                momentum_negative: -10,
                liquidity_bonus: 20,
                ..ScoringWeights::default()
            },
        }
    }
}

/// Thresholds and point adjustments used by [`Scorer`].
///
/// Adjustments are signed and added to the running score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringWeights {
    pub baseline: i32,

    pub rsi_oversold_below: f64,
    pub rsi_oversold: i32,
    pub rsi_overbought_above: f64,
    pub rsi_overbought: i32,
    /// Healthy band is `[rsi_healthy_min, rsi_healthy_max)`.
    pub rsi_healthy_min: f64,
    pub rsi_healthy_max: f64,
    pub rsi_healthy: i32,

    pub trend_bullish: i32,
    pub trend_bearish: i32,

    /// Applied only when the MACD approximation is available.
    pub momentum_positive: i32,
    pub momentum_negative: i32,

    /// Traded value (quote currency) above which the liquidity bonus applies.
    pub liquidity_threshold: f64,
    pub liquidity_bonus: i32,

    pub volatility_threshold: f64,
    pub volatility_penalty: i32,

    /// Applied when spread is below volatility.
    pub spread_bonus: i32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            baseline: 50,
            rsi_oversold_below: 30.0,
            rsi_oversold: 20,
            rsi_overbought_above: 70.0,
            rsi_overbought: -15,
            rsi_healthy_min: 50.0,
            rsi_healthy_max: 65.0,
            rsi_healthy: 5,
            trend_bullish: 10,
            trend_bearish: -10,
            momentum_positive: 0,
            momentum_negative: 0,
            liquidity_threshold: 1_000_000.0,
            liquidity_bonus: 10,
            volatility_threshold: 0.04,
            volatility_penalty: -15,
            spread_bonus: 5,
        }
    }
}

pub const MIN_SCORE: i32 = 0;
pub const MAX_SCORE: i32 = 100;

/// Scores markets with a fixed weight table.
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    weights: ScoringWeights,
}

impl Scorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Composite score in `[0, 100]`.
    ///
    /// `volume` is the 24h traded value, `spread` the relative bid/ask spread.
    pub fn score(&self, signals: &SignalSet, volume: f64, spread: f64) -> u8 {
        let w = &self.weights;
        let mut score = w.baseline;

        // Mean reversion
        if signals.rsi < w.rsi_oversold_below {
            score += w.rsi_oversold;
        } else if signals.rsi > w.rsi_overbought_above {
            score += w.rsi_overbought;
        } else if signals.rsi >= w.rsi_healthy_min && signals.rsi < w.rsi_healthy_max {
            score += w.rsi_healthy;
        }

        score += match signals.trend {
            Trend::Bullish => w.trend_bullish,
            Trend::Bearish => w.trend_bearish,
            Trend::Neutral => 0,
        };

        if let Some(momentum) = &signals.momentum {
            score += if momentum.histogram > 0.0 {
                w.momentum_positive
            } else {
                w.momentum_negative
            };
        }

        // Breakout confirmation
        if volume > w.liquidity_threshold {
            score += w.liquidity_bonus;
        }

        if signals.volatility > w.volatility_threshold {
            score += w.volatility_penalty;
        }
        if spread < signals.volatility {
            score += w.spread_bonus;
        }

        score.clamp(MIN_SCORE, MAX_SCORE) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MomentumSnapshot;

    fn signals(rsi: f64, trend: Trend, volatility: f64) -> SignalSet {
        SignalSet {
            rsi,
            trend,
            volatility,
            momentum: None,
        }
    }

    #[test]
    fn test_profile_from_str() {
        assert_eq!(ScoringProfile::from_str("standard"), Some(ScoringProfile::Standard));
        assert_eq!(ScoringProfile::from_str("BREAKOUT"), Some(ScoringProfile::Breakout));
        assert_eq!(ScoringProfile::from_str("aggressive"), None);
    }

    #[test]
    fn test_default_profile_is_standard() {
        assert_eq!(ScoringProfile::default(), ScoringProfile::Standard);
        assert_eq!(ScoringProfile::Standard.weights(), ScoringWeights::default());
    }

    #[test]
    fn test_neutral_inputs_keep_baseline() {
        let scorer = Scorer::default();
        // rsi 40 sits outside every band, neutral trend, low volume, spread above volatility
        let score = scorer.score(&signals(40.0, Trend::Neutral, 0.01), 500.0, 0.02);
        assert_eq!(score, 50);
    }

    #[test]
    fn test_oversold_bullish_liquid() {
        let scorer = Scorer::default();
        // 50 + 20 + 10 + 10 + 5
        let score = scorer.score(&signals(25.0, Trend::Bullish, 0.02), 2_000_000.0, 0.001);
        assert_eq!(score, 95);
    }

    #[test]
    fn test_overbought_bearish_volatile() {
        let scorer = Scorer::default();
        // 50 - 15 - 10 - 15 + 5
        let score = scorer.score(&signals(80.0, Trend::Bearish, 0.08), 10.0, 0.001);
        assert_eq!(score, 15);
    }

    #[test]
    fn test_healthy_band_edges() {
        let scorer = Scorer::default();
        let at = |rsi| scorer.score(&signals(rsi, Trend::Neutral, 0.0), 0.0, 0.0);
        assert_eq!(at(50.0), 55);
        assert_eq!(at(64.9), 55);
        assert_eq!(at(65.0), 50);
        assert_eq!(at(49.9), 50);
    }

    #[test]
    fn test_rsi_thresholds_are_strict() {
        let scorer = Scorer::default();
        let at = |rsi| scorer.score(&signals(rsi, Trend::Neutral, 0.0), 0.0, 0.0);
        assert_eq!(at(30.0), 50);
        assert_eq!(at(70.0), 50);
        assert_eq!(at(29.99), 70);
        assert_eq!(at(70.01), 35);
    }

    #[test]
    fn test_momentum_ignored_by_standard_profile() {
        let scorer = Scorer::default();
        let mut set = signals(40.0, Trend::Neutral, 0.0);
        let without = scorer.score(&set, 0.0, 0.0);
        set.momentum = Some(MomentumSnapshot {
            macd: 2.0,
            signal: 1.8,
            histogram: 0.2,
        });
        assert_eq!(scorer.score(&set, 0.0, 0.0), without);
    }

    #[test]
    fn test_breakout_profile() {
        let scorer = Scorer::new(ScoringProfile::Breakout.weights());
        let mut set = signals(20.0, Trend::Bullish, 0.01);
        set.momentum = Some(MomentumSnapshot {
            macd: 2.0,
            signal: 1.8,
            histogram: 0.2,
        });
        // 50 + 25 + 10 + 15 + 20 + 5 = 125 -> clamped
        assert_eq!(scorer.score(&set, 5_000_000.0, 0.001), 100);

        set.rsi = 55.0;
        set.momentum = Some(MomentumSnapshot {
            macd: -2.0,
            signal: -1.8,
            histogram: -0.2,
        });
        // 50 + 0 + 10 - 10 + 20 + 5
        assert_eq!(scorer.score(&set, 5_000_000.0, 0.001), 75);
    }

    #[test]
    fn test_score_clamped_at_zero() {
        let weights = ScoringWeights {
            baseline: 10,
            ..ScoringWeights::default()
        };
        let scorer = Scorer::new(weights);
        let score = scorer.score(&signals(90.0, Trend::Bearish, 0.5), 0.0, 1.0);
        assert_eq!(score, 0);
    }

    #[test]
    fn test_score_always_in_range() {
        let trends = [Trend::Bullish, Trend::Bearish, Trend::Neutral];
        let histograms = [None, Some(-1.0), Some(0.0), Some(1.0)];

        for profile in [ScoringProfile::Standard, ScoringProfile::Breakout] {
            let scorer = Scorer::new(profile.weights());
            for rsi in [0.0, 15.0, 29.9, 30.0, 50.0, 64.0, 70.0, 85.0, 100.0] {
                for trend in trends {
                    for histogram in histograms {
                        for volatility in [0.0, 0.01, 0.04, 0.2, 3.0] {
                            for volume in [0.0, 1_000_000.0, 1e12] {
                                for spread in [0.0, 0.001, 1.0] {
                                    let set = SignalSet {
                                        rsi,
                                        trend,
                                        volatility,
                                        momentum: histogram.map(|h| MomentumSnapshot {
                                            macd: h,
                                            signal: 0.0,
                                            histogram: h,
                                        }),
                                    };
                                    let score = scorer.score(&set, volume, spread);
                                    assert!(score <= 100, "{:?} gave {}", profile, score);
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
