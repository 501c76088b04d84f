use serde::{Deserialize, Serialize};

/// Direction of the price series over the evaluated window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Trend {
    Bullish,
    Bearish,
    /// Modeled on the wire but never produced by trend classification.
    Neutral,
}

/// MACD approximation values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MomentumSnapshot {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Signals derived from a single price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalSet {
    /// 0-100, 50 when history is too short.
    pub rsi: f64,
    pub trend: Trend,
    /// Coefficient of variation, never negative.
    pub volatility: f64,
    /// Absent when history is shorter than the slow EMA.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub momentum: Option<MomentumSnapshot>,
}

/// One scored market in a ranking run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketRanking {
    pub market: String,
    /// Composite score, 0-100.
    pub score: u8,
    pub price: f64,
    pub change_24h: f64,
    pub volume: f64,
    pub signals: SignalSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_ranking() -> MarketRanking {
        MarketRanking {
            market: "SOLUSDT".to_string(),
            score: 65,
            price: 100.0,
            change_24h: 5.0,
            volume: 50_000_000.0,
            signals: SignalSet {
                rsi: 55.5,
                trend: Trend::Bullish,
                volatility: 0.012,
                momentum: None,
            },
        }
    }

    #[test]
    fn test_trend_serialization() {
        assert_eq!(serde_json::to_string(&Trend::Bullish).unwrap(), "\"BULLISH\"");
        assert_eq!(serde_json::to_string(&Trend::Bearish).unwrap(), "\"BEARISH\"");
        assert_eq!(serde_json::to_string(&Trend::Neutral).unwrap(), "\"NEUTRAL\"");
    }

    #[test]
    fn test_ranking_wire_field_names() {
        let value = serde_json::to_value(sample_ranking()).unwrap();
        assert_eq!(value["market"], "SOLUSDT");
        assert_eq!(value["score"], 65);
        assert_eq!(value["price"], 100.0);
        assert_eq!(value["change24h"], 5.0);
        assert_eq!(value["volume"], 50_000_000.0);
        assert_eq!(value["signals"]["rsi"], 55.5);
        assert_eq!(value["signals"]["trend"], "BULLISH");
        assert_eq!(value["signals"]["volatility"], 0.012);
    }

    #[test]
    fn test_momentum_omitted_when_unavailable() {
        let json = serde_json::to_string(&sample_ranking()).unwrap();
        assert!(!json.contains("momentum"));
    }

    #[test]
    fn test_momentum_serialized_when_present() {
        let mut ranking = sample_ranking();
        ranking.signals.momentum = Some(MomentumSnapshot {
            macd: 1.0,
            signal: 0.9,
            histogram: 0.1,
        });
        let value = serde_json::to_value(ranking).unwrap();
        assert_eq!(value["signals"]["momentum"]["macd"], 1.0);
        assert_eq!(value["signals"]["momentum"]["histogram"], 0.1);
    }

    #[test]
    fn test_ranking_deserialization() {
        let json = r#"{
            "market": "BTCUSDT",
            "score": 80,
            "price": 43500.5,
            "change24h": -1.25,
            "volume": 2175000000.0,
            "signals": { "rsi": 28.0, "trend": "BEARISH", "volatility": 0.05 }
        }"#;

        let ranking: MarketRanking = serde_json::from_str(json).unwrap();
        assert_eq!(ranking.score, 80);
        assert_eq!(ranking.signals.trend, Trend::Bearish);
        assert!(ranking.signals.momentum.is_none());
    }
}
