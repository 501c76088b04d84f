use std::env;
use std::time::Duration;

use crate::services::scoring::ScoringProfile;
use crate::services::signals::indicators::Rsi;
use crate::sources::coinex::COINEX_API_URL;

/// Smallest number of candidates evaluated per run.
pub const MIN_TOP_K: usize = 10;
/// Largest number of candidates evaluated per run.
pub const MAX_TOP_K: usize = 15;

/// Market scan configuration.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Quote currency suffix markets must carry (e.g. "USDT").
    pub quote_asset: String,
    /// Minimum 24h traded value in quote currency.
    pub min_traded_value: f64,
    /// Number of most liquid candidates to evaluate.
    pub top_k: usize,
    /// Kline interval passed to the exchange.
    pub kline_interval: String,
    /// Number of klines requested per candidate.
    pub kline_limit: usize,
    /// Overall deadline for one ranking run.
    pub deadline: Duration,
    /// Relative spread assumed when the exchange does not report one.
    pub assumed_spread: f64,
    /// RSI lookback period.
    pub rsi_period: usize,
    /// Scoring weight profile.
    pub scoring_profile: ScoringProfile,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            quote_asset: "USDT".to_string(),
            min_traded_value: 20_000.0,
            top_k: MIN_TOP_K,
            kline_interval: "1hour".to_string(),
            kline_limit: 50,
            deadline: Duration::from_millis(8_000),
            assumed_spread: 0.001,
            rsi_period: Rsi::DEFAULT_PERIOD,
            scoring_profile: ScoringProfile::Standard,
        }
    }
}

/// Clamp a requested candidate count into the supported range.
pub fn clamp_top_k(k: usize) -> usize {
    k.clamp(MIN_TOP_K, MAX_TOP_K)
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// CoinEx REST base URL.
    pub coinex_api_url: String,
    /// Per-request HTTP timeout for exchange calls.
    pub http_timeout: Duration,
    /// Market scan settings.
    pub scan: ScanConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = ScanConfig::default();

        let scan = ScanConfig {
            quote_asset: env::var("SCAN_QUOTE_ASSET")
                .ok()
                .filter(|v| !v.is_empty())
                .map(|v| v.to_uppercase())
                .unwrap_or(defaults.quote_asset),
            min_traded_value: env::var("SCAN_MIN_VALUE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.min_traded_value),
            top_k: env::var("SCAN_TOP_K")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(clamp_top_k)
                .unwrap_or(defaults.top_k),
            kline_interval: env::var("SCAN_KLINE_INTERVAL").unwrap_or(defaults.kline_interval),
            kline_limit: env::var("SCAN_KLINE_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.kline_limit),
            deadline: env::var("SCAN_DEADLINE_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.deadline),
            assumed_spread: env::var("SCAN_ASSUMED_SPREAD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.assumed_spread),
            rsi_period: env::var("RSI_PERIOD")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|p: &usize| *p > 0)
                .unwrap_or(defaults.rsi_period),
            scoring_profile: env::var("SCORING_PROFILE")
                .ok()
                .and_then(|v| ScoringProfile::from_str(&v))
                .unwrap_or(defaults.scoring_profile),
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3001),
            coinex_api_url: env::var("COINEX_API_URL")
                .unwrap_or_else(|_| COINEX_API_URL.to_string()),
            http_timeout: env::var("HTTP_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(Duration::from_secs(5)),
            scan,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // ScanConfig Tests
    // =========================================================================

    #[test]
    fn test_scan_config_defaults() {
        let scan = ScanConfig::default();
        assert_eq!(scan.quote_asset, "USDT");
        assert_eq!(scan.min_traded_value, 20_000.0);
        assert_eq!(scan.top_k, 10);
        assert_eq!(scan.kline_interval, "1hour");
        assert_eq!(scan.kline_limit, 50);
        assert_eq!(scan.deadline, Duration::from_secs(8));
        assert_eq!(scan.rsi_period, 14);
        assert_eq!(scan.scoring_profile, ScoringProfile::Standard);
    }

    #[test]
    fn test_clamp_top_k() {
        assert_eq!(clamp_top_k(0), 10);
        assert_eq!(clamp_top_k(12), 12);
        assert_eq!(clamp_top_k(15), 15);
        assert_eq!(clamp_top_k(100), 15);
    }

    #[test]
    fn test_scan_config_clone() {
        let scan = ScanConfig {
            quote_asset: "USDC".to_string(),
            ..ScanConfig::default()
        };
        let cloned = scan.clone();
        assert_eq!(cloned.quote_asset, "USDC");
        assert_eq!(cloned.top_k, scan.top_k);
    }

    // =========================================================================
    // Config Tests
    // =========================================================================

    #[test]
    fn test_config_creation() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            coinex_api_url: COINEX_API_URL.to_string(),
            http_timeout: Duration::from_secs(5),
            scan: ScanConfig::default(),
        };

        assert_eq!(config.port, 8080);
        assert!(config.coinex_api_url.starts_with("https://"));
    }

    #[test]
    fn test_config_from_env_is_valid() {
        // Note: This test may be affected by environment variables
        let config = Config::from_env();
        assert!(!config.host.is_empty());
        assert!(config.scan.top_k >= MIN_TOP_K && config.scan.top_k <= MAX_TOP_K);
        assert!(config.scan.rsi_period > 0);
    }
}
