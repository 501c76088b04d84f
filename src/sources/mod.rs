pub mod coinex;

pub use coinex::CoinExClient;

use crate::error::SourceError;
use crate::types::TickerSnapshot;
use async_trait::async_trait;

/// Exchange data needed to rank markets.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Snapshot of every tradable market with 24h ticker stats.
    async fn list_active_markets(&self) -> Result<Vec<TickerSnapshot>, SourceError>;

    /// Recent closing prices for one market, oldest first.
    async fn price_history(
        &self,
        market: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<f64>, SourceError>;

    /// Source name for logging.
    fn source_name(&self) -> &'static str;
}
