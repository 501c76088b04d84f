//! Sentinel - Concurrent market scanner ranking exchange markets by technical signals

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

use config::Config;
use services::MarketRanker;
use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub ranker: Arc<MarketRanker>,
}

// Re-export commonly used types
pub use error::{AppError, IndicatorError, SourceError};
pub use services::{RankFilter, RankingRun};
pub use sources::MarketDataSource;
pub use types::*;
