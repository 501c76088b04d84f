pub mod ranker;
pub mod scoring;
pub mod signals;

pub use ranker::{MarketRanker, RankFilter, RankingRun};
pub use scoring::{Scorer, ScoringProfile, ScoringWeights};
pub use signals::SignalEngine;
