//! Concurrent market ranking.
//!
//! Selects the most liquid candidates from the exchange universe, evaluates
//! each one concurrently and returns them ordered by score.

use crate::config::{clamp_top_k, ScanConfig};
use crate::error::{AppError, Result, SourceError};
use crate::services::scoring::Scorer;
use crate::services::signals::SignalEngine;
use crate::sources::MarketDataSource;
use crate::types::{MarketRanking, PriceSeries, TickerSnapshot};
use futures_util::stream::{FuturesUnordered, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Per-request overrides of the configured scan filter.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankFilter {
    pub quote: Option<String>,
    pub min_value: Option<f64>,
    pub limit: Option<usize>,
}

/// Outcome of one ranking run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingRun {
    /// Evaluated markets, highest score first.
    pub rankings: Vec<MarketRanking>,
    /// Candidates selected for evaluation.
    pub candidates: usize,
    /// Candidates dropped because their data could not be used.
    pub dropped: usize,
    /// Candidates still in flight when the deadline expired.
    pub timed_out: usize,
    /// True when the deadline cut the run short.
    pub partial: bool,
}

/// Ranks exchange markets by composite signal score.
pub struct MarketRanker {
    source: Arc<dyn MarketDataSource>,
    config: ScanConfig,
    signals: SignalEngine,
    scorer: Scorer,
}

impl MarketRanker {
    pub fn new(source: Arc<dyn MarketDataSource>, config: ScanConfig) -> Arc<Self> {
        Arc::new(Self {
            source,
            signals: SignalEngine::new(config.rsi_period),
            scorer: Scorer::new(config.scoring_profile.weights()),
            config,
        })
    }

    pub fn source_name(&self) -> &'static str {
        self.source.source_name()
    }

    /// List the exchange universe and rank it.
    ///
    /// Fails only when the universe itself cannot be listed.
    pub async fn rank(&self, filter: &RankFilter) -> Result<RankingRun> {
        let universe = self
            .source
            .list_active_markets()
            .await
            .map_err(AppError::AggregationFailed)?;

        Ok(self.rank_universe(universe, filter).await)
    }

    /// Rank an already listed universe.
    pub async fn rank_universe(
        &self,
        universe: Vec<TickerSnapshot>,
        filter: &RankFilter,
    ) -> RankingRun {
        let started = Instant::now();
        let universe_size = universe.len();

        let quote = filter
            .quote
            .as_deref()
            .map(str::to_uppercase)
            .unwrap_or_else(|| self.config.quote_asset.clone());
        let min_value = filter.min_value.unwrap_or(self.config.min_traded_value);
        let top_k = filter.limit.map(clamp_top_k).unwrap_or(self.config.top_k);

        let candidates = select_candidates(universe, &quote, min_value, top_k);
        let candidate_count = candidates.len();

        debug!(
            "Selected {} of {} markets (quote={}, min_value={}, k={})",
            candidate_count, universe_size, quote, min_value, top_k
        );

        let mut pending: FuturesUnordered<_> = candidates
            .into_iter()
            .map(|ticker| self.evaluate(ticker))
            .collect();

        let mut rankings = Vec::with_capacity(candidate_count);
        let mut dropped = 0;
        let mut timed_out = 0;

        let deadline = tokio::time::sleep(self.config.deadline);
        tokio::pin!(deadline);

        loop {
            tokio::select! {
                biased;
                next = pending.next() => match next {
                    Some(Some(ranking)) => rankings.push(ranking),
                    Some(None) => dropped += 1,
                    None => break,
                },
                _ = &mut deadline => {
                    timed_out = pending.len();
                    warn!(
                        "Scan deadline of {:?} expired with {} candidates in flight, returning partial results",
                        self.config.deadline, timed_out
                    );
                    break;
                }
            }
        }
        // Cancels anything still in flight
        drop(pending);

        sort_by_score(&mut rankings);

        info!(
            "Ranked {} markets in {:?} ({} dropped, {} timed out)",
            rankings.len(),
            started.elapsed(),
            dropped,
            timed_out
        );

        RankingRun {
            rankings,
            candidates: candidate_count,
            dropped,
            timed_out,
            partial: timed_out > 0,
        }
    }

    /// Evaluate one candidate, or `None` if its data could not be used.
    async fn evaluate(&self, ticker: TickerSnapshot) -> Option<MarketRanking> {
        match self.try_evaluate(&ticker).await {
            Ok(ranking) => {
                debug!("{} scored {}", ranking.market, ranking.score);
                Some(ranking)
            }
            Err(e) => {
                warn!(
                    "Dropping {} from {} scan: {}",
                    ticker.market,
                    self.source.source_name(),
                    e
                );
                None
            }
        }
    }

    async fn try_evaluate(
        &self,
        ticker: &TickerSnapshot,
    ) -> std::result::Result<MarketRanking, SourceError> {
        let closes = self
            .source
            .price_history(
                &ticker.market,
                &self.config.kline_interval,
                self.config.kline_limit,
            )
            .await?;
        let series = PriceSeries::new(closes)?;

        let signals = self.signals.derive(&series);
        let score = self
            .scorer
            .score(&signals, ticker.traded_value, self.config.assumed_spread);

        Ok(MarketRanking {
            market: ticker.market.clone(),
            score,
            price: ticker.last_price,
            change_24h: ticker.change_percent_24h,
            volume: ticker.traded_value,
            signals,
        })
    }
}

/// Keep quoted, liquid markets and take the `k` most liquid.
pub fn select_candidates(
    universe: Vec<TickerSnapshot>,
    quote: &str,
    min_value: f64,
    k: usize,
) -> Vec<TickerSnapshot> {
    let mut candidates: Vec<TickerSnapshot> = universe
        .into_iter()
        .filter(|t| t.is_quoted_in(quote) && t.traded_value >= min_value)
        .collect();

    candidates.sort_by(|a, b| b.traded_value.total_cmp(&a.traded_value));
    candidates.truncate(k);
    candidates
}

/// Highest score first. Stable, so ties keep arrival order.
pub fn sort_by_score(rankings: &mut [MarketRanking]) {
    rankings.sort_by(|a, b| b.score.cmp(&a.score));
}
