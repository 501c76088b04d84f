use crate::error::{AppError, Result};
use crate::services::RankFilter;
use crate::types::MarketRanking;
use crate::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

/// API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub meta: ScanMeta,
}

/// Bookkeeping for one scan.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanMeta {
    pub candidates: usize,
    pub dropped: usize,
    pub timed_out: usize,
    pub partial: bool,
    pub timestamp: i64,
}

#[derive(Debug, Serialize)]
pub struct ScanData {
    pub rankings: Vec<MarketRanking>,
}

/// Query parameters for the scan endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanQuery {
    /// Quote currency suffix, e.g. USDT.
    pub quote: Option<String>,
    /// Minimum 24h traded value.
    pub min_value: Option<f64>,
    /// Number of candidates to evaluate (clamped to 10-15).
    pub limit: Option<usize>,
}

impl ScanQuery {
    fn into_filter(self) -> Result<RankFilter> {
        if let Some(quote) = &self.quote {
            if quote.trim().is_empty() {
                return Err(AppError::BadRequest("quote must not be empty".to_string()));
            }
        }
        if let Some(min_value) = self.min_value {
            if !min_value.is_finite() || min_value < 0.0 {
                return Err(AppError::BadRequest(
                    "minValue must be a non-negative number".to_string(),
                ));
            }
        }

        Ok(RankFilter {
            quote: self.quote.map(|q| q.trim().to_string()),
            min_value: self.min_value,
            limit: self.limit,
        })
    }
}

/// GET /api/market/scan
async fn scan(
    State(state): State<AppState>,
    query: std::result::Result<Query<ScanQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<ScanData>>> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let filter = query.into_filter()?;
    let run = state.ranker.rank(&filter).await?;

    Ok(Json(ApiResponse {
        data: ScanData {
            rankings: run.rankings,
        },
        meta: ScanMeta {
            candidates: run.candidates,
            dropped: run.dropped,
            timed_out: run.timed_out,
            partial: run.partial,
            timestamp: chrono::Utc::now().timestamp_millis(),
        },
    }))
}

/// Create the market router.
pub fn router() -> Router<AppState> {
    Router::new().route("/scan", get(scan))
}
