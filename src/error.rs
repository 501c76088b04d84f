use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Indicator calculation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndicatorError {
    #[error("Insufficient data: need {required} prices, have {available}")]
    InsufficientData { required: usize, available: usize },
}

/// Errors raised while fetching data for a single market.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Source unavailable: {0}")]
    Unavailable(String),

    #[error("Exchange API error {code}: {message}")]
    Api { code: i64, message: String },

    #[error("Malformed data: {0}")]
    Malformed(String),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
}

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Aggregation failed: {0}")]
    AggregationFailed(#[source] SourceError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::AggregationFailed(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
