use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Response from GET /
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub market: String,
}

/// Response from GET /market
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketResponse {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub last_update: Option<String>,
}

/// Response from POST /buy and POST /sell
///
/// The server answers 200 with an `error` body when it rejects the amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TradeResponse {
    Filled {
        action: String,
        amount: f64,
        new_price: f64,
        timestamp: Option<String>,
    },
    Rejected {
        error: String,
    },
}

/// Envelope returned by the JSON document store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinResponse {
    pub record: Option<HashMap<String, serde_json::Value>>,
}

/// Asset entry inside a bin record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinAsset {
    pub price: f64,
    pub last_update: Option<String>,
}

/// 429 Rate limit response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitResponse {
    pub message: Option<String>,
    pub retry_after: Option<i64>,
}

/// Error type for market API operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// 400 Bad Request (also 422 validation errors)
    #[error("Bad Request: {0}")]
    BadRequest(String),
    /// 404 Not Found
    #[error("Not Found: {0}")]
    NotFound(String),
    /// 429 Too Many Requests
    #[error("Rate Limited. Retry after {retry_after} ms")]
    RateLimited { retry_after: i64 },
    /// 5xx Server Error
    #[error("Server Error ({0}): {1}")]
    ServerError(u16, String),
    /// Other HTTP errors
    #[error("HTTP Error ({0}): {1}")]
    HttpError(u16, String),
    /// Network/request error
    #[error("Request Error: {0}")]
    RequestError(String),
    /// Body was not the expected JSON
    #[error("Deserialization Error: {0}")]
    DeserializationError(String),
    /// JSON parsed but the price was missing or malformed
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
    /// Market refused a write
    #[error("Rejected: {0}")]
    Rejected(String),
}
