use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

/// Current price and one-year change for a tracked coin, in the
/// reference currency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoinDetail {
    pub price: f64,
    pub change_1y: f64,
}

/// Response body of GET `coins/{id}` (the subset we read).
#[derive(Debug, Clone, Deserialize)]
pub struct CoinDetailResponse {
    pub market_data: MarketData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarketData {
    /// Price keyed by currency code.
    pub current_price: HashMap<String, f64>,
    pub price_change_percentage_1y: Option<f64>,
}

/// Errors from the market-data API clients
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// 429 Too Many Requests; handled by the retry loop, never surfaced
    /// under the default unbounded policy.
    #[error("rate limited by upstream")]
    RateLimited,
    #[error("gave up after {0} rate-limited attempts")]
    RetriesExhausted(u32),
    /// Any non-429 HTTP error status
    #[error("upstream HTTP error {status}: {body}")]
    Http { status: u16, body: String },
    /// Network-level failure before a response was received
    #[error("transport error: {0}")]
    Transport(String),
    /// Response body could not be decoded
    #[error("deserialization error: {0}")]
    Deserialize(String),
    /// Expected field absent from an otherwise well-formed response
    #[error("missing field in response: {0}")]
    MissingField(String),
}
