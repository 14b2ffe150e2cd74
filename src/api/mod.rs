//! External API clients and the source traits the assembler consumes
//!
//! The traits exist so tests can substitute fakes for the live clients
//! without touching process-wide state.

pub mod alternative;
pub mod coingecko;

use chrono::NaiveDate;

pub use alternative::SentimentClient;
pub use coingecko::{ApiError, CoinDetail, CoinGeckoClient};

/// Price and market data for the report.
///
/// `coin_detail` and `historical_price` fail fast; `global_data` degrades
/// to absent values instead of erroring.
#[allow(async_fn_in_trait)]
pub trait PriceSource {
    async fn coin_detail(&self, coin_id: &str) -> Result<CoinDetail, ApiError>;
    async fn historical_price(&self, coin_id: &str, date: NaiveDate) -> Result<f64, ApiError>;
    async fn global_data(&self) -> (Option<f64>, Option<f64>);
}

/// Crowd-sentiment score source; absent on any failure.
#[allow(async_fn_in_trait)]
pub trait SentimentSource {
    async fn sentiment_index(&self) -> Option<u8>;
}
