//! Report models

use chrono::{DateTime, Utc};

/// One coin's values for a single run, already formatted for display.
#[derive(Debug, Clone)]
pub struct CoinSnapshot {
    /// Capitalized coin name, e.g. "Bitcoin".
    pub coin: String,
    /// Current price, e.g. "$64,000".
    pub price: String,
    /// Week-over-week change, e.g. "3.14%".
    pub week_change: String,
    /// One-year change, e.g. "-12.50%".
    pub year_change: String,
}

/// Market-wide indicators. Both fields degrade to `None` when the
/// global-data fetch fails; the renderer shows them as unavailable.
#[derive(Debug, Clone, Default)]
pub struct GlobalIndicators {
    pub bitcoin_dominance: Option<f64>,
    pub total_market_cap: Option<f64>,
}

/// The complete artifact handed to the renderer.
#[derive(Debug, Clone)]
pub struct Report {
    /// One snapshot per configured coin, in configured order.
    pub snapshots: Vec<CoinSnapshot>,
    pub global: GlobalIndicators,
    /// Fear & Greed index, absent on fetch failure.
    pub sentiment: Option<u8>,
    /// Wall-clock time when data capture completed.
    pub captured_at: DateTime<Utc>,
}
