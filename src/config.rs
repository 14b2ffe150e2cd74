use std::path::PathBuf;
use std::time::Duration;

/// Retry behavior for rate-limited requests against the primary API.
///
/// `max_attempts` of `None` retries forever, matching the upstream
/// rate-limit semantics this tool was built around. Tests set a bound.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// How long to wait after a 429 before retrying.
    pub cooldown: Duration,
    /// Maximum number of rate-limited attempts before giving up.
    pub max_attempts: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            cooldown: Duration::from_secs(60),
            max_attempts: None,
        }
    }
}

/// Immutable run configuration, built once in `main` and passed down.
#[derive(Debug, Clone)]
pub struct Config {
    /// Coin identifiers to snapshot, in report order.
    pub coins: Vec<String>,
    /// Reference currency code for all monetary values.
    pub currency: String,
    /// Base URL of the price/market API.
    pub coingecko_base_url: String,
    /// Endpoint of the Fear & Greed index API.
    pub sentiment_url: String,
    /// Pause between per-coin fetches, to stay under upstream rate limits.
    pub inter_coin_delay: Duration,
    pub retry: RetryPolicy,
    /// Output image path, overwritten on every run.
    pub output_path: PathBuf,
    /// Output image dimensions in pixels.
    pub image_size: (u32, u32),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            coins: vec![
                "bitcoin".to_string(),
                "ethereum".to_string(),
                "solana".to_string(),
            ],
            currency: "usd".to_string(),
            coingecko_base_url: "https://api.coingecko.com/api/v3".to_string(),
            sentiment_url: "https://api.alternative.me/fng/".to_string(),
            inter_coin_delay: Duration::from_secs(5),
            retry: RetryPolicy::default(),
            output_path: PathBuf::from("crypto_dashboard.png"),
            image_size: (1000, 800),
        }
    }
}
