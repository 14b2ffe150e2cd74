use std::future::Future;

use chrono::NaiveDate;
use reqwest::Client as HttpClient;
use reqwest::StatusCode;
use serde_json::Value;
use tokio::time::sleep;
use tracing::{info, warn};

use super::models::{ApiError, CoinDetail, CoinDetailResponse};
use crate::api::PriceSource;
use crate::config::{Config, RetryPolicy};

/// CoinGecko API client for prices, historical prices and global market data
pub struct CoinGeckoClient {
    http_client: HttpClient,
    base_url: String,
    currency: String,
    retry: RetryPolicy,
}

impl CoinGeckoClient {
    /// Create a client from the run configuration
    pub fn new(config: &Config) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: config.coingecko_base_url.clone(),
            currency: config.currency.clone(),
            retry: config.retry.clone(),
        }
    }

    /// GET `{base_url}/{endpoint}` with optional query parameters, decoded
    /// as a generic JSON value.
    ///
    /// A 429 response is retried under the client's `RetryPolicy`; every
    /// other failure is returned immediately.
    pub async fn get(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Value, ApiError> {
        retry_on_rate_limit(&self.retry, || self.attempt(endpoint, params)).await
    }

    /// Single request attempt with per-status error mapping
    async fn attempt(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Value, ApiError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .http_client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ApiError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Http {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ApiError::Deserialize(format!("Failed to parse response: {}", e)))
    }
}

impl PriceSource for CoinGeckoClient {
    /// GET `coins/{id}`, returning the current price and one-year change.
    ///
    /// Missing fields propagate as `ApiError::MissingField`: a report row
    /// built from a partial response is worse than no report.
    async fn coin_detail(&self, coin_id: &str) -> Result<CoinDetail, ApiError> {
        let body = self.get(&format!("coins/{}", coin_id), &[]).await?;
        extract_coin_detail(body, &self.currency)
    }

    /// GET `coins/{id}/history?date=DD-MM-YYYY`, returning the price on
    /// a past date.
    async fn historical_price(&self, coin_id: &str, date: NaiveDate) -> Result<f64, ApiError> {
        let body = self
            .get(
                &format!("coins/{}/history", coin_id),
                &[("date", history_date_param(date))],
            )
            .await?;
        extract_historical_price(&body, &self.currency)
    }

    /// GET `global`, returning (bitcoin dominance %, total market cap).
    ///
    /// Failures here never abort the run: anything short of both keys
    /// present degrades to `(None, None)` with a diagnostic log.
    async fn global_data(&self) -> (Option<f64>, Option<f64>) {
        let body = match self.get("global", &[]).await {
            Ok(body) => body,
            Err(e) => {
                warn!("Error fetching global data: {}", e);
                return (None, None);
            }
        };

        let (dominance, market_cap) = extract_global(&body, &self.currency);
        if dominance.is_none() || market_cap.is_none() {
            warn!("Global data missing expected keys. API response: {}", body);
            return (None, None);
        }
        (dominance, market_cap)
    }
}

/// Run `op` until it resolves to anything other than a rate-limit error,
/// sleeping `policy.cooldown` between attempts. With `max_attempts` unset
/// this loops forever on a perpetually rate-limited host.
pub(crate) async fn retry_on_rate_limit<T, F, Fut>(
    policy: &RetryPolicy,
    mut op: F,
) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut rate_limited_attempts: u32 = 0;
    loop {
        match op().await {
            Err(ApiError::RateLimited) => {
                rate_limited_attempts += 1;
                if let Some(max) = policy.max_attempts {
                    if rate_limited_attempts >= max {
                        return Err(ApiError::RetriesExhausted(rate_limited_attempts));
                    }
                }
                info!(
                    "Rate limit hit. Waiting {} seconds...",
                    policy.cooldown.as_secs()
                );
                sleep(policy.cooldown).await;
            }
            other => return other,
        }
    }
}

/// Query-parameter form of a history date (day-month-year, as the API expects)
fn history_date_param(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

fn extract_coin_detail(body: Value, currency: &str) -> Result<CoinDetail, ApiError> {
    let detail: CoinDetailResponse = serde_json::from_value(body)
        .map_err(|e| ApiError::Deserialize(format!("Failed to parse coin detail: {}", e)))?;

    let price = detail
        .market_data
        .current_price
        .get(currency)
        .copied()
        .ok_or_else(|| ApiError::MissingField(format!("market_data.current_price.{}", currency)))?;
    let change_1y = detail
        .market_data
        .price_change_percentage_1y
        .ok_or_else(|| ApiError::MissingField("market_data.price_change_percentage_1y".to_string()))?;

    Ok(CoinDetail { price, change_1y })
}

fn extract_historical_price(body: &Value, currency: &str) -> Result<f64, ApiError> {
    body.pointer(&format!("/market_data/current_price/{}", currency))
        .and_then(Value::as_f64)
        .ok_or_else(|| ApiError::MissingField(format!("market_data.current_price.{}", currency)))
}

fn extract_global(body: &Value, currency: &str) -> (Option<f64>, Option<f64>) {
    let dominance = body
        .pointer("/data/market_cap_percentage/btc")
        .and_then(Value::as_f64);
    let market_cap = body
        .pointer(&format!("/data/total_market_cap/{}", currency))
        .and_then(Value::as_f64);
    (dominance, market_cap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::{Duration, Instant};

    #[tokio::test]
    async fn test_retry_succeeds_after_one_cooldown() {
        let policy = RetryPolicy {
            cooldown: Duration::from_millis(50),
            max_attempts: None,
        };
        let mut calls = 0;

        let started = Instant::now();
        let result = retry_on_rate_limit(&policy, || {
            calls += 1;
            let attempt = calls;
            async move {
                if attempt == 1 {
                    Err(ApiError::RateLimited)
                } else {
                    Ok(42)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls, 2);
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_retry_bounded_policy_exhausts() {
        let policy = RetryPolicy {
            cooldown: Duration::from_millis(1),
            max_attempts: Some(3),
        };

        let result: Result<(), ApiError> =
            retry_on_rate_limit(&policy, || async { Err(ApiError::RateLimited) }).await;

        assert!(matches!(result, Err(ApiError::RetriesExhausted(3))));
    }

    #[tokio::test]
    async fn test_retry_passes_through_other_errors() {
        let policy = RetryPolicy::default();

        let result: Result<(), ApiError> = retry_on_rate_limit(&policy, || async {
            Err(ApiError::Http {
                status: 404,
                body: "not found".to_string(),
            })
        })
        .await;

        assert!(matches!(result, Err(ApiError::Http { status: 404, .. })));
    }

    #[test]
    fn test_history_date_param_is_day_month_year() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(history_date_param(date), "07-03-2024");
    }

    #[test]
    fn test_extract_coin_detail() {
        let body = json!({
            "market_data": {
                "current_price": { "usd": 64000.4, "eur": 59000.0 },
                "price_change_percentage_1y": 42.5
            }
        });

        let detail = extract_coin_detail(body, "usd").unwrap();
        assert_eq!(detail.price, 64000.4);
        assert_eq!(detail.change_1y, 42.5);
    }

    #[test]
    fn test_extract_coin_detail_missing_currency() {
        let body = json!({
            "market_data": {
                "current_price": { "eur": 59000.0 },
                "price_change_percentage_1y": 42.5
            }
        });

        let err = extract_coin_detail(body, "usd").unwrap_err();
        assert!(matches!(err, ApiError::MissingField(_)));
    }

    #[test]
    fn test_extract_coin_detail_missing_yearly_change() {
        let body = json!({
            "market_data": {
                "current_price": { "usd": 64000.4 },
                "price_change_percentage_1y": null
            }
        });

        let err = extract_coin_detail(body, "usd").unwrap_err();
        assert!(matches!(err, ApiError::MissingField(_)));
    }

    #[test]
    fn test_extract_historical_price() {
        let body = json!({
            "market_data": { "current_price": { "usd": 61500.0 } }
        });

        assert_eq!(extract_historical_price(&body, "usd").unwrap(), 61500.0);
    }

    #[test]
    fn test_extract_global() {
        let body = json!({
            "data": {
                "market_cap_percentage": { "btc": 54.3, "eth": 17.1 },
                "total_market_cap": { "usd": 2.3e12 }
            }
        });

        let (dominance, market_cap) = extract_global(&body, "usd");
        assert_eq!(dominance, Some(54.3));
        assert_eq!(market_cap, Some(2.3e12));
    }

    #[test]
    fn test_extract_global_missing_keys() {
        let body = json!({ "data": {} });

        let (dominance, market_cap) = extract_global(&body, "usd");
        assert!(dominance.is_none());
        assert!(market_cap.is_none());
    }
}
