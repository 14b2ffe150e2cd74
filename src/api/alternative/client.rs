use reqwest::Client as HttpClient;
use tracing::warn;

use super::models::FearGreedResponse;
use crate::api::coingecko::models::ApiError;
use crate::api::SentimentSource;

/// Client for the alternative.me Fear & Greed index.
///
/// Independent of the primary market-data client: no shared retry policy,
/// and no failure here is allowed to escape.
pub struct SentimentClient {
    http_client: HttpClient,
    url: String,
}

impl SentimentClient {
    pub fn new(url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            url,
        }
    }

    async fn fetch(&self) -> Result<u8, ApiError> {
        let response = self
            .http_client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body: FearGreedResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Deserialize(format!("Failed to parse response: {}", e)))?;

        let entry = body
            .data
            .first()
            .ok_or_else(|| ApiError::MissingField("data[0]".to_string()))?;
        entry
            .value
            .parse::<u8>()
            .map_err(|e| ApiError::Deserialize(format!("Non-numeric index value: {}", e)))
    }
}

impl SentimentSource for SentimentClient {
    /// Current Fear & Greed score, or `None` on any failure.
    async fn sentiment_index(&self) -> Option<u8> {
        match self.fetch().await {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Error fetching Fear & Greed Index: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fear_greed_response() {
        let json = r#"{
            "name": "Fear and Greed Index",
            "data": [
                { "value": "29", "value_classification": "Fear", "timestamp": "1724976000" }
            ]
        }"#;

        let body: FearGreedResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.data[0].value.parse::<u8>().unwrap(), 29);
    }
}
