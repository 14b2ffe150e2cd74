use serde::Deserialize;

/// Response body of the alternative.me Fear & Greed endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct FearGreedResponse {
    pub data: Vec<FearGreedEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FearGreedEntry {
    /// String-encoded integer score, 0-100.
    pub value: String,
}
