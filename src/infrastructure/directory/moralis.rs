use crate::domain::entities::token_record::TokenRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::token_directory::TokenDirectory;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

const BASE_URL: &str = "https://deep-index.moralis.io/api/v2.2";

/// Token lookup against the Moralis search endpoint. Whatever fields the API
/// returns beyond the core ones are kept in the record's metadata and fed to
/// the market analyst later.
pub struct MoralisDirectory {
    client: Client,
    api_key: String,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    result: Vec<TokenRecord>,
}

impl MoralisDirectory {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .user_agent("TokenIntel/0.1")
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_else(|err| {
                    warn!(error = %err, "Failed to build HTTP client, using defaults");
                    Client::new()
                }),
            api_key,
        }
    }
}

#[async_trait]
impl TokenDirectory for MoralisDirectory {
    async fn search(&self, query: &str) -> Result<Vec<TokenRecord>, DomainError> {
        let resp = self
            .client
            .get(format!("{BASE_URL}/tokens/search"))
            .header("X-API-Key", &self.api_key)
            .header("accept", "application/json")
            .query(&[("query", query)])
            .send()
            .await
            .map_err(|e| DomainError::Provider(format!("Moralis API error: {e}")))?;

        if !resp.status().is_success() {
            return Err(DomainError::Provider(format!(
                "Moralis returned {}",
                resp.status()
            )));
        }

        let data: SearchResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Parse(format!("Moralis response: {e}")))?;
        Ok(data.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_keeps_extra_fields_as_metadata() {
        let raw = r#"{
            "result": [
                {
                    "symbol": "PEPE",
                    "name": "Pepe",
                    "chainId": "0x1",
                    "usdPrice": 0.0000012,
                    "securityScore": 71
                }
            ]
        }"#;
        let parsed: SearchResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.result.len(), 1);
        let token = &parsed.result[0];
        assert_eq!(token.symbol, "PEPE");
        assert_eq!(token.chain_id.as_deref(), Some("0x1"));
        assert!(token.metadata.contains_key("usdPrice"));
        assert!(token.metadata.contains_key("securityScore"));
    }

    #[test]
    fn test_search_response_defaults_to_empty() {
        let parsed: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.result.is_empty());
    }
}
