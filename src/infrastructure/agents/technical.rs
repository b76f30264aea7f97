use crate::domain::error::DomainError;
use crate::domain::ports::technical_analyst::TechnicalAnalyst;
use crate::infrastructure::llm::openai::OpenAiChat;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

const TAAPI_URL: &str = "https://api.taapi.io";
const INSTRUCTIONS: &str = "You are a technical analysis expert. Analyze the given cryptocurrency indicators (SMA, RSI) and provide insights on market trends.";

/// Technical analyst backed by taapi.io indicators. An indicator outage is
/// not fatal: the reading still runs with "No data" in place of the numbers.
pub struct TaapiAgent {
    client: Client,
    api_key: String,
    chat: OpenAiChat,
}

#[derive(Deserialize)]
struct IndicatorResponse {
    #[serde(default)]
    value: Option<f64>,
}

impl TaapiAgent {
    pub fn new(api_key: String, chat: OpenAiChat) -> Self {
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
            chat: chat.with_instructions(INSTRUCTIONS),
        }
    }

    async fn fetch_indicator(&self, endpoint: &str, symbol: &str) -> Result<Option<f64>, DomainError> {
        let resp = self
            .client
            .get(format!("{TAAPI_URL}/{endpoint}"))
            .query(&[
                ("secret", self.api_key.as_str()),
                ("exchange", "binance"),
                ("symbol", symbol),
                ("interval", "1h"),
                ("optInTimePeriod", "14"),
            ])
            .send()
            .await
            .map_err(|e| DomainError::Provider(format!("TAAPI error: {e}")))?;

        if !resp.status().is_success() {
            return Err(DomainError::Provider(format!(
                "TAAPI returned {}",
                resp.status()
            )));
        }

        let data: IndicatorResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Parse(format!("TAAPI response: {e}")))?;
        Ok(data.value)
    }
}

#[async_trait]
impl TechnicalAnalyst for TaapiAgent {
    async fn analyze(&self, symbol: &str) -> Result<String, DomainError> {
        let (sma, rsi) = tokio::join!(
            self.fetch_indicator("sma", symbol),
            self.fetch_indicator("rsi", symbol)
        );
        let sma = sma.unwrap_or_else(|e| {
            warn!(symbol = %symbol, error = %e, "SMA fetch failed");
            None
        });
        let rsi = rsi.unwrap_or_else(|e| {
            warn!(symbol = %symbol, error = %e, "RSI fetch failed");
            None
        });
        self.chat.complete(&build_prompt(symbol, sma, rsi)).await
    }
}

fn build_prompt(symbol: &str, sma: Option<f64>, rsi: Option<f64>) -> String {
    format!(
        "Cryptocurrency: {}\n\
         SMA (Simple Moving Average): {}\n\
         RSI (Relative Strength Index): {}\n\n\
         Analyze these indicators and provide a short, actionable market insight.",
        symbol,
        indicator_text(sma),
        indicator_text(rsi),
    )
}

fn indicator_text(value: Option<f64>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "No data".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_with_indicator_values() {
        let prompt = build_prompt("BTC", Some(96500.25), Some(58.4));
        assert!(prompt.starts_with("Cryptocurrency: BTC\n"));
        assert!(prompt.contains("SMA (Simple Moving Average): 96500.25"));
        assert!(prompt.contains("RSI (Relative Strength Index): 58.4"));
    }

    #[test]
    fn test_prompt_defaults_missing_indicators() {
        let prompt = build_prompt("ETH", None, None);
        assert!(prompt.contains("SMA (Simple Moving Average): No data"));
        assert!(prompt.contains("RSI (Relative Strength Index): No data"));
    }

    #[test]
    fn test_indicator_response_tolerates_missing_value() {
        let parsed: IndicatorResponse = serde_json::from_str(r#"{"value": 42.5}"#).unwrap();
        assert_eq!(parsed.value, Some(42.5));
        let parsed: IndicatorResponse = serde_json::from_str(r#"{"error": "rate limited"}"#).unwrap();
        assert_eq!(parsed.value, None);
    }
}
