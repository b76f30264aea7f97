use crate::domain::entities::token_record::TokenRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::market_analyst::MarketAnalyst;
use crate::infrastructure::llm::openai::OpenAiChat;
use async_trait::async_trait;

const INSTRUCTIONS: &str = "You are a cryptocurrency analyst. Analyze the given token data and provide a short but accurate summary, highlighting key risks and trends.";

/// LLM-backed market analyst. The prompt is assembled from the token's
/// directory metadata; absent fields render as "No data" so the model is
/// never fed an empty prompt.
pub struct MarketAgent {
    chat: OpenAiChat,
}

impl MarketAgent {
    pub fn new(chat: OpenAiChat) -> Self {
        Self {
            chat: chat.with_instructions(INSTRUCTIONS),
        }
    }
}

#[async_trait]
impl MarketAnalyst for MarketAgent {
    async fn analyze(&self, token: &TokenRecord) -> Result<String, DomainError> {
        self.chat.complete(&build_prompt(token)).await
    }
}

fn build_prompt(token: &TokenRecord) -> String {
    format!(
        "Token: {} ({})\n\
         Price: {} USD\n\
         Market Cap: {} USD\n\
         24h Price Change: {}%\n\
         24h Trading Volume: {} USD\n\
         Security Score: {}/100\n\n\
         Analyze this token and provide a summary of its reliability and future prospects.\n\
         Highlight any risks or trends that should be considered.",
        token.name.as_deref().unwrap_or("No data"),
        token.symbol,
        field(token, "usdPrice"),
        field(token, "marketCap"),
        nested_field(token, "usdPricePercentChange", "oneDay"),
        nested_field(token, "volumeUsd", "oneDay"),
        field(token, "securityScore"),
    )
}

fn field(token: &TokenRecord, key: &str) -> String {
    render(token.metadata.get(key))
}

fn nested_field(token: &TokenRecord, key: &str, inner: &str) -> String {
    render(token.metadata.get(key).and_then(|v| v.get(inner)))
}

fn render(value: Option<&serde_json::Value>) -> String {
    match value {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => "No data".to_string(),
    }
}
