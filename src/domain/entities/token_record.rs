use crate::domain::values::decision::Decision;
use serde::{Deserialize, Serialize};

/// Per-token state accumulated across the pipeline stages. Identity is the
/// `symbol`/`chain_id` pair; everything the pipeline does not read or write
/// rides along unmodified in `metadata`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRecord {
    pub symbol: String,
    #[serde(rename = "chainId", default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical_analysis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub news_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_decision: Option<Decision>,
    /// Passthrough market metadata (prices, volumes, scores) keyed as the
    /// upstream source delivered it.
    #[serde(flatten)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl TokenRecord {
    pub fn new(symbol: String, chain_id: Option<String>) -> Self {
        Self {
            symbol,
            chain_id,
            name: None,
            analysis: None,
            technical_analysis: None,
            news_summary: None,
            final_decision: None,
            metadata: serde_json::Map::new(),
        }
    }
}
