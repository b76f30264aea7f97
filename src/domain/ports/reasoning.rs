use crate::domain::error::DomainError;
use async_trait::async_trait;

/// What a reasoning call hands back: plain text in the common case, or an
/// already-structured mapping when the provider can guarantee one.
#[derive(Debug, Clone)]
pub enum ReasoningOutput {
    Text(String),
    Structured(serde_json::Map<String, serde_json::Value>),
}

/// Single aggregate reasoning call over a prepared prompt.
#[async_trait]
pub trait ReasoningProvider: Send + Sync {
    async fn reason(&self, prompt: &str) -> Result<ReasoningOutput, DomainError>;
}
