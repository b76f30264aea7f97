use crate::domain::error::DomainError;
use async_trait::async_trait;

/// Produces one shared news summary for a group of symbols.
#[async_trait]
pub trait NewsSummarizer: Send + Sync {
    async fn summarize(&self, symbols: &[String]) -> Result<String, DomainError>;
}
