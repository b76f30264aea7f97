use crate::domain::error::DomainError;
use async_trait::async_trait;

/// Produces a free-text technical-indicator reading for one symbol.
#[async_trait]
pub trait TechnicalAnalyst: Send + Sync {
    async fn analyze(&self, symbol: &str) -> Result<String, DomainError>;
}
