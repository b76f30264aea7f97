use crate::domain::entities::token_record::TokenRecord;
use crate::domain::error::DomainError;
use async_trait::async_trait;

/// Produces a free-text market assessment from a token's metadata.
#[async_trait]
pub trait MarketAnalyst: Send + Sync {
    async fn analyze(&self, token: &TokenRecord) -> Result<String, DomainError>;
}
