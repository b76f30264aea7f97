use crate::domain::entities::token_record::TokenRecord;
use crate::domain::error::DomainError;
use async_trait::async_trait;

/// Upstream token lookup feeding the pipeline.
#[async_trait]
pub trait TokenDirectory: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<TokenRecord>, DomainError>;
}
