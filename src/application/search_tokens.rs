use crate::domain::entities::token_record::TokenRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::token_directory::TokenDirectory;
use std::sync::Arc;

pub struct SearchTokensUseCase {
    directory: Arc<dyn TokenDirectory>,
}

impl SearchTokensUseCase {
    pub fn new(directory: Arc<dyn TokenDirectory>) -> Self {
        Self { directory }
    }

    pub async fn execute(&self, query: &str) -> Result<Vec<TokenRecord>, DomainError> {
        let query = query.trim();
        if query.chars().count() < 2 {
            return Err(DomainError::InvalidInput(
                "query must be at least 2 characters".into(),
            ));
        }
        self.directory.search(query).await
    }
}
