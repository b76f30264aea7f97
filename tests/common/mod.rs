//! Shared test doubles for the pipeline's ports.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokenintel::domain::entities::token_record::TokenRecord;
use tokenintel::domain::error::DomainError;
use tokenintel::domain::ports::market_analyst::MarketAnalyst;
use tokenintel::domain::ports::news_summarizer::NewsSummarizer;
use tokenintel::domain::ports::reasoning::{ReasoningOutput, ReasoningProvider};
use tokenintel::domain::ports::technical_analyst::TechnicalAnalyst;
use tokenintel::domain::ports::token_directory::TokenDirectory;
use tokenintel::TokenIntel;

pub fn make_token(symbol: &str) -> TokenRecord {
    TokenRecord::new(symbol.to_string(), Some("eth".into()))
}

/// Directory returning a fixed token list for any valid query.
#[derive(Default)]
pub struct MockDirectory {
    pub tokens: Vec<TokenRecord>,
}

#[async_trait]
impl TokenDirectory for MockDirectory {
    async fn search(&self, _query: &str) -> Result<Vec<TokenRecord>, DomainError> {
        Ok(self.tokens.clone())
    }
}

/// Market analyst echoing the symbol, with per-symbol failure injection.
#[derive(Default)]
pub struct MockMarket {
    pub fail_symbols: Vec<String>,
}

impl MockMarket {
    pub fn failing(symbols: &[&str]) -> Self {
        Self {
            fail_symbols: symbols.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[async_trait]
impl MarketAnalyst for MockMarket {
    async fn analyze(&self, token: &TokenRecord) -> Result<String, DomainError> {
        if self.fail_symbols.contains(&token.symbol) {
            return Err(DomainError::Provider("market feed down".into()));
        }
        Ok(format!("market view on {}", token.symbol))
    }
}

pub struct MockTechnical;

#[async_trait]
impl TechnicalAnalyst for MockTechnical {
    async fn analyze(&self, symbol: &str) -> Result<String, DomainError> {
        Ok(format!("indicators for {symbol}"))
    }
}

/// News summarizer recording every batch it is asked about.
#[derive(Default)]
pub struct MockNews {
    pub calls: Mutex<Vec<Vec<String>>>,
    pub fail_symbols: Vec<String>,
}

impl MockNews {
    pub fn failing(symbols: &[&str]) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_symbols: symbols.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn batches(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl NewsSummarizer for MockNews {
    async fn summarize(&self, symbols: &[String]) -> Result<String, DomainError> {
        self.calls.lock().unwrap().push(symbols.to_vec());
        if symbols.iter().any(|s| self.fail_symbols.contains(s)) {
            return Err(DomainError::Provider("news feed down".into()));
        }
        Ok(format!("headlines for {}", symbols.join(", ")))
    }
}

/// Advisor returning a canned reply and keeping every prompt it saw.
pub struct MockAdvisor {
    pub response: String,
    pub prompts: Mutex<Vec<String>>,
}

impl MockAdvisor {
    pub fn replying(response: &str) -> Self {
        Self {
            response: response.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ReasoningProvider for MockAdvisor {
    async fn reason(&self, prompt: &str) -> Result<ReasoningOutput, DomainError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(ReasoningOutput::Text(self.response.clone()))
    }
}

/// Advisor whose reasoning call always errors.
pub struct FailingAdvisor;

#[async_trait]
impl ReasoningProvider for FailingAdvisor {
    async fn reason(&self, _prompt: &str) -> Result<ReasoningOutput, DomainError> {
        Err(DomainError::Provider("advisor unreachable".into()))
    }
}

/// In-memory TokenIntel wired to the given news and advisor doubles, with
/// well-behaved market and technical analysts.
pub fn setup(news: Arc<MockNews>, advisor: Arc<MockAdvisor>) -> TokenIntel {
    TokenIntel::with_providers(
        ":memory:",
        Arc::new(MockDirectory::default()),
        Arc::new(MockMarket::default()),
        Arc::new(MockTechnical),
        news,
        advisor,
    )
    .unwrap()
}
