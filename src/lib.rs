pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

use crate::application::pipeline::AnalysisPipeline;
use crate::application::search_tokens::SearchTokensUseCase;
use crate::domain::entities::report::Report;
use crate::domain::entities::token_record::TokenRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::market_analyst::MarketAnalyst;
use crate::domain::ports::news_summarizer::NewsSummarizer;
use crate::domain::ports::reasoning::ReasoningProvider;
use crate::domain::ports::report_store::ReportStore;
use crate::domain::ports::technical_analyst::TechnicalAnalyst;
use crate::domain::ports::token_directory::TokenDirectory;
use crate::infrastructure::agents::advisor::AdvisorAgent;
use crate::infrastructure::agents::market::MarketAgent;
use crate::infrastructure::agents::news::NewsApiAgent;
use crate::infrastructure::agents::technical::TaapiAgent;
use crate::infrastructure::directory::moralis::MoralisDirectory;
use crate::infrastructure::llm::openai::OpenAiChat;
use crate::infrastructure::sqlite::migrations::run_migrations;
use crate::infrastructure::sqlite::report_repo::SqliteReportStore;
use rusqlite::Connection;
use std::sync::Arc;
use tokio::task::JoinHandle;

pub struct TokenIntel {
    search_uc: SearchTokensUseCase,
    pipeline: Arc<AnalysisPipeline>,
    store: Arc<dyn ReportStore>,
}

fn require_env(name: &str) -> Result<String, DomainError> {
    std::env::var(name).map_err(|_| DomainError::Config(format!("{name} is not set")))
}

impl TokenIntel {
    pub fn new(db_path: &str) -> Result<Self, DomainError> {
        let openai_key = require_env("TOKENINTEL_OPENAI_KEY")?;
        let moralis_key = require_env("TOKENINTEL_MORALIS_KEY")?;
        let taapi_key = require_env("TOKENINTEL_TAAPI_KEY")?;
        let news_key = require_env("TOKENINTEL_NEWS_KEY")?;
        let model = std::env::var("TOKENINTEL_OPENAI_MODEL").ok();

        let directory: Arc<dyn TokenDirectory> = Arc::new(MoralisDirectory::new(moralis_key));
        let market: Arc<dyn MarketAnalyst> = Arc::new(MarketAgent::new(OpenAiChat::new(
            openai_key.clone(),
            model.clone(),
        )));
        let technical: Arc<dyn TechnicalAnalyst> = Arc::new(TaapiAgent::new(
            taapi_key,
            OpenAiChat::new(openai_key.clone(), model.clone()),
        ));
        let news: Arc<dyn NewsSummarizer> = Arc::new(NewsApiAgent::new(
            news_key,
            OpenAiChat::new(openai_key.clone(), model.clone()),
        ));
        let reasoning: Arc<dyn ReasoningProvider> =
            Arc::new(AdvisorAgent::new(OpenAiChat::new(openai_key, model)));

        Self::with_providers(db_path, directory, market, technical, news, reasoning)
    }

    pub fn with_providers(
        db_path: &str,
        directory: Arc<dyn TokenDirectory>,
        market: Arc<dyn MarketAnalyst>,
        technical: Arc<dyn TechnicalAnalyst>,
        news: Arc<dyn NewsSummarizer>,
        reasoning: Arc<dyn ReasoningProvider>,
    ) -> Result<Self, DomainError> {
        let conn = Connection::open(db_path)
            .map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;

        run_migrations(&conn)?;

        let store: Arc<dyn ReportStore> = Arc::new(SqliteReportStore::new(conn));

        Ok(Self {
            search_uc: SearchTokensUseCase::new(directory),
            pipeline: Arc::new(AnalysisPipeline::new(
                market,
                technical,
                news,
                reasoning,
                store.clone(),
            )),
            store,
        })
    }

    // Delegating methods
    pub async fn search_tokens(&self, query: &str) -> Result<Vec<TokenRecord>, DomainError> {
        self.search_uc.execute(query).await
    }

    pub async fn analyze(&self, tokens: Vec<TokenRecord>) -> Report {
        self.pipeline.execute(tokens).await
    }

    /// Runs the pipeline on a background task; the caller decides whether to
    /// await the handle or let the run finish on its own.
    pub fn spawn_analysis(&self, tokens: Vec<TokenRecord>) -> JoinHandle<Report> {
        self.pipeline.spawn(tokens)
    }

    pub fn latest_report(&self) -> Result<Option<Report>, DomainError> {
        self.store.latest_report()
    }

    pub fn recent_reports(&self, limit: usize) -> Result<Vec<Report>, DomainError> {
        self.store.recent_reports(limit)
    }
}
