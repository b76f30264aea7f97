use crate::application::fan_out::AnalysisFanOut;
use crate::application::news_batcher::NewsBatcher;
use crate::application::synthesizer::DecisionSynthesizer;
use crate::domain::entities::report::Report;
use crate::domain::entities::token_record::TokenRecord;
use crate::domain::ports::market_analyst::MarketAnalyst;
use crate::domain::ports::news_summarizer::NewsSummarizer;
use crate::domain::ports::reasoning::ReasoningProvider;
use crate::domain::ports::report_store::ReportStore;
use crate::domain::ports::technical_analyst::TechnicalAnalyst;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Sequences the three analysis stages over one exclusively-owned record
/// list, wraps the outcome into a Report and persists it. Persistence
/// failures are logged, never raised: by the time they can occur, whatever
/// triggered the run has typically already answered its own caller.
pub struct AnalysisPipeline {
    fan_out: AnalysisFanOut,
    news: NewsBatcher,
    synthesizer: DecisionSynthesizer,
    store: Arc<dyn ReportStore>,
}

impl AnalysisPipeline {
    pub fn new(
        market: Arc<dyn MarketAnalyst>,
        technical: Arc<dyn TechnicalAnalyst>,
        news: Arc<dyn NewsSummarizer>,
        reasoning: Arc<dyn ReasoningProvider>,
        store: Arc<dyn ReportStore>,
    ) -> Self {
        Self {
            fan_out: AnalysisFanOut::new(market, technical),
            news: NewsBatcher::new(news),
            synthesizer: DecisionSynthesizer::new(reasoning),
            store,
        }
    }

    /// Run every stage to completion, in order, and return the report whether
    /// or not persisting it worked.
    pub async fn execute(&self, mut tokens: Vec<TokenRecord>) -> Report {
        info!(tokens = tokens.len(), "starting analysis pipeline");

        self.fan_out.run(&mut tokens).await;
        self.news.run(&mut tokens).await;
        self.synthesizer.run(&mut tokens).await;

        let report = Report::new(tokens);
        match self.store.save_report(&report) {
            Ok(()) => {
                info!(report_id = %report.id, tokens = report.tokens.len(), "report persisted")
            }
            Err(e) => error!(error = %e, "failed to persist report"),
        }
        report
    }

    /// Fire-and-forget entry point: the run continues on the runtime after
    /// the caller has moved on, and nothing cancels it from outside. The
    /// handle resolves to the same report that was persisted.
    pub fn spawn(self: &Arc<Self>, tokens: Vec<TokenRecord>) -> JoinHandle<Report> {
        let pipeline = Arc::clone(self);
        tokio::spawn(async move { pipeline.execute(tokens).await })
    }
}
