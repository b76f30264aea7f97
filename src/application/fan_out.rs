use crate::domain::entities::token_record::TokenRecord;
use crate::domain::ports::market_analyst::MarketAnalyst;
use crate::domain::ports::technical_analyst::TechnicalAnalyst;
use futures::future::join_all;
use std::sync::Arc;
use tracing::warn;

/// Substituted for a failed market analysis call.
pub const MARKET_FALLBACK: &str = "analysis unavailable";
/// Substituted for a failed technical analysis call.
pub const TECHNICAL_FALLBACK: &str = "technical analysis unavailable";

/// Fans one market task and one technical task out per token, all scheduled
/// concurrently, and writes results back onto the records in place. A failed
/// task degrades to fallback text on its own record; it never fails the stage
/// and never cancels a sibling.
pub struct AnalysisFanOut {
    market: Arc<dyn MarketAnalyst>,
    technical: Arc<dyn TechnicalAnalyst>,
}

impl AnalysisFanOut {
    pub fn new(market: Arc<dyn MarketAnalyst>, technical: Arc<dyn TechnicalAnalyst>) -> Self {
        Self { market, technical }
    }

    pub async fn run(&self, tokens: &mut [TokenRecord]) {
        let market_tasks = join_all(tokens.iter().map(|token| self.market.analyze(token)));
        let technical_tasks =
            join_all(tokens.iter().map(|token| self.technical.analyze(&token.symbol)));

        // Both producer groups run as one pool of 2n concurrent tasks.
        let (market_results, technical_results) = tokio::join!(market_tasks, technical_tasks);

        for (record, result) in tokens.iter_mut().zip(market_results) {
            record.analysis = Some(match result {
                Ok(text) => text,
                Err(e) => {
                    warn!(symbol = %record.symbol, error = %e, "market analysis failed");
                    MARKET_FALLBACK.to_string()
                }
            });
        }

        for (record, result) in tokens.iter_mut().zip(technical_results) {
            record.technical_analysis = Some(match result {
                Ok(text) => text,
                Err(e) => {
                    warn!(symbol = %record.symbol, error = %e, "technical analysis failed");
                    TECHNICAL_FALLBACK.to_string()
                }
            });
        }
    }
}
