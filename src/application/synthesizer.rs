use crate::domain::entities::token_record::TokenRecord;
use crate::domain::ports::reasoning::{ReasoningOutput, ReasoningProvider};
use crate::domain::values::decision::Decision;
use std::sync::Arc;
use tracing::warn;

/// Reduces all per-token analyses to one final decision per token with a
/// single aggregate reasoning call. However malformed the reply, every record
/// leaves this stage with a valid decision: HOLD is the floor.
pub struct DecisionSynthesizer {
    reasoning: Arc<dyn ReasoningProvider>,
}

impl DecisionSynthesizer {
    pub fn new(reasoning: Arc<dyn ReasoningProvider>) -> Self {
        Self { reasoning }
    }

    pub async fn run(&self, tokens: &mut [TokenRecord]) {
        if tokens.is_empty() {
            return;
        }

        let prompt = build_decision_prompt(tokens);
        let decisions = match self.reasoning.reason(&prompt).await {
            Ok(ReasoningOutput::Structured(map)) => map,
            Ok(ReasoningOutput::Text(text)) => parse_decision_map(&text).unwrap_or_else(|| {
                warn!("decision response was not a JSON object, defaulting to HOLD");
                serde_json::Map::new()
            }),
            Err(e) => {
                warn!(error = %e, "reasoning call failed, defaulting to HOLD");
                serde_json::Map::new()
            }
        };

        for record in tokens.iter_mut() {
            record.final_decision = Some(resolve_decision(&decisions, &record.symbol));
        }
    }
}

/// One block per token in input order, with "no data" standing in for any
/// field an earlier stage left absent.
pub fn build_decision_prompt(tokens: &[TokenRecord]) -> String {
    let reports: Vec<String> = tokens
        .iter()
        .map(|token| {
            format!(
                "Token: {} ({})\nAnalysis: {}\nTechnical Analysis: {}\nNews: {}",
                token.symbol,
                token.chain_id.as_deref().unwrap_or("unknown"),
                token.analysis.as_deref().unwrap_or("no data"),
                token.technical_analysis.as_deref().unwrap_or("no data"),
                token.news_summary.as_deref().unwrap_or("no data"),
            )
        })
        .collect();

    format!(
        "Here are multiple cryptocurrency analysis reports:\n\n{}\n\n\
         Based on these insights, provide a final decision for each token: \
         Should an investor 'BUY', 'HOLD', or 'AVOID' these tokens? \
         Return your response as a JSON object where each token's symbol is the key \
         and the value is one of ['BUY', 'HOLD', 'AVOID']. No extra formatting, just raw JSON.",
        reports.join("\n\n")
    )
}

/// Tolerant parse of the advisor's reply: trim, strip Markdown code fences
/// from both ends, then require a JSON object. Anything else is None.
pub fn parse_decision_map(raw: &str) -> Option<serde_json::Map<String, serde_json::Value>> {
    let cleaned = raw
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    match serde_json::from_str::<serde_json::Value>(cleaned) {
        Ok(serde_json::Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Total resolution of one symbol against the decision map. Missing entry,
/// non-string value and unknown label all collapse to HOLD; the value itself
/// is trimmed and upper-cased before matching.
pub fn resolve_decision(
    decisions: &serde_json::Map<String, serde_json::Value>,
    symbol: &str,
) -> Decision {
    decisions
        .get(symbol)
        .and_then(|value| value.as_str())
        .and_then(|value| value.parse::<Decision>().ok())
        .unwrap_or_default()
}
