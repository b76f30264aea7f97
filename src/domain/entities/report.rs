use crate::domain::entities::token_record::TokenRecord;
use crate::domain::values::decision::Decision;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable snapshot of one completed pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub date: DateTime<Utc>,
    pub tokens: Vec<TokenRecord>,
}

impl Report {
    /// Wrap the finished token records, stamping the completion time.
    pub fn new(tokens: Vec<TokenRecord>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            date: Utc::now(),
            tokens,
        }
    }

    /// (buy, hold, avoid) counts across the report's tokens.
    pub fn decision_counts(&self) -> (usize, usize, usize) {
        let mut counts = (0, 0, 0);
        for token in &self.tokens {
            match token.final_decision {
                Some(Decision::Buy) => counts.0 += 1,
                Some(Decision::Avoid) => counts.2 += 1,
                _ => counts.1 += 1,
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stamps_date() {
        let before = Utc::now();
        let report = Report::new(vec![]);
        assert!(report.date >= before);
        assert!(!report.id.is_empty());
    }

    #[test]
    fn test_decision_counts() {
        let mut buy = TokenRecord::new("A".into(), None);
        buy.final_decision = Some(Decision::Buy);
        let mut avoid = TokenRecord::new("B".into(), None);
        avoid.final_decision = Some(Decision::Avoid);
        let undecided = TokenRecord::new("C".into(), None);

        let report = Report::new(vec![buy, avoid, undecided]);
        assert_eq!(report.decision_counts(), (1, 1, 1));
    }
}
