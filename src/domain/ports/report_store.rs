use crate::domain::entities::report::Report;
use crate::domain::error::DomainError;

/// Durable, append-only home for finished reports.
pub trait ReportStore: Send + Sync {
    fn save_report(&self, report: &Report) -> Result<(), DomainError>;
    fn latest_report(&self) -> Result<Option<Report>, DomainError>;
    fn recent_reports(&self, limit: usize) -> Result<Vec<Report>, DomainError>;
}
