use crate::domain::entities::report::Report;
use crate::domain::error::DomainError;
use crate::domain::ports::report_store::ReportStore;
use chrono::DateTime;
use rusqlite::{params, Connection};
use std::sync::Mutex;

pub struct SqliteReportStore {
    conn: Mutex<Connection>,
}

impl SqliteReportStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn row_to_report(row: &rusqlite::Row) -> Result<Report, rusqlite::Error> {
        let date_str: String = row.get(1)?;
        let tokens_json: String = row.get(2)?;

        Ok(Report {
            id: row.get(0)?,
            date: DateTime::parse_from_rfc3339(&date_str)
                .map(|dt| dt.with_timezone(&chrono::Utc))
                .unwrap_or_else(|_| chrono::Utc::now()),
            tokens: serde_json::from_str(&tokens_json).unwrap_or_default(),
        })
    }
}

impl ReportStore for SqliteReportStore {
    fn save_report(&self, report: &Report) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let tokens_json = serde_json::to_string(&report.tokens)
            .map_err(|e| DomainError::Parse(format!("Failed to encode tokens: {e}")))?;
        conn.execute(
            "INSERT INTO reports (id, date, tokens) VALUES (?1, ?2, ?3)",
            params![report.id, report.date.to_rfc3339(), tokens_json],
        )
        .map_err(|e| DomainError::Database(format!("Failed to save report: {e}")))?;
        Ok(())
    }

    fn latest_report(&self) -> Result<Option<Report>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn
            .prepare("SELECT id, date, tokens FROM reports ORDER BY date DESC LIMIT 1")
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut rows = stmt
            .query_map([], Self::row_to_report)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        Ok(rows.next().and_then(|r| r.ok()))
    }

    fn recent_reports(&self, limit: usize) -> Result<Vec<Report>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn
            .prepare("SELECT id, date, tokens FROM reports ORDER BY date DESC LIMIT ?1")
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let reports = stmt
            .query_map(params![limit as i64], Self::row_to_report)
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(reports)
    }
}
