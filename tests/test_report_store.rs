//! Report persistence: ordering, limits and durability across reopen.

use chrono::{Duration, Utc};
use rusqlite::Connection;
use tokenintel::domain::entities::report::Report;
use tokenintel::domain::entities::token_record::TokenRecord;
use tokenintel::domain::ports::report_store::ReportStore;
use tokenintel::domain::values::decision::Decision;
use tokenintel::infrastructure::sqlite::migrations::run_migrations;
use tokenintel::infrastructure::sqlite::report_repo::SqliteReportStore;

fn open_store(path: &str) -> SqliteReportStore {
    let conn = Connection::open(path).unwrap();
    run_migrations(&conn).unwrap();
    SqliteReportStore::new(conn)
}

fn report_with(symbol: &str, decision: Decision, age_minutes: i64) -> Report {
    let mut token = TokenRecord::new(symbol.to_string(), Some("eth".into()));
    token.final_decision = Some(decision);
    let mut report = Report::new(vec![token]);
    report.date = Utc::now() - Duration::minutes(age_minutes);
    report
}

#[test]
fn test_latest_of_empty_store_is_none() {
    let store = open_store(":memory:");
    assert!(store.latest_report().unwrap().is_none());
    assert!(store.recent_reports(10).unwrap().is_empty());
}

#[test]
fn test_save_and_latest_picks_newest() {
    let store = open_store(":memory:");
    let older = report_with("BTC", Decision::Buy, 10);
    let newer = report_with("ETH", Decision::Avoid, 1);
    store.save_report(&older).unwrap();
    store.save_report(&newer).unwrap();

    let latest = store.latest_report().unwrap().unwrap();
    assert_eq!(latest.id, newer.id);
    assert_eq!(latest.tokens[0].symbol, "ETH");
    assert_eq!(latest.tokens[0].final_decision, Some(Decision::Avoid));
}

#[test]
fn test_recent_orders_newest_first_and_limits() {
    let store = open_store(":memory:");
    for (i, symbol) in ["A", "B", "C"].iter().enumerate() {
        let report = report_with(symbol, Decision::Hold, (3 - i as i64) * 10);
        store.save_report(&report).unwrap();
    }

    let recent = store.recent_reports(2).unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].tokens[0].symbol, "C");
    assert_eq!(recent[1].tokens[0].symbol, "B");
}

#[test]
fn test_reports_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reports.db");
    let path = path.to_str().unwrap();

    let report = report_with("BTC", Decision::Buy, 0);
    {
        let store = open_store(path);
        store.save_report(&report).unwrap();
    }

    let store = open_store(path);
    let loaded = store.latest_report().unwrap().unwrap();
    assert_eq!(loaded.id, report.id);
    assert_eq!(loaded.tokens[0].final_decision, Some(Decision::Buy));
}

#[test]
fn test_tokens_round_trip_with_metadata() {
    let store = open_store(":memory:");
    let mut token: TokenRecord = serde_json::from_value(serde_json::json!({
        "symbol": "PEPE",
        "chainId": "0x1",
        "usdPrice": 0.0000012
    }))
    .unwrap();
    token.analysis = Some("meme momentum".into());
    let report = Report::new(vec![token]);
    store.save_report(&report).unwrap();

    let loaded = store.latest_report().unwrap().unwrap();
    let stored = &loaded.tokens[0];
    assert_eq!(stored.symbol, "PEPE");
    assert_eq!(stored.chain_id.as_deref(), Some("0x1"));
    assert_eq!(stored.analysis.as_deref(), Some("meme momentum"));
    assert!(stored.metadata.contains_key("usdPrice"));
}
