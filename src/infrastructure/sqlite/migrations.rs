use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), String> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS reports (
            id TEXT PRIMARY KEY,
            date TEXT NOT NULL,
            tokens TEXT NOT NULL DEFAULT '[]'
        );

        CREATE INDEX IF NOT EXISTS idx_reports_date ON reports(date);
        "
    ).map_err(|e| format!("Migration failed: {e}"))
}
