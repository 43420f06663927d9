//! Schema migrations.
//!
//! `MIGRATIONS[n]` upgrades the schema from version `n` to `n + 1`. The
//! applied version lives in `PRAGMA user_version`.

use rusqlite::Connection;
use tracing::debug;

use crate::error::BreatheError;

const MIGRATIONS: &[&str] = &[
    // v1: finished sessions
    r"
    CREATE TABLE IF NOT EXISTS sessions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        pattern_id TEXT NOT NULL,
        pattern_name TEXT NOT NULL,
        started_at TEXT NOT NULL,
        ended_at TEXT NOT NULL,
        cycles INTEGER NOT NULL DEFAULT 0,
        repetitions INTEGER NOT NULL,
        completed INTEGER NOT NULL DEFAULT 0,
        count_direction TEXT NOT NULL DEFAULT 'down'
    );
    CREATE INDEX IF NOT EXISTS idx_sessions_started ON sessions(started_at);
    CREATE INDEX IF NOT EXISTS idx_sessions_pattern ON sessions(pattern_id);
    ",
];

/// Schema version this build expects.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub const LATEST: i32 = MIGRATIONS.len() as i32;

/// Schema version recorded in the database. Zero for a new file.
///
/// # Errors
///
/// Returns an error if the pragma cannot be read.
pub fn version(conn: &Connection) -> Result<i32, BreatheError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| BreatheError::Database(format!("Failed to read schema version: {e}")))
}

/// Bring the schema up to [`LATEST`], one transaction per step.
///
/// # Errors
///
/// Returns an error if a migration fails, or if the database was written by
/// a newer build.
pub fn upgrade(conn: &mut Connection) -> Result<(), BreatheError> {
    let current = version(conn)?;
    if current > LATEST {
        return Err(BreatheError::Database(format!(
            "Database schema v{current} is newer than this build supports (v{LATEST})"
        )));
    }

    let applied = usize::try_from(current).unwrap_or(0);
    for (index, sql) in MIGRATIONS.iter().enumerate().skip(applied) {
        let target = index + 1;
        debug!(version = target, "applying migration");
        let tx = conn
            .transaction()
            .map_err(|e| BreatheError::Database(format!("Failed to begin migration: {e}")))?;
        tx.execute_batch(sql)
            .and_then(|()| tx.execute_batch(&format!("PRAGMA user_version = {target};")))
            .map_err(|e| BreatheError::Database(format!("Migration v{target} failed: {e}")))?;
        tx.commit()
            .map_err(|e| BreatheError::Database(format!("Failed to commit migration: {e}")))?;
    }

    Ok(())
}
