//! Session history storage.
//!
//! Persists finished breathing sessions to the local database.

use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use tracing::debug;

use super::record::{HistorySummary, SessionRecord};
use crate::config::Paths;
use crate::error::BreatheError;
use crate::session::CountDirection;
use crate::storage::Database;

const SELECT_COLUMNS: &str = "SELECT id, pattern_id, pattern_name, started_at, ended_at,
        cycles, repetitions, completed, count_direction
    FROM sessions";

/// Storage for finished sessions.
pub struct HistoryStorage {
    db: Database,
}

impl HistoryStorage {
    /// Open history storage at the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn new() -> Result<Self, BreatheError> {
        let db = Database::open(&Paths::new()?)?;
        Ok(Self { db })
    }

    /// Create storage with an existing database connection.
    #[must_use]
    pub const fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Insert a finished session and assign its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn save(&self, record: &mut SessionRecord) -> Result<(), BreatheError> {
        let conn = self.db.connection();

        conn.execute(
            r"INSERT INTO sessions
              (pattern_id, pattern_name, started_at, ended_at,
               cycles, repetitions, completed, count_direction)
              VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                record.pattern_id,
                record.pattern_name,
                record.started_at.to_rfc3339(),
                record.ended_at.to_rfc3339(),
                record.cycles,
                record.repetitions,
                record.completed,
                record.count_direction.to_string(),
            ],
        )
        .map_err(|e| BreatheError::Database(format!("Failed to insert session: {e}")))?;

        let id = conn.last_insert_rowid();
        debug!(id, pattern = %record.pattern_id, "session recorded");
        record.id = Some(id);
        Ok(())
    }

    /// Most recent sessions, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn recent(&self, limit: usize) -> Result<Vec<SessionRecord>, BreatheError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(&format!(
                "{SELECT_COLUMNS} ORDER BY started_at DESC, id DESC LIMIT ?1"
            ))
            .map_err(|e| BreatheError::Database(format!("Failed to prepare query: {e}")))?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt
            .query_map([limit], row_to_record)
            .map_err(|e| BreatheError::Database(format!("Failed to query sessions: {e}")))?;

        let records = rows
            .map(|row| row.map_err(|e| BreatheError::Database(e.to_string())))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Sessions that used a given pattern, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn by_pattern(&self, pattern_id: &str) -> Result<Vec<SessionRecord>, BreatheError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(&format!(
                "{SELECT_COLUMNS} WHERE pattern_id = ?1 ORDER BY started_at DESC, id DESC"
            ))
            .map_err(|e| BreatheError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([pattern_id], row_to_record)
            .map_err(|e| BreatheError::Database(format!("Failed to query sessions: {e}")))?;

        let records = rows
            .map(|row| row.map_err(|e| BreatheError::Database(e.to_string())))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Totals over every recorded session.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn summary(&self) -> Result<HistorySummary, BreatheError> {
        let records = self.recent(usize::MAX)?;
        Ok(HistorySummary::from_records(&records))
    }

    /// Delete every recorded session. Returns the number removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn clear(&self) -> Result<usize, BreatheError> {
        self.db
            .connection()
            .execute("DELETE FROM sessions", [])
            .map_err(|e| BreatheError::Database(format!("Failed to delete sessions: {e}")))
    }
}

/// Convert a database row to a `SessionRecord`.
fn row_to_record(row: &Row<'_>) -> Result<SessionRecord, rusqlite::Error> {
    let started_at: String = row.get(3)?;
    let ended_at: String = row.get(4)?;
    let direction: String = row.get(8)?;

    Ok(SessionRecord {
        id: Some(row.get(0)?),
        pattern_id: row.get(1)?,
        pattern_name: row.get(2)?,
        started_at: parse_timestamp(&started_at),
        ended_at: parse_timestamp(&ended_at),
        cycles: row.get(5)?,
        repetitions: row.get(6)?,
        completed: row.get(7)?,
        count_direction: match direction.as_str() {
            "up" => CountDirection::Up,
            _ => CountDirection::Down,
        },
    })
}

fn parse_timestamp(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
