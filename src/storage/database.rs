//! `SQLite` database handle.
//!
//! Session history lives in `~/.breathe/breathe.db`. A headless run and a
//! `breathe history` in another terminal may touch the file at once, so
//! connections wait briefly on a locked database instead of failing.

use std::path::Path;
use std::time::Duration;

use rusqlite::Connection;
use tracing::debug;

use crate::config::Paths;
use crate::error::BreatheError;

use super::migrations;

const BUSY_TIMEOUT: Duration = Duration::from_secs(2);

/// An open, migrated database.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database under `paths`, creating the data directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or database cannot be created, or
    /// if migrations fail.
    pub fn open(paths: &Paths) -> Result<Self, BreatheError> {
        paths.ensure_dirs()?;
        Self::open_at(&paths.database)
    }

    /// Open the database file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or migrations fail.
    pub fn open_at(path: &Path) -> Result<Self, BreatheError> {
        debug!(path = %path.display(), "opening database");
        let conn = Connection::open(path).map_err(|e| {
            BreatheError::Database(format!("Failed to open database {}: {e}", path.display()))
        })?;
        conn.busy_timeout(BUSY_TIMEOUT)
            .map_err(|e| BreatheError::Database(format!("Failed to set busy timeout: {e}")))?;
        Self::prepare(conn)
    }

    /// Open a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if migrations fail.
    pub fn open_in_memory() -> Result<Self, BreatheError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            BreatheError::Database(format!("Failed to open in-memory database: {e}"))
        })?;
        Self::prepare(conn)
    }

    fn prepare(mut conn: Connection) -> Result<Self, BreatheError> {
        migrations::upgrade(&mut conn)?;
        Ok(Self { conn })
    }

    /// Schema version of the open database.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, BreatheError> {
        migrations::version(&self.conn)
    }

    /// The underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}
