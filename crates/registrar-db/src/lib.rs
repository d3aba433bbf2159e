//! # registrar-db
//!
//! libSQL storage for the Registrar student-records system.
//!
//! Holds the relational state: students, faculty, the course catalog,
//! per-term offerings with their seat counters, lecture schedules,
//! transcripts, and prerequisite edges. `RecordsService` layers the
//! enrollment transactions, catalog queries, profile edits, and login on top
//! of a single connection.
//!
//! Uses the `libsql` crate (C `SQLite` fork, v0.9.29) as an embedded local
//! database, either file-backed or `:memory:`.

pub mod error;
pub mod helpers;
mod migrations;
pub mod notify;
pub mod repos;
pub mod service;

#[cfg(test)]
mod test_support;

use std::time::Duration;

use error::DatabaseError;
use libsql::Builder;

pub use error::ErrorKind;
pub use notify::{EventSink, JsonlSink, LogSink, MemorySink};
pub use service::RecordsService;

/// Default wait on a locked database before a statement fails.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(2);

/// Database handle owning one libSQL connection.
pub struct RecordsDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    busy_timeout: Duration,
}

impl RecordsDb {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        Self::open_local_with(path, DEFAULT_BUSY_TIMEOUT).await
    }

    /// Open a local database with an explicit busy timeout.
    ///
    /// The busy timeout bounds how long a statement waits for another
    /// connection's write lock (e.g. a concurrent `BEGIN IMMEDIATE`).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local_with(path: &str, busy_timeout: Duration) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        conn.busy_timeout(busy_timeout)
            .map_err(|e| DatabaseError::Migration(format!("busy_timeout: {e}")))?;

        let records = Self {
            db,
            conn,
            busy_timeout,
        };
        records.run_migrations().await?;
        tracing::debug!(path, "records database opened");
        Ok(records)
    }

    /// Busy timeout requested at open, before any cap.
    #[must_use]
    pub const fn busy_timeout(&self) -> Duration {
        self.busy_timeout
    }

    /// Wait at most `min(busy_timeout, ceiling)` on another connection's
    /// lock. Returns the wait now in effect.
    ///
    /// A busy wait blocks inside a single poll; no timer can interrupt it.
    pub(crate) fn cap_busy_timeout(&self, ceiling: Duration) -> Result<Duration, DatabaseError> {
        let effective = self.busy_timeout.min(ceiling);
        self.conn.busy_timeout(effective)?;
        Ok(effective)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}
