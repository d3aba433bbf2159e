//! Service layer bounding every storage call and publishing events.
//!
//! `RecordsService` wraps `RecordsDb` (one connection, the explicit storage
//! session), an `EventSink` for post-commit notifications, the per-call
//! timeout, and the password hashing cost. All repo methods are implemented
//! as `impl RecordsService`.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use libsql::{Transaction, TransactionBehavior};
use registrar_config::{AuthConfig, DatabaseConfig};
use registrar_core::events::low_enrollment_event;
use registrar_core::outcome::TransitionOutcome;

use crate::RecordsDb;
use crate::error::DatabaseError;
use crate::notify::{EventSink, LogSink};

/// One storage session against the records database.
///
/// Every mutation that touches an offering's counters follows this protocol:
/// 1. `BEGIN IMMEDIATE` (take the write lock before the first read)
/// 2. Run the ordered checks
/// 3. Apply the mutation, or roll back on the first failed check
/// 4. Commit
/// 5. Publish any due event to the sink
pub struct RecordsService {
    db: RecordsDb,
    sink: Arc<dyn EventSink>,
    call_timeout: Duration,
    /// Whether the connection busy wait was cut down to `call_timeout`.
    busy_capped: bool,
    hash_iterations: u32,
}

impl RecordsService {
    /// Open a service over the configured local database.
    ///
    /// Events go to a [`LogSink`] until [`Self::with_sink`] replaces it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn new_local(
        database: &DatabaseConfig,
        auth: &AuthConfig,
    ) -> Result<Self, DatabaseError> {
        let db = RecordsDb::open_local_with(&database.path, database.busy_timeout()).await?;
        Ok(Self::from_db(db)
            .with_timeout(database.timeout())
            .with_hash_iterations(auth.hash_iterations))
    }

    /// Create from an existing `RecordsDb` with default settings.
    #[must_use]
    pub fn from_db(db: RecordsDb) -> Self {
        let service = Self {
            db,
            sink: Arc::new(LogSink),
            call_timeout: Duration::ZERO,
            busy_capped: false,
            hash_iterations: AuthConfig::default().hash_iterations,
        };
        service.with_timeout(DatabaseConfig::default().timeout())
    }

    /// Replace the event sink.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Replace the per-call timeout.
    ///
    /// The connection's busy wait is capped at the same bound, so a call
    /// stuck behind another session's write lock gives up by the deadline.
    #[must_use]
    pub fn with_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        match self.db.cap_busy_timeout(call_timeout) {
            Ok(effective) => self.busy_capped = effective >= call_timeout,
            Err(error) => {
                tracing::warn!(%error, "could not cap busy timeout");
                self.busy_capped = false;
            }
        }
        self
    }

    /// Replace the PBKDF2 iteration count used for new password hashes.
    #[must_use]
    pub const fn with_hash_iterations(mut self, hash_iterations: u32) -> Self {
        self.hash_iterations = hash_iterations;
        self
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &RecordsDb {
        &self.db
    }

    #[must_use]
    pub const fn hash_iterations(&self) -> u32 {
        self.hash_iterations
    }

    /// Run `fut` under the per-call timeout.
    ///
    /// Two paths end a call at the deadline: the timer, once `fut` yields,
    /// and the capped busy wait, when `fut` is blocked on another session's
    /// lock. Both come back as `DatabaseError::Timeout`. Either way the open
    /// transaction is dropped and rolled back.
    pub(crate) async fn bounded<T, F>(&self, op: &'static str, fut: F) -> Result<T, DatabaseError>
    where
        F: Future<Output = Result<T, DatabaseError>>,
    {
        match tokio::time::timeout(self.call_timeout, fut).await {
            Ok(Err(err)) if self.busy_capped && err.is_lock_contention() => {
                tracing::warn!(
                    op,
                    timeout = ?self.call_timeout,
                    "storage call timed out on a held lock"
                );
                Err(DatabaseError::Timeout(self.call_timeout))
            }
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(op, timeout = ?self.call_timeout, "storage call timed out");
                Err(DatabaseError::Timeout(self.call_timeout))
            }
        }
    }

    /// Run CPU-heavy work (password derivation) off the async worker threads.
    pub(crate) async fn off_runtime<T, F>(work: F) -> Result<T, DatabaseError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        tokio::task::spawn_blocking(work).await.map_err(|e| {
            DatabaseError::Other(anyhow::Error::new(e).context("blocking task failed"))
        })
    }

    /// Open a transaction holding the write lock from its first statement.
    pub(crate) async fn begin_immediate(&self) -> Result<Transaction, DatabaseError> {
        Ok(self
            .db
            .conn()
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .await?)
    }

    /// Commit on success, roll back on any error.
    pub(crate) async fn finish<T>(
        tx: Transaction,
        result: Result<T, DatabaseError>,
    ) -> Result<T, DatabaseError> {
        match result {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback) = tx.rollback().await {
                    tracing::warn!(error = %rollback, "rollback failed");
                }
                Err(err)
            }
        }
    }

    /// Publish the low-enrollment warning for a committed transition, if due.
    pub(crate) fn notify_committed(&self, outcome: &TransitionOutcome) {
        let Some(event) = low_enrollment_event(outcome, Utc::now()) else {
            return;
        };
        if let Err(error) = self.sink.publish(&event) {
            tracing::warn!(%error, course = event.course_id(), "event sink failed");
        }
    }
}
