//! Event sinks for post-commit enrollment notifications.
//!
//! `RecordsService` publishes an `EnrollmentEvent` after an enroll or withdraw
//! commits. Sinks never affect the transition: a failing sink is logged by the
//! service and otherwise ignored.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use registrar_core::events::EnrollmentEvent;

use crate::error::DatabaseError;

/// Receiver of committed enrollment events.
pub trait EventSink: Send + Sync {
    /// Deliver one event.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the event could not be delivered.
    fn publish(&self, event: &EnrollmentEvent) -> Result<(), DatabaseError>;
}

/// Emits each event as a `tracing` warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn publish(&self, event: &EnrollmentEvent) -> Result<(), DatabaseError> {
        match event {
            EnrollmentEvent::LowEnrollment(w) => tracing::warn!(
                course = %w.course_id,
                term = %w.term,
                enrollment = w.enrollment,
                capacity = w.capacity,
                trigger = %w.trigger,
                "{}",
                w.message
            ),
        }
        Ok(())
    }
}

/// Appends one JSON object per event to a JSONL file.
///
/// Uses `serde_jsonlines::append_json_lines` for per-line appends.
#[derive(Debug, Clone)]
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    /// Create a sink writing to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the parent directory cannot be created.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, DatabaseError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| DatabaseError::Other(e.into()))?;
        }
        Ok(Self { path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventSink for JsonlSink {
    fn publish(&self, event: &EnrollmentEvent) -> Result<(), DatabaseError> {
        serde_jsonlines::append_json_lines(&self.path, [event])
            .map_err(|e| DatabaseError::Other(e.into()))?;
        Ok(())
    }
}

/// Collects events in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<EnrollmentEvent>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything published so far.
    #[must_use]
    pub fn events(&self) -> Vec<EnrollmentEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drain and return everything published so far.
    pub fn take(&self) -> Vec<EnrollmentEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl EventSink for MemorySink {
    fn publish(&self, event: &EnrollmentEvent) -> Result<(), DatabaseError> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use registrar_core::entities::OfferingKey;
    use registrar_core::events::low_enrollment_event;
    use registrar_core::outcome::{TransitionKind, TransitionOutcome};
    use registrar_core::term::{Quarter, Term};
    use tempfile::TempDir;

    use super::*;

    fn sample_event(course: &str) -> EnrollmentEvent {
        let outcome = TransitionOutcome {
            kind: TransitionKind::Withdraw,
            student_id: 7,
            offering: OfferingKey::new(course, Term::new(Quarter::Q3, 2025)),
            enrollment: 1,
            capacity: 10,
        };
        low_enrollment_event(&outcome, Utc::now()).unwrap()
    }

    #[test]
    fn jsonl_sink_appends_one_line_per_event() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("alerts").join("events.jsonl");
        let sink = JsonlSink::new(&path).unwrap();

        sink.publish(&sample_event("CS101")).unwrap();
        sink.publish(&sample_event("MATH100")).unwrap();

        let events: Vec<EnrollmentEvent> = serde_jsonlines::json_lines(sink.path())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].course_id(), "CS101");
        assert_eq!(events[1].course_id(), "MATH100");
    }

    #[test]
    fn memory_sink_collects_and_drains() {
        let sink = MemorySink::new();
        sink.publish(&sample_event("CS101")).unwrap();
        assert_eq!(sink.events().len(), 1);
        assert_eq!(sink.take().len(), 1);
        assert!(sink.events().is_empty());
    }

    #[test]
    fn log_sink_never_fails() {
        LogSink.publish(&sample_event("CS101")).unwrap();
    }
}
