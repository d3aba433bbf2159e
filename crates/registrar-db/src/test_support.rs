//! Shared test utilities for registrar-db unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use std::sync::Arc;

    use registrar_core::entities::OfferingKey;
    use registrar_core::roster::Roster;
    use registrar_core::term::{Quarter, Term};

    use crate::RecordsDb;
    use crate::helpers::term_params;
    use crate::notify::EventSink;
    use crate::service::RecordsService;

    /// Sample roster shared with the integration tests.
    pub const ROSTER_TOML: &str = include_str!("../tests/fixtures/roster.toml");

    /// Student with a passed `MATH100` and an incomplete `CHEM100`.
    pub const STUDENT: i64 = 3213;

    /// Student with no history.
    pub const OTHER: i64 = 4000;

    /// Term the fixture treats as current.
    pub const CURRENT: Term = Term::new(Quarter::Q1, 2024);

    /// Cheap hashing keeps the suite fast.
    pub const TEST_ITERATIONS: u32 = 64;

    /// Create an empty in-memory service.
    pub async fn test_service() -> RecordsService {
        let db = RecordsDb::open_local(":memory:").await.unwrap();
        RecordsService::from_db(db).with_hash_iterations(TEST_ITERATIONS)
    }

    /// Create an in-memory service loaded with the sample roster.
    pub async fn seeded_service() -> RecordsService {
        let svc = test_service().await;
        let roster: Roster = toml::from_str(ROSTER_TOML).unwrap();
        svc.import_roster(&roster).await.unwrap();
        svc
    }

    /// Seeded service publishing to the given sink.
    pub async fn seeded_service_with_sink(sink: Arc<dyn EventSink>) -> RecordsService {
        seeded_service().await.with_sink(sink)
    }

    /// Current enrollment counter of an offering.
    pub async fn enrollment_of(svc: &RecordsService, offering: &OfferingKey) -> i64 {
        let (quarter, year) = term_params(offering.term);
        let mut rows = svc
            .db()
            .conn()
            .query(
                "SELECT enrollment FROM offerings WHERE course_id = ?1 AND quarter = ?2 AND year = ?3",
                libsql::params![offering.course_id.as_str(), quarter, year],
            )
            .await
            .unwrap();
        rows.next().await.unwrap().unwrap().get::<i64>(0).unwrap()
    }

    /// Number of transcript rows for a student in an offering (0 or 1).
    pub async fn count_rows(svc: &RecordsService, student_id: i64, offering: &OfferingKey) -> i64 {
        let (quarter, year) = term_params(offering.term);
        let mut rows = svc
            .db()
            .conn()
            .query(
                "SELECT COUNT(*) FROM transcript
                 WHERE student_id = ?1 AND course_id = ?2 AND quarter = ?3 AND year = ?4",
                libsql::params![student_id, offering.course_id.as_str(), quarter, year],
            )
            .await
            .unwrap();
        rows.next().await.unwrap().unwrap().get::<i64>(0).unwrap()
    }
}
