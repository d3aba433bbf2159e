//! End-to-end enrollment scenarios against an in-memory database.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use registrar_core::entities::OfferingKey;
use registrar_core::events::EnrollmentEvent;
use registrar_core::outcome::Rejection;
use registrar_core::roster::Roster;
use registrar_core::term::{Quarter, Term};
use registrar_db::{ErrorKind, MemorySink, RecordsDb, RecordsService};

const ROSTER: &str = include_str!("fixtures/roster.toml");
const TERM: Term = Term::new(Quarter::Q1, 2024);
const TOM: i64 = 3213;
const ADA: i64 = 4000;

async fn service(sink: Arc<MemorySink>) -> RecordsService {
    let db = RecordsDb::open_local(":memory:").await.unwrap();
    let svc = RecordsService::from_db(db)
        .with_hash_iterations(64)
        .with_sink(sink);
    let roster: Roster = toml::from_str(ROSTER).unwrap();
    svc.import_roster(&roster).await.unwrap();
    svc
}

async fn seats(svc: &RecordsService, course: &str) -> (i64, i64) {
    let listing = svc
        .offerings_for_term(TERM)
        .await
        .unwrap()
        .into_iter()
        .find(|l| l.course_id == course)
        .unwrap();
    (listing.enrollment, listing.capacity)
}

#[tokio::test]
async fn full_offering_stays_full() {
    let svc = service(Arc::new(MemorySink::new())).await;
    let cs101 = OfferingKey::new("CS101", TERM);

    let err = svc.enroll(TOM, &cs101).await.unwrap_err();

    assert_eq!(err.to_string(), "No seats available");
    assert_eq!(err.kind(), ErrorKind::ValidationFailed);
    assert_eq!(seats(&svc, "CS101").await, (2, 2));
}

#[tokio::test]
async fn passed_prerequisite_admits_enrollment() {
    let svc = service(Arc::new(MemorySink::new())).await;
    let cs201 = OfferingKey::new("CS201", TERM);

    let outcome = svc.enroll(TOM, &cs201).await.unwrap();

    assert_eq!(outcome.enrollment, 6);
    assert_eq!(seats(&svc, "CS201").await, (6, 10));
    let row = svc
        .transcript_for(TOM)
        .await
        .unwrap()
        .into_iter()
        .find(|r| r.course_id == "CS201")
        .unwrap();
    assert_eq!((row.quarter, row.year, row.grade), (Quarter::Q1, 2024, None));
}

#[tokio::test]
async fn student_without_history_misses_prerequisite() {
    let svc = service(Arc::new(MemorySink::new())).await;
    let err = svc
        .enroll(ADA, &OfferingKey::new("CS201", TERM))
        .await
        .unwrap_err();
    assert_eq!(
        err.rejection(),
        Some(&Rejection::PrerequisitesNotMet {
            missing: vec!["MATH100".into()]
        })
    );
    assert_eq!(seats(&svc, "CS201").await, (5, 10));
}

#[tokio::test]
async fn graded_enrollment_cannot_be_withdrawn() {
    let svc = service(Arc::new(MemorySink::new())).await;
    let math = OfferingKey::new("MATH100", Term::new(Quarter::Q4, 2023));

    let err = svc.withdraw(TOM, &math).await.unwrap_err();

    assert_eq!(err.to_string(), "Cannot withdraw from a course with a grade");
    let detail = svc.course_detail("MATH100", TOM).await.unwrap();
    assert_eq!(detail.grade.as_deref(), Some("B"));
}

#[tokio::test]
async fn lifecycle_enroll_grade_then_history() {
    let svc = service(Arc::new(MemorySink::new())).await;
    let eng = OfferingKey::new("ENG100", TERM);

    svc.enroll(ADA, &eng).await.unwrap();
    assert_eq!(svc.current_courses_for(ADA, TERM).await.unwrap().len(), 1);

    svc.post_grade(ADA, &eng, "A").await.unwrap();
    assert!(svc.current_courses_for(ADA, TERM).await.unwrap().is_empty());

    let err = svc.withdraw(ADA, &eng).await.unwrap_err();
    assert_eq!(err.rejection(), Some(&Rejection::CannotWithdrawGraded));
    let err = svc.enroll(ADA, &eng).await.unwrap_err();
    assert_eq!(err.rejection(), Some(&Rejection::AlreadyTaken));
}

#[tokio::test]
async fn enrolling_into_sparse_offering_still_warns() {
    let sink = Arc::new(MemorySink::new());
    let svc = service(sink.clone()).await;

    let outcome = svc
        .enroll(ADA, &OfferingKey::new("ART100", TERM))
        .await
        .unwrap();
    assert_eq!((outcome.enrollment, outcome.capacity), (1, 20));

    let events = sink.take();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].message(), "Warning: ART100 - enrollment is below 50%");
    let EnrollmentEvent::LowEnrollment(warning) = &events[0];
    assert_eq!(warning.term, TERM);
}

#[tokio::test]
async fn rejected_enroll_publishes_nothing() {
    let sink = Arc::new(MemorySink::new());
    let svc = service(sink.clone()).await;
    svc.enroll(ADA, &OfferingKey::new("CHEM200", TERM))
        .await
        .unwrap_err();
    assert!(sink.events().is_empty());
}
