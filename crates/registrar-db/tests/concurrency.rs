//! Two storage sessions against one file-backed database.

use std::time::{Duration, Instant};

use registrar_core::entities::OfferingKey;
use registrar_core::outcome::Rejection;
use registrar_core::roster::Roster;
use registrar_core::term::{Quarter, Term};
use registrar_db::error::DatabaseError;
use registrar_db::{ErrorKind, RecordsDb, RecordsService};
use tempfile::TempDir;

const ROSTER: &str = include_str!("fixtures/roster.toml");
const TERM: Term = Term::new(Quarter::Q1, 2024);

async fn open(path: &str, busy: Duration) -> RecordsService {
    let db = RecordsDb::open_local_with(path, busy).await.unwrap();
    RecordsService::from_db(db).with_hash_iterations(64)
}

/// Roster whose ENG100 offering has exactly one free seat.
fn one_seat_roster() -> Roster {
    let mut roster: Roster = toml::from_str(ROSTER).unwrap();
    let eng = roster
        .offerings
        .iter_mut()
        .find(|o| o.course_id == "ENG100")
        .unwrap();
    eng.capacity = 3;
    eng.enrollment = 2;
    roster
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn last_seat_goes_to_exactly_one_session() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("records.db");
    let path = path.to_str().unwrap().to_string();

    let first = open(&path, Duration::from_secs(5)).await;
    first.import_roster(&one_seat_roster()).await.unwrap();
    let second = open(&path, Duration::from_secs(5)).await;

    let eng = OfferingKey::new("ENG100", TERM);
    let a = tokio::spawn({
        let eng = eng.clone();
        async move { first.enroll(3213, &eng).await }
    });
    let b = tokio::spawn({
        let eng = eng.clone();
        async move { second.enroll(4000, &eng).await }
    });
    let results = [a.await.unwrap(), b.await.unwrap()];

    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1, "exactly one enroll should take the last seat");
    let loser = results.iter().find_map(|r| r.as_ref().err()).unwrap();
    assert_eq!(loser.rejection(), Some(&Rejection::NoSeatsAvailable));

    let check = open(&path, Duration::from_secs(5)).await;
    let listing = check
        .offerings_for_term(TERM)
        .await
        .unwrap()
        .into_iter()
        .find(|l| l.course_id == "ENG100")
        .unwrap();
    assert_eq!((listing.enrollment, listing.capacity), (3, 3));
}

#[tokio::test]
async fn held_write_lock_surfaces_as_unavailable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("records.db");
    let path = path.to_str().unwrap().to_string();

    let holder = open(&path, Duration::from_secs(5)).await;
    holder.import_roster(&one_seat_roster()).await.unwrap();
    let waiter = open(&path, Duration::from_millis(50)).await;

    holder
        .db()
        .conn()
        .execute("BEGIN IMMEDIATE", ())
        .await
        .unwrap();

    let err = waiter
        .enroll(4000, &OfferingKey::new("ENG100", TERM))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StorageUnavailable);

    holder.db().conn().execute("ROLLBACK", ()).await.unwrap();

    // Once the lock is released the same call goes through.
    waiter
        .enroll(4000, &OfferingKey::new("ENG100", TERM))
        .await
        .unwrap();
}

#[tokio::test]
async fn call_timeout_bounds_a_longer_busy_wait() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("records.db");
    let path = path.to_str().unwrap().to_string();

    let holder = open(&path, Duration::from_secs(5)).await;
    holder.import_roster(&one_seat_roster()).await.unwrap();
    let call_timeout = Duration::from_millis(100);
    let waiter = open(&path, Duration::from_secs(3))
        .await
        .with_timeout(call_timeout);

    holder
        .db()
        .conn()
        .execute("BEGIN IMMEDIATE", ())
        .await
        .unwrap();

    let started = Instant::now();
    let err = waiter
        .enroll(4000, &OfferingKey::new("ENG100", TERM))
        .await
        .unwrap_err();
    let elapsed = started.elapsed();

    assert!(
        matches!(err, DatabaseError::Timeout(t) if t == call_timeout),
        "expected a call timeout, got {err:?}"
    );
    assert_eq!(err.kind(), ErrorKind::StorageUnavailable);
    assert!(
        elapsed < Duration::from_secs(1),
        "held lock kept the call waiting for {elapsed:?}"
    );

    holder.db().conn().execute("ROLLBACK", ()).await.unwrap();
}
