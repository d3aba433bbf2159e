//! Enrollment repository: the enroll and withdraw transitions and grade posting.
//!
//! Enroll and withdraw run their ordered checks and the mutation inside one
//! `BEGIN IMMEDIATE` transaction, so two sessions can never both pass the
//! seat check for the last seat. The first failed check rolls back and comes
//! back as `DatabaseError::Rejected`.

use libsql::Transaction;

use registrar_core::entities::OfferingKey;
use registrar_core::grade::{FAILING, INCOMPLETE, counts_as_taken, normalize};
use registrar_core::outcome::{Rejection, TransitionKind, TransitionOutcome};

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, term_params};
use crate::service::RecordsService;

/// Current `(enrollment, capacity)` of an offering, if it exists.
async fn offering_counters(
    tx: &Transaction,
    offering: &OfferingKey,
) -> Result<Option<(i64, i64)>, DatabaseError> {
    let (quarter, year) = term_params(offering.term);
    let mut rows = tx
        .query(
            "SELECT enrollment, capacity FROM offerings
             WHERE course_id = ?1 AND quarter = ?2 AND year = ?3",
            libsql::params![offering.course_id.as_str(), quarter, year],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some((row.get::<i64>(0)?, row.get::<i64>(1)?))),
        None => Ok(None),
    }
}

/// The transcript row for this exact offering: `None` if absent, otherwise
/// `Some(grade)` where the grade itself may be NULL.
async fn transcript_grade(
    tx: &Transaction,
    student_id: i64,
    offering: &OfferingKey,
) -> Result<Option<Option<String>>, DatabaseError> {
    let (quarter, year) = term_params(offering.term);
    let mut rows = tx
        .query(
            "SELECT grade FROM transcript
             WHERE student_id = ?1 AND course_id = ?2 AND quarter = ?3 AND year = ?4",
            libsql::params![student_id, offering.course_id.as_str(), quarter, year],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(get_opt_string(&row, 0)?)),
        None => Ok(None),
    }
}

/// Prerequisites of `course_id` the student has not passed, ordered by id.
///
/// A prerequisite counts as passed if any transcript row for it carries a
/// grade other than failing or incomplete.
async fn unmet_prerequisites(
    tx: &Transaction,
    student_id: i64,
    course_id: &str,
) -> Result<Vec<String>, DatabaseError> {
    let mut rows = tx
        .query(
            "SELECT r.required_course_id FROM prerequisites r
             WHERE r.course_id = ?1
               AND NOT EXISTS (
                   SELECT 1 FROM transcript t
                   WHERE t.student_id = ?2
                     AND t.course_id = r.required_course_id
                     AND t.grade IS NOT NULL
                     AND t.grade NOT IN (?3, ?4)
               )
             ORDER BY r.required_course_id",
            libsql::params![course_id, student_id, FAILING, INCOMPLETE],
        )
        .await?;
    let mut missing = Vec::new();
    while let Some(row) = rows.next().await? {
        missing.push(row.get::<String>(0)?);
    }
    Ok(missing)
}

async fn enroll_steps(
    tx: &Transaction,
    student_id: i64,
    offering: &OfferingKey,
) -> Result<TransitionOutcome, DatabaseError> {
    let (enrollment, capacity) = offering_counters(tx, offering)
        .await?
        .ok_or(Rejection::CourseNotOffered)?;

    if enrollment >= capacity {
        return Err(Rejection::NoSeatsAvailable.into());
    }

    if let Some(existing) = transcript_grade(tx, student_id, offering).await? {
        let rejection = if counts_as_taken(existing.as_deref()) {
            Rejection::AlreadyTaken
        } else {
            Rejection::AlreadyEnrolled
        };
        return Err(rejection.into());
    }

    let missing = unmet_prerequisites(tx, student_id, &offering.course_id).await?;
    if !missing.is_empty() {
        return Err(Rejection::PrerequisitesNotMet { missing }.into());
    }

    let (quarter, year) = term_params(offering.term);
    tx.execute(
        "INSERT INTO transcript (student_id, course_id, quarter, year, grade)
         VALUES (?1, ?2, ?3, ?4, NULL)",
        libsql::params![student_id, offering.course_id.as_str(), quarter, year],
    )
    .await?;
    tx.execute(
        "UPDATE offerings SET enrollment = enrollment + 1
         WHERE course_id = ?1 AND quarter = ?2 AND year = ?3",
        libsql::params![offering.course_id.as_str(), quarter, year],
    )
    .await?;

    let (enrollment, capacity) = offering_counters(tx, offering)
        .await?
        .ok_or(DatabaseError::NoResult)?;
    Ok(TransitionOutcome {
        kind: TransitionKind::Enroll,
        student_id,
        offering: offering.clone(),
        enrollment,
        capacity,
    })
}

async fn withdraw_steps(
    tx: &Transaction,
    student_id: i64,
    offering: &OfferingKey,
) -> Result<TransitionOutcome, DatabaseError> {
    let existing = transcript_grade(tx, student_id, offering)
        .await?
        .ok_or(Rejection::NotEnrolled)?;
    if existing.is_some() {
        return Err(Rejection::CannotWithdrawGraded.into());
    }

    let (quarter, year) = term_params(offering.term);
    tx.execute(
        "DELETE FROM transcript
         WHERE student_id = ?1 AND course_id = ?2 AND quarter = ?3 AND year = ?4",
        libsql::params![student_id, offering.course_id.as_str(), quarter, year],
    )
    .await?;
    let changed = tx
        .execute(
            "UPDATE offerings SET enrollment = enrollment - 1
             WHERE course_id = ?1 AND quarter = ?2 AND year = ?3 AND enrollment > 0",
            libsql::params![offering.course_id.as_str(), quarter, year],
        )
        .await?;
    if changed == 0 {
        tracing::warn!(%offering, "withdraw found enrollment already at zero");
    }

    let (enrollment, capacity) = offering_counters(tx, offering)
        .await?
        .ok_or(DatabaseError::NoResult)?;
    Ok(TransitionOutcome {
        kind: TransitionKind::Withdraw,
        student_id,
        offering: offering.clone(),
        enrollment,
        capacity,
    })
}

impl RecordsService {
    /// Enroll a student in an offering.
    ///
    /// Checks, in order: offering exists, a seat is free, not already taken,
    /// not already enrolled, prerequisites passed. The first failure is
    /// returned as `DatabaseError::Rejected` with nothing written.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Rejected` for a failed check, `Timeout` if the
    /// call exceeds its bound, or a storage error.
    pub async fn enroll(
        &self,
        student_id: i64,
        offering: &OfferingKey,
    ) -> Result<TransitionOutcome, DatabaseError> {
        let outcome = self
            .bounded("enroll", async {
                let tx = self.begin_immediate().await?;
                let result = enroll_steps(&tx, student_id, offering).await;
                Self::finish(tx, result).await
            })
            .await;

        match &outcome {
            Ok(o) => {
                tracing::info!(student_id, %offering, enrollment = o.enrollment, "enrolled");
                self.notify_committed(o);
            }
            Err(DatabaseError::Rejected(r)) => {
                tracing::debug!(student_id, %offering, rejection = %r, "enroll rejected");
            }
            Err(_) => {}
        }
        outcome
    }

    /// Withdraw a student from an ungraded enrollment.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Rejected` with `NotEnrolled` or
    /// `CannotWithdrawGraded`, `Timeout`, or a storage error.
    pub async fn withdraw(
        &self,
        student_id: i64,
        offering: &OfferingKey,
    ) -> Result<TransitionOutcome, DatabaseError> {
        let outcome = self
            .bounded("withdraw", async {
                let tx = self.begin_immediate().await?;
                let result = withdraw_steps(&tx, student_id, offering).await;
                Self::finish(tx, result).await
            })
            .await;

        match &outcome {
            Ok(o) => {
                tracing::info!(student_id, %offering, enrollment = o.enrollment, "withdrew");
                self.notify_committed(o);
            }
            Err(DatabaseError::Rejected(r)) => {
                tracing::debug!(student_id, %offering, rejection = %r, "withdraw rejected");
            }
            Err(_) => {}
        }
        outcome
    }

    /// Post a grade on an existing transcript row, closing the enrollment.
    ///
    /// The grade is trimmed and upper-cased before storage. Returns the
    /// stored grade.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for an unusable grade and
    /// `DatabaseError::NotFound` if the student has no row for the offering.
    pub async fn post_grade(
        &self,
        student_id: i64,
        offering: &OfferingKey,
        grade: &str,
    ) -> Result<String, DatabaseError> {
        let grade = normalize(grade)?;
        let (quarter, year) = term_params(offering.term);
        let changed = self
            .bounded("post_grade", async {
                Ok(self
                    .db()
                    .conn()
                    .execute(
                        "UPDATE transcript SET grade = ?5
                         WHERE student_id = ?1 AND course_id = ?2 AND quarter = ?3 AND year = ?4",
                        libsql::params![
                            student_id,
                            offering.course_id.as_str(),
                            quarter,
                            year,
                            grade.as_str()
                        ],
                    )
                    .await?)
            })
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found(
                "transcript entry",
                format!("{student_id} {offering}"),
            ));
        }
        tracing::info!(student_id, %offering, grade = %grade, "grade posted");
        Ok(grade)
    }
}
