//! Roster repository: bulk import of reference data, students, and history.
//!
//! The whole roster is written in one transaction. Rows are upserted, so
//! importing the same roster twice leaves the database unchanged. Offering
//! counters are taken from the roster as-is; they are not recomputed from
//! transcript rows.

use libsql::Transaction;
use serde::Serialize;

use registrar_auth::hash_password;
use registrar_core::grade::normalize;
use registrar_core::roster::Roster;

use crate::error::DatabaseError;
use crate::service::RecordsService;

/// Row counts written by an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub students: usize,
    pub faculty: usize,
    pub courses: usize,
    pub offerings: usize,
    pub lectures: usize,
    pub prerequisites: usize,
    pub transcript: usize,
}

async fn write_roster(
    tx: &Transaction,
    roster: &Roster,
    hashes: &[String],
) -> Result<ImportSummary, DatabaseError> {
    let mut summary = ImportSummary::default();

    for (student, hash) in roster.students.iter().zip(hashes) {
        tx.execute(
            "INSERT INTO students (id, name, address, password_hash) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                 name = excluded.name,
                 address = excluded.address,
                 password_hash = excluded.password_hash",
            libsql::params![
                student.id,
                student.name.as_str(),
                student.address.as_str(),
                hash.as_str()
            ],
        )
        .await?;
        summary.students += 1;
    }

    for member in &roster.faculty {
        tx.execute(
            "INSERT INTO faculty (id, name) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET name = excluded.name",
            libsql::params![member.id, member.name.as_str()],
        )
        .await?;
        summary.faculty += 1;
    }

    for course in &roster.courses {
        tx.execute(
            "INSERT INTO courses (id, dept_id, name, credits) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                 dept_id = excluded.dept_id,
                 name = excluded.name,
                 credits = excluded.credits",
            libsql::params![
                course.id.as_str(),
                course.dept_id.as_deref(),
                course.name.as_str(),
                course.credits
            ],
        )
        .await?;
        summary.courses += 1;
    }

    for offering in &roster.offerings {
        let quarter = offering.quarter.as_str();
        let year = i64::from(offering.year);
        tx.execute(
            "INSERT INTO offerings
                 (course_id, quarter, year, enrollment, capacity, instructor_id, textbook)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(course_id, quarter, year) DO UPDATE SET
                 enrollment = excluded.enrollment,
                 capacity = excluded.capacity,
                 instructor_id = excluded.instructor_id,
                 textbook = excluded.textbook",
            libsql::params![
                offering.course_id.as_str(),
                quarter,
                year,
                offering.enrollment,
                offering.capacity,
                offering.instructor_id,
                offering.textbook.as_deref()
            ],
        )
        .await?;
        summary.offerings += 1;

        if offering.has_schedule() {
            tx.execute(
                "INSERT INTO lectures (course_id, quarter, year, class_time, classroom)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(course_id, quarter, year) DO UPDATE SET
                     class_time = excluded.class_time,
                     classroom = excluded.classroom",
                libsql::params![
                    offering.course_id.as_str(),
                    quarter,
                    year,
                    offering.class_time.as_deref(),
                    offering.classroom.as_deref()
                ],
            )
            .await?;
            summary.lectures += 1;
        }
    }

    for edge in &roster.prerequisites {
        tx.execute(
            "INSERT INTO prerequisites (course_id, required_course_id) VALUES (?1, ?2)
             ON CONFLICT(course_id, required_course_id) DO NOTHING",
            libsql::params![edge.course_id.as_str(), edge.required_course_id.as_str()],
        )
        .await?;
        summary.prerequisites += 1;
    }

    for row in &roster.transcript {
        let grade = row.grade.as_deref().map(normalize).transpose()?;
        tx.execute(
            "INSERT INTO transcript (student_id, course_id, quarter, year, grade)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(student_id, course_id, quarter, year) DO UPDATE SET
                 grade = excluded.grade",
            libsql::params![
                row.student_id,
                row.course_id.as_str(),
                row.quarter.as_str(),
                i64::from(row.year),
                grade
            ],
        )
        .await?;
        summary.transcript += 1;
    }

    Ok(summary)
}

impl RecordsService {
    /// Import a roster in a single transaction.
    ///
    /// Student passwords are hashed before the transaction opens. Any failing
    /// row rolls back the whole import.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` if the roster fails validation,
    /// `DatabaseError::Auth` if hashing fails, or a storage error (including
    /// foreign-key violations for rows referencing unknown records).
    pub async fn import_roster(&self, roster: &Roster) -> Result<ImportSummary, DatabaseError> {
        roster.validate()?;

        let passwords: Vec<String> = roster.students.iter().map(|s| s.password.clone()).collect();
        let iterations = self.hash_iterations();
        let hashes = Self::off_runtime(move || {
            passwords
                .iter()
                .map(|p| hash_password(p, iterations))
                .collect::<Result<Vec<_>, _>>()
        })
        .await??;

        let summary = self
            .bounded("import_roster", async {
                let tx = self.begin_immediate().await?;
                let result = write_roster(&tx, roster, &hashes).await;
                Self::finish(tx, result).await
            })
            .await?;

        tracing::info!(
            students = summary.students,
            courses = summary.courses,
            offerings = summary.offerings,
            transcript = summary.transcript,
            "roster imported"
        );
        Ok(summary)
    }
}
