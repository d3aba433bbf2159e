//! Catalog repository: read-only projections over offerings and transcripts.

use registrar_core::entities::{CourseDetail, CurrentCourse, OfferingListing, TranscriptRow};
use registrar_core::term::Term;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, get_term, term_params};
use crate::service::RecordsService;

/// Chronological rank of a quarter within its calendar year. `Q2` spans
/// December to February and is ranked by its January and February months.
const QUARTER_RANK: &str =
    "CASE t.quarter WHEN 'Q2' THEN 0 WHEN 'Q3' THEN 1 WHEN 'Q4' THEN 2 ELSE 3 END";

fn row_to_listing(row: &libsql::Row) -> Result<OfferingListing, DatabaseError> {
    Ok(OfferingListing {
        course_id: row.get(0)?,
        dept_id: get_opt_string(row, 1)?,
        name: row.get(2)?,
        credits: row.get(3)?,
        enrollment: row.get(4)?,
        capacity: row.get(5)?,
        instructor: get_opt_string(row, 6)?,
        class_time: get_opt_string(row, 7)?,
        classroom: get_opt_string(row, 8)?,
    })
}

fn row_to_transcript(row: &libsql::Row) -> Result<TranscriptRow, DatabaseError> {
    let term = get_term(row, 3)?;
    Ok(TranscriptRow {
        course_id: row.get(0)?,
        name: row.get(1)?,
        credits: row.get(2)?,
        quarter: term.quarter,
        year: term.year,
        grade: get_opt_string(row, 5)?,
        enrollment: row.get(6)?,
        capacity: row.get(7)?,
        instructor: get_opt_string(row, 8)?,
    })
}

fn row_to_detail(row: &libsql::Row) -> Result<CourseDetail, DatabaseError> {
    let term = get_term(row, 3)?;
    Ok(CourseDetail {
        course_id: row.get(0)?,
        name: row.get(1)?,
        credits: row.get(2)?,
        quarter: term.quarter,
        year: term.year,
        class_time: get_opt_string(row, 5)?,
        classroom: get_opt_string(row, 6)?,
        instructor: get_opt_string(row, 7)?,
        textbook: get_opt_string(row, 8)?,
        enrollment: row.get(9)?,
        capacity: row.get(10)?,
        grade: get_opt_string(row, 11)?,
    })
}

impl RecordsService {
    /// Offerings available in `term`, with course, instructor, and schedule.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or times out.
    pub async fn offerings_for_term(&self, term: Term) -> Result<Vec<OfferingListing>, DatabaseError> {
        let (quarter, year) = term_params(term);
        self.bounded("offerings_for_term", async {
            let mut rows = self
                .db()
                .conn()
                .query(
                    "SELECT o.course_id, c.dept_id, c.name, c.credits, o.enrollment, o.capacity,
                            f.name, l.class_time, l.classroom
                     FROM offerings o
                     JOIN courses c ON c.id = o.course_id
                     LEFT JOIN faculty f ON f.id = o.instructor_id
                     LEFT JOIN lectures l
                         ON l.course_id = o.course_id AND l.quarter = o.quarter AND l.year = o.year
                     WHERE o.quarter = ?1 AND o.year = ?2
                     ORDER BY o.course_id",
                    libsql::params![quarter, year],
                )
                .await?;
            let mut listings = Vec::new();
            while let Some(row) = rows.next().await? {
                listings.push(row_to_listing(&row)?);
            }
            Ok(listings)
        })
        .await
    }

    /// Every transcript row of a student, ordered by quarter, year, course.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or times out.
    pub async fn transcript_for(&self, student_id: i64) -> Result<Vec<TranscriptRow>, DatabaseError> {
        self.bounded("transcript_for", async {
            let mut rows = self
                .db()
                .conn()
                .query(
                    "SELECT c.id, c.name, c.credits, t.quarter, t.year, t.grade,
                            o.enrollment, o.capacity, f.name
                     FROM transcript t
                     JOIN courses c ON c.id = t.course_id
                     JOIN offerings o
                         ON o.course_id = t.course_id AND o.quarter = t.quarter AND o.year = t.year
                     LEFT JOIN faculty f ON f.id = o.instructor_id
                     WHERE t.student_id = ?1
                     ORDER BY t.quarter, t.year, t.course_id",
                    [student_id],
                )
                .await?;
            let mut transcript = Vec::new();
            while let Some(row) = rows.next().await? {
                transcript.push(row_to_transcript(&row)?);
            }
            Ok(transcript)
        })
        .await
    }

    /// Active (ungraded) enrollments of a student in `term`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or times out.
    pub async fn current_courses_for(
        &self,
        student_id: i64,
        term: Term,
    ) -> Result<Vec<CurrentCourse>, DatabaseError> {
        let (quarter, year) = term_params(term);
        self.bounded("current_courses_for", async {
            let mut rows = self
                .db()
                .conn()
                .query(
                    "SELECT t.course_id, c.name
                     FROM transcript t
                     JOIN courses c ON c.id = t.course_id
                     WHERE t.student_id = ?1 AND t.quarter = ?2 AND t.year = ?3
                       AND t.grade IS NULL
                     ORDER BY t.course_id",
                    libsql::params![student_id, quarter, year],
                )
                .await?;
            let mut courses = Vec::new();
            while let Some(row) = rows.next().await? {
                courses.push(CurrentCourse {
                    course_id: row.get(0)?,
                    name: row.get(1)?,
                });
            }
            Ok(courses)
        })
        .await
    }

    /// Detail of one course as taken by one student. When the student has
    /// taken the course more than once, the most recent term wins.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the student has no transcript row
    /// for the course.
    pub async fn course_detail(
        &self,
        course_id: &str,
        student_id: i64,
    ) -> Result<CourseDetail, DatabaseError> {
        let sql = format!(
            "SELECT t.course_id, c.name, c.credits, t.quarter, t.year,
                    l.class_time, l.classroom, f.name, o.textbook,
                    o.enrollment, o.capacity, t.grade
             FROM transcript t
             JOIN offerings o
                 ON o.course_id = t.course_id AND o.quarter = t.quarter AND o.year = t.year
             JOIN courses c ON c.id = t.course_id
             LEFT JOIN faculty f ON f.id = o.instructor_id
             LEFT JOIN lectures l
                 ON l.course_id = o.course_id AND l.quarter = o.quarter AND l.year = o.year
             WHERE t.student_id = ?1 AND t.course_id = ?2
             ORDER BY t.year DESC, {QUARTER_RANK} DESC
             LIMIT 1"
        );
        let detail = self
            .bounded("course_detail", async {
                let mut rows = self
                    .db()
                    .conn()
                    .query(&sql, libsql::params![student_id, course_id])
                    .await?;
                match rows.next().await? {
                    Some(row) => Ok(Some(row_to_detail(&row)?)),
                    None => Ok(None),
                }
            })
            .await?;
        detail.ok_or_else(|| DatabaseError::not_found("course", course_id))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use registrar_core::entities::OfferingKey;
    use registrar_core::term::Quarter;

    use super::*;
    use crate::test_support::helpers::{CURRENT, OTHER, STUDENT, seeded_service};

    #[tokio::test]
    async fn offerings_for_current_term_are_joined() {
        let svc = seeded_service().await;
        let listings = svc.offerings_for_term(CURRENT).await.unwrap();

        let ids: Vec<&str> = listings.iter().map(|l| l.course_id.as_str()).collect();
        assert_eq!(ids, ["ART100", "CHEM200", "CS101", "CS201", "CS301", "ENG100"]);

        let cs201 = &listings[3];
        assert_eq!(cs201.name, "Data Structures");
        assert_eq!(cs201.dept_id.as_deref(), Some("CS"));
        assert_eq!(cs201.instructor.as_deref(), Some("Dr. Smith"));
        assert_eq!(cs201.class_time.as_deref(), Some("Tue 10:00"));
        assert_eq!((cs201.enrollment, cs201.capacity), (5, 10));

        let eng100 = &listings[5];
        assert_eq!(eng100.instructor, None);
        assert_eq!(eng100.classroom, None);
    }

    #[tokio::test]
    async fn offerings_for_empty_term() {
        let svc = seeded_service().await;
        let listings = svc
            .offerings_for_term(Term::new(Quarter::Q3, 2030))
            .await
            .unwrap();
        assert!(listings.is_empty());
    }

    #[tokio::test]
    async fn transcript_includes_history_in_order() {
        let svc = seeded_service().await;
        let transcript = svc.transcript_for(STUDENT).await.unwrap();

        let keys: Vec<(String, Quarter, i32)> = transcript
            .iter()
            .map(|r| (r.course_id.clone(), r.quarter, r.year))
            .collect();
        assert_eq!(
            keys,
            [
                ("MATH100".to_string(), Quarter::Q2, 2023),
                ("CHEM100".to_string(), Quarter::Q4, 2023),
                ("MATH100".to_string(), Quarter::Q4, 2023),
            ]
        );
        assert_eq!(transcript[0].grade.as_deref(), Some("F"));
        assert_eq!(transcript[2].instructor.as_deref(), Some("Dr. Okafor"));
    }

    #[tokio::test]
    async fn current_courses_only_lists_ungraded_rows_in_term() {
        let svc = seeded_service().await;
        assert!(svc.current_courses_for(STUDENT, CURRENT).await.unwrap().is_empty());

        svc.enroll(STUDENT, &OfferingKey::new("CS201", CURRENT))
            .await
            .unwrap();
        svc.enroll(STUDENT, &OfferingKey::new("ENG100", CURRENT))
            .await
            .unwrap();
        svc.post_grade(STUDENT, &OfferingKey::new("ENG100", CURRENT), "A")
            .await
            .unwrap();

        let current = svc.current_courses_for(STUDENT, CURRENT).await.unwrap();
        assert_eq!(
            current,
            [CurrentCourse {
                course_id: "CS201".into(),
                name: "Data Structures".into(),
            }]
        );
    }

    #[tokio::test]
    async fn course_detail_picks_most_recent_attempt() {
        let svc = seeded_service().await;
        let detail = svc.course_detail("MATH100", STUDENT).await.unwrap();

        assert_eq!((detail.quarter, detail.year), (Quarter::Q4, 2023));
        assert_eq!(detail.grade.as_deref(), Some("B"));
        assert_eq!(detail.textbook.as_deref(), Some("Calculus"));
        assert_eq!(detail.classroom.as_deref(), Some("M101"));
        assert_eq!(detail.instructor.as_deref(), Some("Dr. Okafor"));
        assert_eq!((detail.enrollment, detail.capacity), (35, 40));
    }

    #[tokio::test]
    async fn course_detail_without_schedule_or_instructor() {
        let svc = seeded_service().await;
        let detail = svc.course_detail("CHEM100", STUDENT).await.unwrap();
        assert_eq!(detail.grade.as_deref(), Some("I"));
        assert_eq!(detail.instructor, None);
        assert_eq!(detail.class_time, None);
    }

    #[tokio::test]
    async fn course_detail_not_taken_is_not_found() {
        let svc = seeded_service().await;
        let err = svc.course_detail("MATH100", OTHER).await.unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { .. }));
    }
}
