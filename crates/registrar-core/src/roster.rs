//! Roster fixture types for bulk import.
//!
//! A roster describes reference data (faculty, courses, offerings, schedule,
//! prerequisites), registered students with their initial passwords, and
//! historical transcript rows. It is deserialized from TOML by the CLI and
//! written in a single transaction by `registrar-db`.

use serde::{Deserialize, Serialize};

use crate::entities::{Course, Faculty, Prerequisite};
use crate::errors::CoreError;
use crate::term::{Quarter, Term};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Roster {
    #[serde(default)]
    pub students: Vec<RosterStudent>,
    #[serde(default)]
    pub faculty: Vec<Faculty>,
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub offerings: Vec<RosterOffering>,
    #[serde(default)]
    pub prerequisites: Vec<Prerequisite>,
    #[serde(default)]
    pub transcript: Vec<RosterTranscriptRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RosterStudent {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub address: String,
    /// Plaintext initial password; hashed before it reaches storage.
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RosterOffering {
    pub course_id: String,
    pub quarter: Quarter,
    pub year: i32,
    pub capacity: i64,
    #[serde(default)]
    pub enrollment: i64,
    pub instructor_id: Option<i64>,
    pub textbook: Option<String>,
    pub class_time: Option<String>,
    pub classroom: Option<String>,
}

impl RosterOffering {
    #[must_use]
    pub const fn term(&self) -> Term {
        Term::new(self.quarter, self.year)
    }

    /// Whether the offering carries lecture schedule information.
    #[must_use]
    pub const fn has_schedule(&self) -> bool {
        self.class_time.is_some() || self.classroom.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RosterTranscriptRow {
    pub student_id: i64,
    pub course_id: String,
    pub quarter: Quarter,
    pub year: i32,
    pub grade: Option<String>,
}

impl Roster {
    /// Check counters and credentials before anything is written.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` describing the first offending record.
    pub fn validate(&self) -> Result<(), CoreError> {
        for student in &self.students {
            if student.password.is_empty() {
                return Err(CoreError::Validation(format!(
                    "student {} has an empty password",
                    student.id
                )));
            }
        }
        for course in &self.courses {
            if course.credits < 0 {
                return Err(CoreError::Validation(format!(
                    "course {} has negative credits",
                    course.id
                )));
            }
        }
        for offering in &self.offerings {
            if offering.capacity < 0 || offering.enrollment < 0 {
                return Err(CoreError::Validation(format!(
                    "offering {} {} has negative counters",
                    offering.course_id,
                    offering.term()
                )));
            }
            if offering.enrollment > offering.capacity {
                return Err(CoreError::Validation(format!(
                    "offering {} {} has enrollment {} above capacity {}",
                    offering.course_id,
                    offering.term(),
                    offering.enrollment,
                    offering.capacity
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const SAMPLE: &str = r#"
[[students]]
id = 3213
name = "Tom Jones"
address = "12 George St"
password = "hunter2"

[[faculty]]
id = 1
name = "Dr. Smith"

[[courses]]
id = "CS201"
dept_id = "CS"
name = "Data Structures"
credits = 6

[[offerings]]
course_id = "CS201"
quarter = "Q1"
year = 2024
capacity = 30
instructor_id = 1
class_time = "Mon 10:00"

[[prerequisites]]
course_id = "CS201"
required_course_id = "MATH100"

[[transcript]]
student_id = 3213
course_id = "MATH100"
quarter = "Q4"
year = 2023
grade = "B"
"#;

    #[test]
    fn parses_toml_fixture() {
        let roster: Roster = toml::from_str(SAMPLE).unwrap();
        assert_eq!(roster.students.len(), 1);
        assert_eq!(roster.students[0].address, "12 George St");
        assert_eq!(roster.offerings[0].term(), Term::new(Quarter::Q1, 2024));
        assert_eq!(roster.offerings[0].enrollment, 0);
        assert!(roster.offerings[0].has_schedule());
        assert_eq!(roster.transcript[0].grade.as_deref(), Some("B"));
        roster.validate().unwrap();
    }

    #[test]
    fn validate_rejects_overfull_offering() {
        let mut roster: Roster = toml::from_str(SAMPLE).unwrap();
        roster.offerings[0].enrollment = 31;
        assert!(matches!(roster.validate(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn validate_rejects_empty_password() {
        let mut roster: Roster = toml::from_str(SAMPLE).unwrap();
        roster.students[0].password.clear();
        assert!(matches!(roster.validate(), Err(CoreError::Validation(_))));
    }
}
