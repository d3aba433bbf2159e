//! Joined read models returned by catalog queries.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::term::Quarter;

/// One row of the "available this term" listing: offering joined with its
/// course, instructor, and lecture schedule.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct OfferingListing {
    pub course_id: String,
    pub dept_id: Option<String>,
    pub name: String,
    pub credits: i64,
    pub enrollment: i64,
    pub capacity: i64,
    pub instructor: Option<String>,
    pub class_time: Option<String>,
    pub classroom: Option<String>,
}

/// One transcript line for a student, joined with course and offering info.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TranscriptRow {
    pub course_id: String,
    pub name: String,
    pub credits: i64,
    pub quarter: Quarter,
    pub year: i32,
    pub grade: Option<String>,
    pub enrollment: i64,
    pub capacity: i64,
    pub instructor: Option<String>,
}

/// An active (ungraded) enrollment in the current term.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CurrentCourse {
    pub course_id: String,
    pub name: String,
}

/// Full detail for one course as taken by one student.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CourseDetail {
    pub course_id: String,
    pub name: String,
    pub credits: i64,
    pub quarter: Quarter,
    pub year: i32,
    pub class_time: Option<String>,
    pub classroom: Option<String>,
    pub instructor: Option<String>,
    pub textbook: Option<String>,
    pub enrollment: i64,
    pub capacity: i64,
    pub grade: Option<String>,
}
