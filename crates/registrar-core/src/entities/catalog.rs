use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::term::Term;

/// Catalog entry. Immutable reference data.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Course {
    pub id: String,
    pub dept_id: Option<String>,
    pub name: String,
    pub credits: i64,
}

/// Teaching staff member, referenced by offerings as instructor.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Faculty {
    pub id: i64,
    pub name: String,
}

/// Identifies one offering: a course in a given term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct OfferingKey {
    pub course_id: String,
    pub term: Term,
}

impl OfferingKey {
    #[must_use]
    pub fn new(course_id: impl Into<String>, term: Term) -> Self {
        Self {
            course_id: course_id.into(),
            term,
        }
    }
}

impl fmt::Display for OfferingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.course_id, self.term.quarter, self.term.year)
    }
}

/// A course scheduled for a specific term, with its own seat counters.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Offering {
    pub course_id: String,
    pub term: Term,
    pub enrollment: i64,
    pub capacity: i64,
    pub instructor_id: Option<i64>,
    pub textbook: Option<String>,
}

impl Offering {
    #[must_use]
    pub const fn has_free_seat(&self) -> bool {
        self.enrollment < self.capacity
    }
}

/// Weekly schedule for an offering.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Lecture {
    pub course_id: String,
    pub term: Term,
    pub class_time: Option<String>,
    pub classroom: Option<String>,
}

/// Directed requirement: `required_course_id` must be passed before
/// enrolling in `course_id`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Prerequisite {
    pub course_id: String,
    pub required_course_id: String,
}
