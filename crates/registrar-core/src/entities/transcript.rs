use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::term::Term;

/// A student's enrollment/grade record for one offering.
///
/// `grade == None` means the student is currently enrolled and ungraded.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub student_id: i64,
    pub course_id: String,
    pub term: Term,
    pub grade: Option<String>,
}

impl TranscriptEntry {
    /// Whether this row is an active (ungraded) enrollment.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.grade.is_none()
    }
}
