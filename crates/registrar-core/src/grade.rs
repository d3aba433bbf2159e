//! Grade classification rules.
//!
//! Grades are short text codes. A `NULL` grade means the student is currently
//! enrolled and ungraded; any posted grade closes the enrollment episode.

use crate::errors::CoreError;

/// Failing grade.
pub const FAILING: &str = "F";

/// Incomplete grade. Does not satisfy a prerequisite.
pub const INCOMPLETE: &str = "I";

/// Longest grade code accepted by [`normalize`] (e.g. `"A+"`).
pub const MAX_GRADE_LEN: usize = 2;

#[must_use]
pub fn is_failing(grade: &str) -> bool {
    grade == FAILING
}

/// Whether an existing transcript row for the same offering counts as the
/// course being already taken (posted, non-failing grade).
#[must_use]
pub fn counts_as_taken(grade: Option<&str>) -> bool {
    grade.is_some_and(|g| !is_failing(g))
}

/// Normalize a grade for storage: trimmed and upper-cased.
///
/// # Errors
///
/// Returns `CoreError::Validation` for empty grades, grades longer than
/// [`MAX_GRADE_LEN`], or grades containing anything other than ASCII letters,
/// `+`, or `-`.
pub fn normalize(grade: &str) -> Result<String, CoreError> {
    let trimmed = grade.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("grade must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_GRADE_LEN {
        return Err(CoreError::Validation(format!(
            "grade '{trimmed}' is longer than {MAX_GRADE_LEN} characters"
        )));
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c == '+' || c == '-')
    {
        return Err(CoreError::Validation(format!(
            "grade '{trimmed}' contains invalid characters"
        )));
    }
    Ok(trimmed.to_ascii_uppercase())
}
