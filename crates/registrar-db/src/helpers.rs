//! Row-to-entity parsing helpers.
//!
//! Rows are column-indexed `libsql::Row`s. These helpers isolate the
//! conversions that every repo needs: quarter labels, years, and nullable
//! TEXT columns.

use registrar_core::term::{Quarter, Term};

use crate::error::DatabaseError;

/// Parse a `quarter` TEXT column.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the stored label is not `Q1`..`Q4`.
pub fn parse_quarter(s: &str) -> Result<Quarter, DatabaseError> {
    s.parse()
        .map_err(|e| DatabaseError::Query(format!("Failed to parse quarter '{s}': {e}")))
}

/// Narrow an INTEGER `year` column.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the value does not fit in `i32`.
pub fn parse_year(v: i64) -> Result<i32, DatabaseError> {
    i32::try_from(v).map_err(|_| DatabaseError::Query(format!("Year out of range: {v}")))
}

/// Read a `(quarter, year)` column pair starting at `idx`.
///
/// # Errors
///
/// Returns `DatabaseError` if either column is missing or malformed.
pub fn get_term(row: &libsql::Row, idx: i32) -> Result<Term, DatabaseError> {
    let quarter = parse_quarter(&row.get::<String>(idx)?)?;
    let year = parse_year(row.get::<i64>(idx + 1)?)?;
    Ok(Term::new(quarter, year))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
/// Use `get::<Option<String>>()` for nullable columns.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Bind parameters for an offering key: `(course_id, quarter, year)`.
pub(crate) fn term_params(term: Term) -> (&'static str, i64) {
    (term.quarter.as_str(), i64::from(term.year))
}
