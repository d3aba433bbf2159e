use anyhow::bail;
use registrar_core::entities::{CourseDetail, CurrentCourse, OfferingListing, Student, TranscriptRow};
use registrar_core::events::{EnrollmentEvent, LowEnrollmentWarning};
use registrar_core::outcome::{Rejection, TransitionOutcome};
use registrar_core::term::Term;
use schemars::{Schema, schema_for};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Type names accepted by `registrar schema`.
pub const TYPE_NAMES: [&str; 10] = [
    "term",
    "offering-listing",
    "transcript-row",
    "current-course",
    "course-detail",
    "student",
    "transition-outcome",
    "rejection",
    "enrollment-event",
    "low-enrollment-warning",
];

fn schema_by_name(name: &str) -> Option<Schema> {
    let normalized = name.trim().to_ascii_lowercase().replace('_', "-");
    let schema = match normalized.as_str() {
        "term" => schema_for!(Term),
        "offering-listing" => schema_for!(OfferingListing),
        "transcript-row" => schema_for!(TranscriptRow),
        "current-course" => schema_for!(CurrentCourse),
        "course-detail" => schema_for!(CourseDetail),
        "student" => schema_for!(Student),
        "transition-outcome" => schema_for!(TransitionOutcome),
        "rejection" => schema_for!(Rejection),
        "enrollment-event" => schema_for!(EnrollmentEvent),
        "low-enrollment-warning" => schema_for!(LowEnrollmentWarning),
        _ => return None,
    };
    Some(schema)
}

/// Handle `registrar schema <type>`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let Some(schema) = schema_by_name(&args.type_name) else {
        bail!(
            "unknown type '{}'; expected one of: {}",
            args.type_name,
            TYPE_NAMES.join(", ")
        );
    };
    output(&schema, flags.format)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn every_listed_type_has_a_schema() {
        for name in TYPE_NAMES {
            assert!(schema_by_name(name).is_some(), "missing schema for {name}");
        }
    }

    #[test]
    fn lookup_accepts_snake_case_and_case_variants() {
        assert!(schema_by_name("Transcript_Row").is_some());
        assert!(schema_by_name("nope").is_none());
    }

    #[test]
    fn transcript_row_schema_names_its_fields() {
        let schema = schema_by_name("transcript-row").unwrap();
        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(value["title"], "TranscriptRow");
        assert!(value["properties"].get("grade").is_some());
    }
}
