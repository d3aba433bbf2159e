use clap::{Args, Subcommand};

use crate::cli::subcommands::ProfileCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Show the current academic term.
    Term(TermArgs),
    /// List offerings available in the term.
    Offerings(TermArgs),
    /// Verify credentials and show the student header.
    Login,
    /// Show the logged-in student's full transcript.
    Transcript,
    /// List the logged-in student's ungraded courses in the term.
    Current(TermArgs),
    /// Show one course as taken by the logged-in student.
    Detail(DetailArgs),
    /// Enroll the logged-in student in an offering.
    Enroll(OfferingArgs),
    /// Withdraw the logged-in student from an ungraded offering.
    Withdraw(OfferingArgs),
    /// Personal details.
    Profile {
        #[command(subcommand)]
        action: ProfileCommands,
    },
    /// Import a roster TOML file (reference data, students, history).
    Import(ImportArgs),
    /// Post a grade for a student's enrollment.
    Grade(GradeArgs),
    /// Print the JSON Schema of an output or event type.
    Schema(SchemaArgs),
}

/// Explicit term selection. Both or neither must be given.
#[derive(Clone, Debug, Default, Args)]
pub struct TermArgs {
    /// Quarter label (Q1..Q4)
    #[arg(long)]
    pub quarter: Option<String>,

    /// Calendar year
    #[arg(long)]
    pub year: Option<i32>,
}

#[derive(Clone, Debug, Args)]
pub struct DetailArgs {
    /// Course identifier, e.g. CS101
    pub course_id: String,
}

#[derive(Clone, Debug, Args)]
pub struct OfferingArgs {
    /// Course identifier, e.g. CS101
    pub course_id: String,

    #[command(flatten)]
    pub term: TermArgs,
}

#[derive(Clone, Debug, Args)]
pub struct ImportArgs {
    /// Path to the roster TOML file
    pub path: String,
}

#[derive(Clone, Debug, Args)]
pub struct GradeArgs {
    /// Student identifier
    pub student_id: i64,

    /// Course identifier
    pub course_id: String,

    /// Grade to post, e.g. A, B+, F, I
    pub grade: String,

    #[command(flatten)]
    pub term: TermArgs,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Type name, e.g. transcript-row, enrollment-event
    pub type_name: String,
}
