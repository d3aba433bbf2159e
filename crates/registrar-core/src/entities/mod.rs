//! Entity structs for the student-records database.
//!
//! Base entities map one-to-one onto tables created by the `registrar-db`
//! migrations. The `views` module holds the joined projections returned by
//! catalog queries. All structs derive `Serialize`, `Deserialize`, and
//! `JsonSchema` for CLI output and schema dumps.

mod catalog;
mod student;
mod transcript;
mod views;

pub use catalog::{Course, Faculty, Lecture, Offering, OfferingKey, Prerequisite};
pub use student::Student;
pub use transcript::TranscriptEntry;
pub use views::{CourseDetail, CurrentCourse, OfferingListing, TranscriptRow};
