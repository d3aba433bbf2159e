use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A registered student.
///
/// The stored credential is never part of this struct; it only exists as a
/// salted hash in the `students.password_hash` column.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub address: String,
}
