//! Results of the enroll and withdraw transitions.
//!
//! A transition either commits (`TransitionOutcome`) or is rejected by one of
//! the ordered validation checks (`Rejection`). Rejections are expected,
//! recoverable outcomes; their `Display` text is shown to the user verbatim.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::OfferingKey;

/// Why an enroll or withdraw request was refused. No mutation has happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Error)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    #[error("Course not offered")]
    CourseNotOffered,

    #[error("No seats available")]
    NoSeatsAvailable,

    #[error("Already taken")]
    AlreadyTaken,

    #[error("Already enrolled")]
    AlreadyEnrolled,

    /// Unmet prerequisite course identifiers, ordered by identifier.
    #[error("Prerequisites not met: {}", .missing.join(" "))]
    PrerequisitesNotMet { missing: Vec<String> },

    #[error("Not enrolled")]
    NotEnrolled,

    #[error("Cannot withdraw from a course with a grade")]
    CannotWithdrawGraded,
}

impl Rejection {
    /// Space-joined list of unmet prerequisites, if this is a prerequisite rejection.
    #[must_use]
    pub fn missing_prerequisites(&self) -> Option<String> {
        match self {
            Self::PrerequisitesNotMet { missing } => Some(missing.join(" ")),
            _ => None,
        }
    }
}

/// Which transition committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    Enroll,
    Withdraw,
}

impl TransitionKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enroll => "enroll",
            Self::Withdraw => "withdraw",
        }
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A committed enroll or withdraw, with the offering's post-commit counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TransitionOutcome {
    pub kind: TransitionKind,
    pub student_id: i64,
    pub offering: OfferingKey,
    pub enrollment: i64,
    pub capacity: i64,
}
