//! Side-channel events published after an enrollment transition commits.
//!
//! Events are notifications, never errors: the transition that produced them
//! has already committed by the time they are built.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::outcome::{TransitionKind, TransitionOutcome};
use crate::term::Term;

/// Warning raised when an offering drops below half of its capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LowEnrollmentWarning {
    pub course_id: String,
    pub term: Term,
    pub enrollment: i64,
    pub capacity: i64,
    pub trigger: TransitionKind,
    pub message: String,
    pub at: DateTime<Utc>,
}

/// Envelope for everything an event sink can receive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EnrollmentEvent {
    LowEnrollment(LowEnrollmentWarning),
}

impl EnrollmentEvent {
    /// Course identifier the event is about.
    #[must_use]
    pub fn course_id(&self) -> &str {
        match self {
            Self::LowEnrollment(w) => &w.course_id,
        }
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::LowEnrollment(w) => &w.message,
        }
    }
}

/// `enrollment < capacity / 2`, evaluated without integer truncation.
#[must_use]
pub const fn is_below_half(enrollment: i64, capacity: i64) -> bool {
    enrollment.saturating_mul(2) < capacity
}

/// Build the low-enrollment event for a committed transition, if one is due.
#[must_use]
pub fn low_enrollment_event(
    outcome: &TransitionOutcome,
    at: DateTime<Utc>,
) -> Option<EnrollmentEvent> {
    if !is_below_half(outcome.enrollment, outcome.capacity) {
        return None;
    }
    let course_id = outcome.offering.course_id.clone();
    Some(EnrollmentEvent::LowEnrollment(LowEnrollmentWarning {
        message: format!("Warning: {course_id} - enrollment is below 50%"),
        course_id,
        term: outcome.offering.term,
        enrollment: outcome.enrollment,
        capacity: outcome.capacity,
        trigger: outcome.kind,
        at,
    }))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::entities::OfferingKey;
    use crate::term::Quarter;

    fn outcome(enrollment: i64, capacity: i64) -> TransitionOutcome {
        TransitionOutcome {
            kind: TransitionKind::Withdraw,
            student_id: 1,
            offering: OfferingKey::new("CS101", Term::new(Quarter::Q1, 2024)),
            enrollment,
            capacity,
        }
    }

    #[rstest]
    #[case(0, 1, true)]
    #[case(2, 5, true)]
    #[case(3, 5, false)]
    #[case(5, 10, false)]
    #[case(4, 10, true)]
    #[case(0, 0, false)]
    fn half_capacity_threshold(#[case] enrollment: i64, #[case] capacity: i64, #[case] low: bool) {
        assert_eq!(is_below_half(enrollment, capacity), low);
    }

    #[test]
    fn event_carries_course_and_message() {
        let event = low_enrollment_event(&outcome(1, 10), Utc::now()).unwrap();
        assert_eq!(event.course_id(), "CS101");
        assert_eq!(event.message(), "Warning: CS101 - enrollment is below 50%");

        let EnrollmentEvent::LowEnrollment(warning) = event;
        assert_eq!(warning.enrollment, 1);
        assert_eq!(warning.capacity, 10);
        assert_eq!(warning.trigger, TransitionKind::Withdraw);
    }

    #[test]
    fn no_event_at_half_or_above() {
        assert!(low_enrollment_event(&outcome(5, 10), Utc::now()).is_none());
    }

    #[test]
    fn event_serializes_with_tag() {
        let event = low_enrollment_event(&outcome(0, 4), Utc::now()).unwrap();
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event"], "low_enrollment");
        assert_eq!(value["course_id"], "CS101");
        assert_eq!(value["term"]["quarter"], "Q1");
    }
}
