//! Optional pinning of the current academic term.

use serde::{Deserialize, Serialize};

use registrar_core::term::{Quarter, Term};

use crate::error::ConfigError;

/// When both fields are set, every term-scoped command uses this term instead
/// of deriving one from the wall clock.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TermConfig {
    #[serde(default)]
    pub quarter: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
}

impl TermConfig {
    /// Resolve the configured term, falling back to the wall clock.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if only one of `quarter`/`year` is
    /// set or the quarter label is unknown.
    pub fn resolve(&self) -> Result<Term, ConfigError> {
        match (&self.quarter, self.year) {
            (None, None) => Ok(Term::current()),
            (Some(label), Some(year)) => {
                let quarter = label.parse::<Quarter>().map_err(|e| ConfigError::InvalidValue {
                    field: "term.quarter".into(),
                    reason: e.to_string(),
                })?;
                Ok(Term::new(quarter, year))
            }
            (Some(_), None) => Err(ConfigError::InvalidValue {
                field: "term.year".into(),
                reason: "term.quarter is set but term.year is missing".into(),
            }),
            (None, Some(_)) => Err(ConfigError::InvalidValue {
                field: "term.quarter".into(),
                reason: "term.year is set but term.quarter is missing".into(),
            }),
        }
    }

    #[must_use]
    pub const fn is_pinned(&self) -> bool {
        self.quarter.is_some() && self.year.is_some()
    }
}
