//! Academic quarters and terms.
//!
//! A term is a quarter label paired with a calendar year. The current term is
//! derived from the wall clock with a fixed, one-indexed month mapping:
//!
//! ```text
//! Sep Oct Nov → Q1
//! Dec Jan Feb → Q2
//! Mar Apr May → Q3
//! Jun Jul Aug → Q4
//! ```
//!
//! The year is always the calendar year of the date, so December and the
//! following January fall in `Q2` of different years.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Academic quarter label as stored in the `quarter` column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Q1 => "Q1",
            Self::Q2 => "Q2",
            Self::Q3 => "Q3",
            Self::Q4 => "Q4",
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Quarter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "Q1" => Ok(Self::Q1),
            "Q2" => Ok(Self::Q2),
            "Q3" => Ok(Self::Q3),
            "Q4" => Ok(Self::Q4),
            _ => Err(CoreError::InvalidTerm(format!("unknown quarter '{s}'"))),
        }
    }
}

/// One-indexed calendar month (1 = January) to its quarter.
const fn quarter_for_month(month: u32) -> Option<Quarter> {
    match month {
        9..=11 => Some(Quarter::Q1),
        12 | 1 | 2 => Some(Quarter::Q2),
        3..=5 => Some(Quarter::Q3),
        6..=8 => Some(Quarter::Q4),
        _ => None,
    }
}

/// A quarter in a specific calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Term {
    pub quarter: Quarter,
    pub year: i32,
}

impl Term {
    #[must_use]
    pub const fn new(quarter: Quarter, year: i32) -> Self {
        Self { quarter, year }
    }

    /// Derive the term containing `date`.
    #[must_use]
    pub fn from_date<D: Datelike>(date: &D) -> Self {
        // chrono months are always 1..=12.
        let quarter = quarter_for_month(date.month()).unwrap_or(Quarter::Q2);
        Self {
            quarter,
            year: date.year(),
        }
    }

    /// The term containing the current local date.
    #[must_use]
    pub fn current() -> Self {
        Self::from_date(&Local::now().date_naive())
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.quarter, self.year)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(1, Quarter::Q2)]
    #[case(2, Quarter::Q2)]
    #[case(3, Quarter::Q3)]
    #[case(4, Quarter::Q3)]
    #[case(5, Quarter::Q3)]
    #[case(6, Quarter::Q4)]
    #[case(7, Quarter::Q4)]
    #[case(8, Quarter::Q4)]
    #[case(9, Quarter::Q1)]
    #[case(10, Quarter::Q1)]
    #[case(11, Quarter::Q1)]
    #[case(12, Quarter::Q2)]
    fn month_maps_to_quarter(#[case] month: u32, #[case] expected: Quarter) {
        assert_eq!(quarter_for_month(month), Some(expected));

        let date = NaiveDate::from_ymd_opt(2024, month, 15).unwrap();
        assert_eq!(Term::from_date(&date), Term::new(expected, 2024));
    }

    #[rstest]
    #[case(0)]
    #[case(13)]
    fn month_out_of_range_has_no_quarter(#[case] month: u32) {
        assert_eq!(quarter_for_month(month), None);
    }

    #[test]
    fn december_and_january_share_quarter_but_not_year() {
        let dec = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let jan = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(Term::from_date(&dec), Term::new(Quarter::Q2, 2024));
        assert_eq!(Term::from_date(&jan), Term::new(Quarter::Q2, 2025));
    }

    #[test]
    fn quarter_parses_case_insensitively() {
        assert_eq!("q3".parse::<Quarter>().unwrap(), Quarter::Q3);
        assert_eq!(" Q4 ".parse::<Quarter>().unwrap(), Quarter::Q4);
        assert!("Q5".parse::<Quarter>().is_err());
    }

    #[test]
    fn quarter_serializes_as_label() {
        let json = serde_json::to_string(&Quarter::Q1).unwrap();
        assert_eq!(json, "\"Q1\"");
        let back: Quarter = serde_json::from_str("\"Q2\"").unwrap();
        assert_eq!(back, Quarter::Q2);
    }

    #[test]
    fn term_display() {
        assert_eq!(Term::new(Quarter::Q1, 2024).to_string(), "Q1 2024");
    }
}
