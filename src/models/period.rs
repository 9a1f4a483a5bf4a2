//! Payroll period model.
//!
//! This module contains the [`PeriodKey`] type identifying one calendar month
//! of payroll. The canonical textual form is "January 2024"; historical data
//! may carry a legacy numeric form ("2024-01") which parses to the same key.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// English month names indexed by `month - 1`.
const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Identifies one payroll month.
///
/// A `PeriodKey` is the canonical identity of a salary period. Its `Display`
/// form ("January 2024") is the canonical string stored on salary records;
/// parsing accepts both that form and the legacy numeric form "2024-01" so
/// that heterogeneous historical data normalizes to a single key.
///
/// Keys order by calendar date.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PeriodKey;
///
/// let canonical: PeriodKey = "January 2024".parse().unwrap();
/// let legacy: PeriodKey = "2024-01".parse().unwrap();
/// assert_eq!(canonical, legacy);
/// assert_eq!(canonical.to_string(), "January 2024");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct PeriodKey {
    year: i32,
    month: u32,
}

impl PeriodKey {
    /// Creates a period key from a year and a 1-based month.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPeriod`] if `month` is outside `1..=12`.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidPeriod {
                value: format!("{year}-{month:02}"),
                message: "month must be between 1 and 12".to_string(),
            });
        }
        Ok(Self { year, month })
    }

    /// Derives the period key covering the given date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns the calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the 1-based month.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Returns the English month name ("January").
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    /// Parses a raw period string in either supported form and returns the
    /// canonical string.
    ///
    /// This is the normalization primitive used by the reconciliation engine:
    /// "2024-01" and "January 2024" both map to "January 2024".
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPeriod`] if the value matches neither
    /// form.
    pub fn normalize(raw: &str) -> EngineResult<String> {
        raw.parse::<Self>().map(|key| key.to_string())
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}

impl FromStr for PeriodKey {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        // Legacy numeric form: "2024-01".
        if let Some((year, month)) = trimmed.split_once('-') {
            let year: i32 = year.parse().map_err(|_| EngineError::InvalidPeriod {
                value: s.to_string(),
                message: "year is not a number".to_string(),
            })?;
            let month: u32 = month.parse().map_err(|_| EngineError::InvalidPeriod {
                value: s.to_string(),
                message: "month is not a number".to_string(),
            })?;
            return Self::new(year, month).map_err(|_| EngineError::InvalidPeriod {
                value: s.to_string(),
                message: "month must be between 1 and 12".to_string(),
            });
        }

        // Canonical form: "January 2024".
        if let Some((name, year)) = trimmed.split_once(' ') {
            let month = MONTH_NAMES
                .iter()
                .position(|m| m.eq_ignore_ascii_case(name))
                .ok_or_else(|| EngineError::InvalidPeriod {
                    value: s.to_string(),
                    message: "unknown month name".to_string(),
                })?;
            let year: i32 = year.trim().parse().map_err(|_| EngineError::InvalidPeriod {
                value: s.to_string(),
                message: "year is not a number".to_string(),
            })?;
            return Ok(Self {
                year,
                month: (month + 1) as u32,
            });
        }

        Err(EngineError::InvalidPeriod {
            value: s.to_string(),
            message: "expected 'Month YYYY' or 'YYYY-MM'".to_string(),
        })
    }
}

impl From<PeriodKey> for String {
    fn from(key: PeriodKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for PeriodKey {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
