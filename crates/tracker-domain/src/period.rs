//! Month keys and report scopes.

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Identifies a calendar month independent of the day.
///
/// Ordering is chronological, so a sorted list of keys runs oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// The month enclosing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthKeyParseError(String);

impl fmt::Display for MonthKeyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` is not a month in YYYY-MM form", self.0)
    }
}

impl std::error::Error for MonthKeyParseError {}

impl FromStr for MonthKey {
    type Err = MonthKeyParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || MonthKeyParseError(value.to_string());
        let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        MonthKey::new(year, month).ok_or_else(invalid)
    }
}

/// The slice of the ledger a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportScope {
    Day(NaiveDate),
    Month(MonthKey),
}

impl ReportScope {
    pub fn includes(&self, date: NaiveDate) -> bool {
        match self {
            ReportScope::Day(day) => *day == date,
            ReportScope::Month(key) => key.contains(date),
        }
    }

    pub fn is_daily(&self) -> bool {
        matches!(self, ReportScope::Day(_))
    }
}

impl fmt::Display for ReportScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportScope::Day(day) => write!(f, "{}", day.format("%Y-%m-%d")),
            ReportScope::Month(key) => write!(f, "{key}"),
        }
    }
}
