//! Calendar date value object.
//!
//! Subscription windows, freeze windows and "today" are whole days; there is
//! no time-of-day or timezone arithmetic in the lifecycle rules.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// A day on the calendar, serialized as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Wraps a chrono date.
    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Creates a date from year/month/day, rejecting impossible dates.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, ValidationError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "date",
                    format!("{:04}-{:02}-{:02} is not a calendar date", year, month, day),
                )
            })
    }

    /// Latest representable date.
    pub const MAX: Self = Self(NaiveDate::MAX);

    /// Earliest representable date.
    pub const MIN: Self = Self(NaiveDate::MIN);

    /// Returns the date `days` later (earlier if negative), or None past the
    /// representable range.
    pub fn checked_plus_days(&self, days: i64) -> Option<Self> {
        let span = Days::new(days.unsigned_abs());
        let shifted = if days >= 0 {
            self.0.checked_add_days(span)
        } else {
            self.0.checked_sub_days(span)
        };
        shifted.map(Self)
    }

    /// Returns the date `days` later (earlier if negative), saturating at
    /// [`CalendarDate::MAX`] / [`CalendarDate::MIN`].
    pub fn plus_days(&self, days: i64) -> Self {
        self.checked_plus_days(days)
            .unwrap_or(if days >= 0 { Self::MAX } else { Self::MIN })
    }

    /// Returns the date `days` earlier, saturating like [`CalendarDate::plus_days`].
    pub fn minus_days(&self, days: i64) -> Self {
        self.plus_days(days.saturating_neg())
    }

    /// Whole days from `other` to `self`; negative when `other` is later.
    pub fn days_since(&self, other: &CalendarDate) -> i64 {
        self.0.signed_duration_since(other.0).num_days()
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for CalendarDate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|e| ValidationError::invalid_format("date", e.to_string()))
    }
}
