//! Visible period model.
//!
//! This module contains the [`Period`] type that bounds span aggregation and
//! layout, typically one calendar month of the schedule view.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// An inclusive range of calendar days.
///
/// # Example
///
/// ```
/// use leave_engine::models::Period;
/// use chrono::NaiveDate;
///
/// let july = Period::month(2025, 7).unwrap();
/// assert_eq!(july.start_date, NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
/// assert_eq!(july.end_date, NaiveDate::from_ymd_opt(2025, 7, 31).unwrap());
/// assert_eq!(july.day_count(), 31);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// The first day of the period (inclusive).
    pub start_date: NaiveDate,
    /// The last day of the period (inclusive).
    pub end_date: NaiveDate,
}

impl Period {
    /// Builds the period covering one calendar month.
    ///
    /// Returns `InvalidPeriod` when `month` is outside 1-12 or the year is
    /// out of chrono's range.
    pub fn month(year: i32, month: u32) -> EngineResult<Self> {
        let invalid = || EngineError::InvalidPeriod { year, month };

        let start_date = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let next_month_start = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(invalid)?;

        Ok(Self {
            start_date,
            end_date: next_month_start - Duration::days(1),
        })
    }

    /// Returns the calendar-month period containing `date`.
    pub fn month_of(date: NaiveDate) -> EngineResult<Self> {
        Self::month(date.year(), date.month())
    }

    /// Checks if a given date falls within this period (inclusive).
    ///
    /// # Example
    ///
    /// ```
    /// use leave_engine::models::Period;
    /// use chrono::NaiveDate;
    ///
    /// let july = Period::month(2025, 7).unwrap();
    /// assert!(july.contains_date(NaiveDate::from_ymd_opt(2025, 7, 31).unwrap()));
    /// assert!(!july.contains_date(NaiveDate::from_ymd_opt(2025, 8, 1).unwrap()));
    /// ```
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Number of days in the period, counting both ends.
    pub fn day_count(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}
