//! Consecutive span model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::LeaveType;

/// A maximal run of calendar-consecutive leave days for one employee.
///
/// Spans are recomputed from the record set on every aggregation and carry
/// no identity of their own beyond `source_record_ids`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsecutiveSpan {
    /// The employee owning every record in the span.
    pub employee_id: String,
    /// First day (inclusive).
    pub start_date: NaiveDate,
    /// Last day (inclusive). Never before `start_date`.
    pub end_date: NaiveDate,
    /// Shared type of the records, or `Annual` when they differ.
    #[serde(rename = "type")]
    pub leave_type: LeaveType,
    /// First non-empty description among the records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ids of the composing records in date order, one per day.
    pub source_record_ids: Vec<String>,
}

impl ConsecutiveSpan {
    /// Number of days covered, counting both ends.
    ///
    /// # Example
    ///
    /// ```
    /// use leave_engine::models::{ConsecutiveSpan, LeaveType};
    /// use chrono::NaiveDate;
    ///
    /// let span = ConsecutiveSpan {
    ///     employee_id: "emp_001".to_string(),
    ///     start_date: NaiveDate::from_ymd_opt(2025, 7, 15).unwrap(),
    ///     end_date: NaiveDate::from_ymd_opt(2025, 7, 17).unwrap(),
    ///     leave_type: LeaveType::Annual,
    ///     description: None,
    ///     source_record_ids: vec!["4".into(), "5".into(), "6".into()],
    /// };
    /// assert_eq!(span.day_count(), 3);
    /// assert!(span.is_multi_day());
    /// ```
    pub fn day_count(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Returns true when the span covers more than one day.
    pub fn is_multi_day(&self) -> bool {
        self.end_date > self.start_date
    }

    /// Returns true when `record_id` is one of the composing records.
    pub fn contains_record(&self, record_id: &str) -> bool {
        self.source_record_ids.iter().any(|id| id == record_id)
    }
}
