//! Leave record model and related types.
//!
//! This module defines the [`LeaveRecord`] struct and [`LeaveType`] enum
//! for representing a single day of leave held by the persistence layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The kind of leave taken on a day.
///
/// Half-day variants only ever apply to a single calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    /// A full day of annual leave. Also the fallback for mixed spans.
    Annual,
    /// Morning-only leave.
    MorningHalf,
    /// Afternoon-only leave.
    AfternoonHalf,
    /// Special leave (bereavement, family events, ...).
    Special,
    /// Sick leave.
    Sick,
    /// Working day recorded on the calendar (e.g. remote or on-site duty).
    Work,
}

impl LeaveType {
    /// Every variant, in display order.
    pub const ALL: [LeaveType; 6] = [
        LeaveType::Annual,
        LeaveType::MorningHalf,
        LeaveType::AfternoonHalf,
        LeaveType::Special,
        LeaveType::Sick,
        LeaveType::Work,
    ];

    /// Returns true for the morning and afternoon half-day types.
    ///
    /// # Examples
    ///
    /// ```
    /// use leave_engine::models::LeaveType;
    ///
    /// assert!(LeaveType::MorningHalf.is_half_day());
    /// assert!(!LeaveType::Annual.is_half_day());
    /// ```
    pub fn is_half_day(self) -> bool {
        matches!(self, LeaveType::MorningHalf | LeaveType::AfternoonHalf)
    }
}

impl std::fmt::Display for LeaveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaveType::Annual => write!(f, "Annual"),
            LeaveType::MorningHalf => write!(f, "MorningHalf"),
            LeaveType::AfternoonHalf => write!(f, "AfternoonHalf"),
            LeaveType::Special => write!(f, "Special"),
            LeaveType::Sick => write!(f, "Sick"),
            LeaveType::Work => write!(f, "Work"),
        }
    }
}

/// One persisted day of leave for one employee.
///
/// Records are replaced whole on update; the engine treats them as values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRecord {
    /// Identifier assigned by the persistence layer.
    pub id: String,
    /// The employee this leave belongs to.
    pub employee_id: String,
    /// The calendar day of leave.
    pub date: NaiveDate,
    /// The kind of leave.
    #[serde(rename = "type")]
    pub leave_type: LeaveType,
    /// Free-form note attached to the record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
