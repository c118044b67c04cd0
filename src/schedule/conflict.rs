//! Conflict detection for single leave entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{ConsecutiveSpan, LeaveRecord};

/// A leave entry about to be created or moved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveCandidate {
    /// Id of the record being edited; `None` for a new record.
    pub id: Option<String>,
    /// The employee the entry belongs to.
    pub employee_id: String,
    /// The target date.
    pub date: NaiveDate,
}

/// Returns the existing records that block `candidate`.
///
/// A record never conflicts with itself. When `editing_span` covers more
/// than one day, records belonging to that span are ignored as well: moving
/// a day inside its own run briefly puts two of the run's records on one
/// date.
pub fn find_conflicts<'a>(
    candidate: &LeaveCandidate,
    existing: &'a [LeaveRecord],
    editing_span: Option<&ConsecutiveSpan>,
) -> Vec<&'a LeaveRecord> {
    let own_span = editing_span.filter(|span| span.is_multi_day());

    existing
        .iter()
        .filter(|r| r.employee_id == candidate.employee_id && r.date == candidate.date)
        .filter(|r| candidate.id.as_deref() != Some(r.id.as_str()))
        .filter(|r| !own_span.is_some_and(|span| span.contains_record(&r.id)))
        .collect()
}

/// Returns true when any existing record blocks `candidate`.
///
/// # Example
///
/// ```
/// use leave_engine::models::{LeaveRecord, LeaveType};
/// use leave_engine::schedule::{LeaveCandidate, has_conflict};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2025, 7, 15).unwrap();
/// let existing = vec![LeaveRecord {
///     id: "4".to_string(),
///     employee_id: "emp_001".to_string(),
///     date,
///     leave_type: LeaveType::Annual,
///     description: None,
/// }];
/// let candidate = LeaveCandidate { id: None, employee_id: "emp_001".to_string(), date };
///
/// assert!(has_conflict(&candidate, &existing, None));
/// ```
pub fn has_conflict(
    candidate: &LeaveCandidate,
    existing: &[LeaveRecord],
    editing_span: Option<&ConsecutiveSpan>,
) -> bool {
    !find_conflicts(candidate, existing, editing_span).is_empty()
}
