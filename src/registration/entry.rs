//! Single-entry create, update and delete.
//!
//! Unlike batch registration, these paths never overwrite: a collision with
//! an existing record is reported as [`EngineError::LeaveConflict`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{ConsecutiveSpan, LeaveRecord, LeaveType, Period};
use crate::schedule::{LeaveCandidate, aggregate, find_conflicts, find_span_for_record};
use crate::store::{LeaveDraft, LeaveStore};

/// Longest range a single create request may expand to, in days.
pub const MAX_RANGE_DAYS: i64 = 366;

/// A request to create leave on one day or an inclusive range of days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLeave {
    /// The employee taking leave.
    pub employee_id: String,
    /// First (or only) day.
    pub date: NaiveDate,
    /// Last day of a range, inclusive.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// The kind of leave.
    #[serde(rename = "type")]
    pub leave_type: LeaveType,
    /// Free-form note copied onto every created record.
    #[serde(default)]
    pub description: Option<String>,
}

impl NewLeave {
    /// Expands the request into one date per day.
    pub fn dates(&self) -> EngineResult<Vec<NaiveDate>> {
        let end = self.end_date.unwrap_or(self.date);
        if end < self.date {
            return Err(EngineError::InvalidLeave {
                message: format!("end date {} is before start date {}", end, self.date),
            });
        }

        let days = (end - self.date).num_days() + 1;
        if days > 1 && self.leave_type.is_half_day() {
            return Err(EngineError::InvalidLeave {
                message: format!("{} leave covers a single day only", self.leave_type),
            });
        }
        if days > MAX_RANGE_DAYS {
            return Err(EngineError::InvalidLeave {
                message: format!("range of {} days exceeds {} days", days, MAX_RANGE_DAYS),
            });
        }

        Ok(self.date.iter_days().take(days as usize).collect())
    }
}

/// Replacement values for an existing record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveUpdate {
    /// New date.
    pub date: NaiveDate,
    /// New type.
    #[serde(rename = "type")]
    pub leave_type: LeaveType,
    /// New note.
    #[serde(default)]
    pub description: Option<String>,
}

/// Creates leave after checking every day for conflicts.
///
/// Nothing is written if any day collides.
pub async fn create_leave<S: LeaveStore>(
    store: &S,
    request: NewLeave,
) -> EngineResult<Vec<LeaveRecord>> {
    if store.get_employee(&request.employee_id).await?.is_none() {
        return Err(EngineError::EmployeeNotFound {
            id: request.employee_id,
        });
    }

    let dates = request.dates()?;
    let existing = store.list_leaves().await?;
    for &date in &dates {
        let candidate = LeaveCandidate {
            id: None,
            employee_id: request.employee_id.clone(),
            date,
        };
        ensure_free(&candidate, &existing, None)?;
    }

    let mut created = Vec::with_capacity(dates.len());
    for date in dates {
        let record = store
            .create_leave(LeaveDraft {
                employee_id: request.employee_id.clone(),
                date,
                leave_type: request.leave_type,
                description: request.description.clone(),
            })
            .await?;
        created.push(record);
    }

    info!(employee_id = %request.employee_id, days = created.len(), "created leave");
    Ok(created)
}

/// Replaces record `id` with the updated values.
///
/// The record's own consecutive span, computed over the calendar month it
/// currently sits in, is passed to the conflict check so that shifting a day
/// within that span is allowed.
pub async fn update_leave<S: LeaveStore>(
    store: &S,
    id: &str,
    update: LeaveUpdate,
) -> EngineResult<LeaveRecord> {
    let current = store
        .get_leave(id)
        .await?
        .ok_or_else(|| EngineError::LeaveNotFound { id: id.to_string() })?;

    let existing = store.list_leaves().await?;
    let period = Period::month_of(current.date)?;
    let spans = aggregate(&existing, &current.employee_id, &period);
    let editing_span = find_span_for_record(&spans, id);

    let candidate = LeaveCandidate {
        id: Some(id.to_string()),
        employee_id: current.employee_id.clone(),
        date: update.date,
    };
    ensure_free(&candidate, &existing, editing_span)?;

    let replacement = LeaveRecord {
        id: current.id,
        employee_id: current.employee_id,
        date: update.date,
        leave_type: update.leave_type,
        description: update.description,
    };
    let updated = store.update_leave(replacement).await?;
    info!(id = %updated.id, date = %updated.date, "updated leave");
    Ok(updated)
}

/// Deletes record `id`.
pub async fn delete_leave<S: LeaveStore>(store: &S, id: &str) -> EngineResult<()> {
    store.delete_leave(id).await?;
    info!(id, "deleted leave");
    Ok(())
}

fn ensure_free(
    candidate: &LeaveCandidate,
    existing: &[LeaveRecord],
    editing_span: Option<&ConsecutiveSpan>,
) -> EngineResult<()> {
    let conflicts = find_conflicts(candidate, existing, editing_span);
    if conflicts.is_empty() {
        return Ok(());
    }
    Err(EngineError::LeaveConflict {
        employee_id: candidate.employee_id.clone(),
        date: candidate.date,
        conflicting_ids: conflicts.into_iter().map(|r| r.id.clone()).collect(),
    })
}
