//! Batch registration of parsed leave.
//!
//! Batches are written one entry at a time, each write awaited before the
//! next is issued, so overwrite counts are deterministic. A failing entry is
//! recorded and skipped; the rest of the run continues.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{ParseOutcome, ParsedEmployeeBatch, ParsedLeaveEntry};
use crate::store::{LeaveDraft, LeaveStore};

/// One entry that could not be registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFailure {
    /// Name line of the batch the entry came from.
    pub employee_name: String,
    /// The entry's date.
    pub date: NaiveDate,
    /// Why the write failed.
    pub message: String,
}

/// Per-run registration counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationReport {
    /// Employees created because no exact name match existed.
    pub employees_created: usize,
    /// Leave records written.
    pub created: usize,
    /// Existing records deleted to make room for a new one.
    pub overwritten: usize,
    /// Entries that failed.
    pub failed: usize,
    /// Details for each failed entry.
    pub failures: Vec<EntryFailure>,
}

impl RegistrationReport {
    fn record_failure(&mut self, employee_name: &str, date: NaiveDate, error: &EngineError) {
        self.failed += 1;
        self.failures.push(EntryFailure {
            employee_name: employee_name.to_string(),
            date,
            message: error.to_string(),
        });
    }
}

/// Registers a parse outcome, refusing when it carries errors.
pub async fn register_outcome<S: LeaveStore>(
    store: &S,
    outcome: &ParseOutcome,
) -> EngineResult<RegistrationReport> {
    if !outcome.can_register() {
        return Err(EngineError::RegistrationBlocked {
            error_count: outcome.errors.len(),
        });
    }
    Ok(register_batches(store, &outcome.batches).await)
}

/// Writes every batch entry, replacing any record already on that day.
///
/// # Example
///
/// ```
/// use leave_engine::parsing::{BatchClassifier, DateNormalizer};
/// use leave_engine::registration::register_batches;
/// use leave_engine::store::MemoryStore;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let classifier = BatchClassifier::new(DateNormalizer::default()).with_reference(2025, 7);
/// let outcome = classifier.parse("김철수\n0715, 0716", &[]);
/// let store = MemoryStore::default();
///
/// let report = register_batches(&store, &outcome.batches).await;
/// assert_eq!(report.employees_created, 1);
/// assert_eq!(report.created, 2);
/// assert_eq!(report.overwritten, 0);
/// # });
/// ```
pub async fn register_batches<S: LeaveStore>(
    store: &S,
    batches: &[ParsedEmployeeBatch],
) -> RegistrationReport {
    let mut report = RegistrationReport::default();

    for batch in batches {
        let employee_id = match resolve_employee(store, &batch.employee_name, &mut report).await {
            Ok(id) => id,
            Err(err) => {
                warn!(employee = %batch.employee_name, error = %err, "could not resolve employee");
                for entry in &batch.vacations {
                    report.record_failure(&batch.employee_name, entry.date, &err);
                }
                continue;
            }
        };

        for entry in &batch.vacations {
            match register_entry(store, &employee_id, entry).await {
                Ok(overwrote) => {
                    report.created += 1;
                    if overwrote {
                        report.overwritten += 1;
                    }
                }
                Err(err) => {
                    warn!(
                        employee = %batch.employee_name,
                        date = %entry.date,
                        error = %err,
                        "leave entry registration failed"
                    );
                    report.record_failure(&batch.employee_name, entry.date, &err);
                }
            }
        }
    }

    info!(
        employees_created = report.employees_created,
        created = report.created,
        overwritten = report.overwritten,
        failed = report.failed,
        "batch registration finished"
    );
    report
}

async fn resolve_employee<S: LeaveStore>(
    store: &S,
    name: &str,
    report: &mut RegistrationReport,
) -> EngineResult<String> {
    if let Some(employee) = store.find_employee_by_name(name).await? {
        return Ok(employee.id);
    }
    let employee = store.create_employee(name).await?;
    report.employees_created += 1;
    Ok(employee.id)
}

/// Returns whether existing leave on that day was replaced.
///
/// Every record on the day is removed, so the day ends up holding only the
/// new entry. Replacing several records still counts as one overwrite.
async fn register_entry<S: LeaveStore>(
    store: &S,
    employee_id: &str,
    entry: &ParsedLeaveEntry,
) -> EngineResult<bool> {
    let existing = store.find_leaves_on(employee_id, entry.date).await?;
    for record in &existing {
        store.delete_leave(&record.id).await?;
    }
    let overwrote = !existing.is_empty();

    store
        .create_leave(LeaveDraft {
            employee_id: employee_id.to_string(),
            date: entry.date,
            leave_type: entry.leave_type,
            description: None,
        })
        .await?;
    Ok(overwrote)
}
