//! Persistence boundary for employees and leave records.
//!
//! The engine never owns storage. Batch registration and the single-entry
//! paths talk to a [`LeaveStore`]; [`MemoryStore`] is the in-process
//! implementation served by the HTTP API.

mod memory;

use std::future::Future;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{Employee, LeaveRecord, LeaveType};

pub use memory::MemoryStore;

/// A leave record that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveDraft {
    /// The employee the leave belongs to.
    pub employee_id: String,
    /// The calendar day of leave.
    pub date: NaiveDate,
    /// The kind of leave.
    #[serde(rename = "type")]
    pub leave_type: LeaveType,
    /// Free-form note.
    #[serde(default)]
    pub description: Option<String>,
}

/// Async access to employees and leave records.
///
/// Every call is awaited before the next one is issued by the engine, so
/// implementations need no ordering guarantees across calls.
pub trait LeaveStore: Send + Sync {
    /// Lists all employees.
    fn list_employees(&self) -> impl Future<Output = EngineResult<Vec<Employee>>> + Send;

    /// Finds an employee by exact display name.
    fn find_employee_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = EngineResult<Option<Employee>>> + Send;

    /// Looks up an employee by id.
    fn get_employee(&self, id: &str) -> impl Future<Output = EngineResult<Option<Employee>>> + Send;

    /// Creates an employee with a fresh id.
    fn create_employee(&self, name: &str) -> impl Future<Output = EngineResult<Employee>> + Send;

    /// Lists all leave records ordered by date.
    fn list_leaves(&self) -> impl Future<Output = EngineResult<Vec<LeaveRecord>>> + Send;

    /// Looks up a leave record by id.
    fn get_leave(&self, id: &str) -> impl Future<Output = EngineResult<Option<LeaveRecord>>> + Send;

    /// Finds every record held by `employee_id` on `date`.
    ///
    /// Usually at most one, but an edit inside a multi-day span may leave two
    /// records on the same day.
    fn find_leaves_on(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> impl Future<Output = EngineResult<Vec<LeaveRecord>>> + Send;

    /// Persists a draft under a fresh id.
    fn create_leave(
        &self,
        draft: LeaveDraft,
    ) -> impl Future<Output = EngineResult<LeaveRecord>> + Send;

    /// Replaces the record with the same id. Fails with `LeaveNotFound`.
    fn update_leave(
        &self,
        record: LeaveRecord,
    ) -> impl Future<Output = EngineResult<LeaveRecord>> + Send;

    /// Deletes a record by id. Fails with `LeaveNotFound`.
    fn delete_leave(&self, id: &str) -> impl Future<Output = EngineResult<()>> + Send;
}
