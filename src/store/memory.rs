//! In-memory [`LeaveStore`].

use std::collections::HashMap;

use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, LeaveRecord};

use super::{LeaveDraft, LeaveStore};

#[derive(Debug, Default)]
struct Tables {
    employees: HashMap<String, Employee>,
    leaves: HashMap<String, LeaveRecord>,
}

/// A [`LeaveStore`] holding everything in process memory.
///
/// Ids are random v4 UUIDs. Records seeded through [`MemoryStore::with_data`]
/// keep their given ids.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates a store pre-populated with employees and leave records.
    pub fn with_data(employees: Vec<Employee>, leaves: Vec<LeaveRecord>) -> Self {
        let tables = Tables {
            employees: employees.into_iter().map(|e| (e.id.clone(), e)).collect(),
            leaves: leaves.into_iter().map(|l| (l.id.clone(), l)).collect(),
        };
        Self {
            tables: RwLock::new(tables),
        }
    }

    fn new_id() -> String {
        Uuid::new_v4().to_string()
    }
}

impl LeaveStore for MemoryStore {
    async fn list_employees(&self) -> EngineResult<Vec<Employee>> {
        let tables = self.tables.read().await;
        let mut employees: Vec<Employee> = tables.employees.values().cloned().collect();
        employees.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(employees)
    }

    async fn find_employee_by_name(&self, name: &str) -> EngineResult<Option<Employee>> {
        let tables = self.tables.read().await;
        Ok(tables.employees.values().find(|e| e.name == name).cloned())
    }

    async fn get_employee(&self, id: &str) -> EngineResult<Option<Employee>> {
        Ok(self.tables.read().await.employees.get(id).cloned())
    }

    async fn create_employee(&self, name: &str) -> EngineResult<Employee> {
        let employee = Employee {
            id: Self::new_id(),
            name: name.to_string(),
        };
        self.tables
            .write()
            .await
            .employees
            .insert(employee.id.clone(), employee.clone());
        Ok(employee)
    }

    async fn list_leaves(&self) -> EngineResult<Vec<LeaveRecord>> {
        let tables = self.tables.read().await;
        let mut leaves: Vec<LeaveRecord> = tables.leaves.values().cloned().collect();
        leaves.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.employee_id.cmp(&b.employee_id))
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(leaves)
    }

    async fn get_leave(&self, id: &str) -> EngineResult<Option<LeaveRecord>> {
        Ok(self.tables.read().await.leaves.get(id).cloned())
    }

    async fn find_leaves_on(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> EngineResult<Vec<LeaveRecord>> {
        let tables = self.tables.read().await;
        let mut found: Vec<LeaveRecord> = tables
            .leaves
            .values()
            .filter(|l| l.employee_id == employee_id && l.date == date)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(found)
    }

    async fn create_leave(&self, draft: LeaveDraft) -> EngineResult<LeaveRecord> {
        let record = LeaveRecord {
            id: Self::new_id(),
            employee_id: draft.employee_id,
            date: draft.date,
            leave_type: draft.leave_type,
            description: draft.description,
        };
        self.tables
            .write()
            .await
            .leaves
            .insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn update_leave(&self, record: LeaveRecord) -> EngineResult<LeaveRecord> {
        let mut tables = self.tables.write().await;
        match tables.leaves.get_mut(&record.id) {
            Some(slot) => {
                *slot = record.clone();
                Ok(record)
            }
            None => Err(EngineError::LeaveNotFound { id: record.id }),
        }
    }

    async fn delete_leave(&self, id: &str) -> EngineResult<()> {
        self.tables
            .write()
            .await
            .leaves
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| EngineError::LeaveNotFound { id: id.to_string() })
    }
}
