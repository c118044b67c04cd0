//! Employee model.

use serde::{Deserialize, Serialize};

/// An employee as known to the persistence layer.
///
/// Batch registration resolves employees by exact `name` match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name, matched verbatim against parsed name lines.
    pub name: String,
}
