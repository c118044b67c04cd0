//! Batch parse output models.
//!
//! These types are produced by the batch text classifier and consumed by
//! batch registration. None of them are persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::LeaveType;

/// One recognized date token attached to an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedLeaveEntry {
    /// The normalized calendar date. Always valid.
    pub date: NaiveDate,
    /// The leave type resolved from the token's half-day qualifier.
    #[serde(rename = "type")]
    pub leave_type: LeaveType,
    /// The token exactly as it appeared in the input, trimmed.
    pub original_text: String,
}

/// All entries parsed for one name line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedEmployeeBatch {
    /// The full trimmed text of the name line.
    pub employee_name: String,
    /// Entries in input order. Never empty.
    pub vacations: Vec<ParsedLeaveEntry>,
}

/// Severity of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Blocks registration.
    Error,
    /// Informational only.
    Warning,
}

/// A message tied to one input line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity.
    pub kind: DiagnosticKind,
    /// 1-based line number in the raw input, blank lines included.
    pub line_number: usize,
    /// Human-readable description.
    pub message: String,
}

impl Diagnostic {
    /// Creates an error diagnostic.
    pub fn error(line_number: usize, message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::Error,
            line_number,
            message: message.into(),
        }
    }

    /// Creates a warning diagnostic.
    pub fn warning(line_number: usize, message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::Warning,
            line_number,
            message: message.into(),
        }
    }
}

/// The result of one classifier run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOutcome {
    /// Batches in the order their name lines appeared.
    pub batches: Vec<ParsedEmployeeBatch>,
    /// Blocking diagnostics.
    pub errors: Vec<Diagnostic>,
    /// Non-blocking diagnostics.
    pub warnings: Vec<Diagnostic>,
}

impl ParseOutcome {
    /// Returns true when no error diagnostic blocks registration.
    pub fn can_register(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total number of parsed entries across all batches.
    pub fn entry_count(&self) -> usize {
        self.batches.iter().map(|b| b.vacations.len()).sum()
    }
}
