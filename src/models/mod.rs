//! Core data models for the leave engine.
//!
//! This module contains all the domain models used throughout the engine.

mod batch;
mod employee;
mod leave;
mod period;
mod span;

pub use batch::{Diagnostic, DiagnosticKind, ParseOutcome, ParsedEmployeeBatch, ParsedLeaveEntry};
pub use employee::Employee;
pub use leave::{LeaveRecord, LeaveType};
pub use period::Period;
pub use span::ConsecutiveSpan;
