//! Error types for the leave engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur outside of text parsing. Parsing
//! problems are reported as diagnostics, never as errors.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the leave engine.
///
/// # Example
///
/// ```
/// use leave_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/engine.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/engine.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A year/month pair does not name a calendar month.
    #[error("Invalid period: {year}-{month}")]
    InvalidPeriod {
        /// The requested year.
        year: i32,
        /// The requested month.
        month: u32,
    },

    /// A leave request was internally inconsistent.
    #[error("Invalid leave: {message}")]
    InvalidLeave {
        /// A description of what made the leave invalid.
        message: String,
    },

    /// No leave record exists with the given id.
    #[error("Leave record not found: {id}")]
    LeaveNotFound {
        /// The id that was not found.
        id: String,
    },

    /// No employee exists with the given id.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The id that was not found.
        id: String,
    },

    /// The employee already has leave on the given date.
    #[error("Employee '{employee_id}' already has leave on {date}")]
    LeaveConflict {
        /// The employee whose leave collides.
        employee_id: String,
        /// The contested date.
        date: NaiveDate,
        /// Ids of the records already occupying the date.
        conflicting_ids: Vec<String>,
    },

    /// Batch registration was attempted while the parse had errors.
    #[error("Registration blocked by {error_count} parse error(s)")]
    RegistrationBlocked {
        /// Number of error diagnostics in the parse outcome.
        error_count: usize,
    },

    /// The persistence collaborator failed.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
