//! Response types for the leave engine API.
//!
//! This module defines the response bodies and the mapping from
//! [`EngineError`] to HTTP error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{ConsecutiveSpan, Diagnostic};
use crate::registration::RegistrationReport;
use crate::schedule::SpanPlacement;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates the error returned when registration meets parse errors.
    pub fn parse_errors(errors: &[Diagnostic]) -> Self {
        let details = errors
            .iter()
            .map(|d| format!("line {}: {}", d.line_number, d.message))
            .collect::<Vec<_>>()
            .join("; ");
        Self::with_details(
            "PARSE_ERRORS",
            format!("Registration blocked by {} parse error(s)", errors.len()),
            details,
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                }
            }
            EngineError::InvalidPeriod { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_PERIOD", message),
            },
            EngineError::InvalidLeave { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_LEAVE", message),
            },
            EngineError::LeaveNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("LEAVE_NOT_FOUND", message),
            },
            EngineError::EmployeeNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("EMPLOYEE_NOT_FOUND", message),
            },
            EngineError::LeaveConflict {
                conflicting_ids, ..
            } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "LEAVE_CONFLICT",
                    message,
                    format!("Conflicting records: {}", conflicting_ids.join(", ")),
                ),
            },
            EngineError::RegistrationBlocked { .. } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::new("PARSE_ERRORS", message),
            },
            EngineError::Storage { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("STORAGE_ERROR", "Storage failure", message),
            },
        }
    }
}

/// Body of a successful `POST /register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Registration counts.
    #[serde(flatten)]
    pub report: RegistrationReport,
    /// Warnings from the parse that fed the registration.
    pub warnings: Vec<Diagnostic>,
}

/// A span with its row placement and palette entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedSpan {
    /// The span itself.
    #[serde(flatten)]
    pub span: ConsecutiveSpan,
    /// Position within the month row.
    pub placement: SpanPlacement,
    /// Display label of the span's type.
    pub label: String,
    /// Display color of the span's type.
    pub color: String,
}

/// All spans for one employee in the requested month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeSpans {
    /// The employee id.
    pub employee_id: String,
    /// The employee name, when the employee is known to the store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,
    /// Spans in date order.
    pub spans: Vec<PlacedSpan>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_parse_errors_lists_lines() {
        let error = ApiError::parse_errors(&[
            Diagnostic::error(1, "first"),
            Diagnostic::error(3, "second"),
        ]);
        assert_eq!(error.code, "PARSE_ERRORS");
        assert_eq!(error.details.as_deref(), Some("line 1: first; line 3: second"));
    }

    #[test]
    fn test_conflict_maps_to_409() {
        let api_error: ApiErrorResponse = EngineError::LeaveConflict {
            employee_id: "emp".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 7, 15).unwrap(),
            conflicting_ids: vec!["4".to_string(), "7".to_string()],
        }
        .into();
        assert_eq!(api_error.status, StatusCode::CONFLICT);
        assert_eq!(api_error.error.code, "LEAVE_CONFLICT");
        assert_eq!(
            api_error.error.details.as_deref(),
            Some("Conflicting records: 4, 7")
        );
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let api_error: ApiErrorResponse = EngineError::LeaveNotFound {
            id: "x".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert_eq!(api_error.error.code, "LEAVE_NOT_FOUND");
    }

    #[test]
    fn test_registration_blocked_maps_to_422() {
        let api_error: ApiErrorResponse =
            EngineError::RegistrationBlocked { error_count: 1 }.into();
        assert_eq!(api_error.status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
