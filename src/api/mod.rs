//! HTTP API module for the leave engine.
//!
//! This module provides the REST endpoints for parsing and registering
//! pasted leave text, editing single records, and reading the month's
//! consecutive spans.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ParseRequest, SpansQuery};
pub use response::{ApiError, ApiErrorResponse, EmployeeSpans, PlacedSpan, RegisterResponse};
pub use state::AppState;
