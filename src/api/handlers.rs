//! HTTP request handlers for the leave engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::collections::HashMap;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{ConsecutiveSpan, ParseOutcome, Period};
use crate::parsing::BatchClassifier;
use crate::registration::{
    create_leave, delete_leave, register_outcome, update_leave, LeaveUpdate, NewLeave,
};
use crate::schedule::{aggregate_all, SpanPlacement};
use crate::store::LeaveStore;

use super::request::{ParseRequest, SpansQuery};
use super::response::{ApiError, ApiErrorResponse, EmployeeSpans, PlacedSpan, RegisterResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/parse", post(parse_handler))
        .route("/register", post(register_handler))
        .route("/spans", get(spans_handler))
        .route("/leaves", get(list_leaves_handler).post(create_leave_handler))
        .route(
            "/leaves/:id",
            put(update_leave_handler).delete(delete_leave_handler),
        )
        .with_state(state)
}

/// Handler for POST /parse.
///
/// Classifies the text against the current employee list without writing
/// anything.
async fn parse_handler(
    State(state): State<AppState>,
    payload: Result<Json<ParseRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing parse request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match classify(&state, &request).await {
        Ok(outcome) => {
            info!(
                correlation_id = %correlation_id,
                batches = outcome.batches.len(),
                errors = outcome.errors.len(),
                warnings = outcome.warnings.len(),
                "Parse completed"
            );
            json_response(StatusCode::OK, outcome)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /register.
///
/// Parses the text and, when it has no errors, writes every entry with
/// overwrite semantics.
async fn register_handler(
    State(state): State<AppState>,
    payload: Result<Json<ParseRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing register request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let outcome = match classify(&state, &request).await {
        Ok(outcome) => outcome,
        Err(err) => return error_response(correlation_id, err),
    };

    match register_outcome(state.store(), &outcome).await {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                created = report.created,
                overwritten = report.overwritten,
                failed = report.failed,
                "Registration completed"
            );
            json_response(
                StatusCode::OK,
                RegisterResponse {
                    report,
                    warnings: outcome.warnings,
                },
            )
        }
        Err(EngineError::RegistrationBlocked { error_count }) => {
            warn!(correlation_id = %correlation_id, error_count, "Registration blocked");
            json_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::parse_errors(&outcome.errors),
            )
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /spans?year=&month=.
async fn spans_handler(State(state): State<AppState>, Query(query): Query<SpansQuery>) -> Response {
    let correlation_id = Uuid::new_v4();

    match month_spans(&state, query).await {
        Ok(spans) => {
            info!(
                correlation_id = %correlation_id,
                year = query.year,
                month = query.month,
                employees = spans.len(),
                "Spans computed"
            );
            json_response(StatusCode::OK, spans)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /leaves.
async fn list_leaves_handler(State(state): State<AppState>) -> Response {
    match state.store().list_leaves().await {
        Ok(leaves) => json_response(StatusCode::OK, leaves),
        Err(err) => error_response(Uuid::new_v4(), err),
    }
}

/// Handler for POST /leaves.
async fn create_leave_handler(
    State(state): State<AppState>,
    payload: Result<Json<NewLeave>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match create_leave(state.store(), request).await {
        Ok(created) => json_response(StatusCode::CREATED, created),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for PUT /leaves/:id.
async fn update_leave_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<LeaveUpdate>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let update = match payload {
        Ok(Json(update)) => update,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match update_leave(state.store(), &id, update).await {
        Ok(record) => json_response(StatusCode::OK, record),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for DELETE /leaves/:id.
async fn delete_leave_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match delete_leave(state.store(), &id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(Uuid::new_v4(), err),
    }
}

/// Runs the classifier with the request's reference month and the store's
/// employee names.
async fn classify(state: &AppState, request: &ParseRequest) -> EngineResult<ParseOutcome> {
    let classifier = BatchClassifier::new(state.normalizer().clone());
    let (year, month) = classifier.reference();
    let year = request.reference_year.unwrap_or(year);
    let month = request.reference_month.unwrap_or(month);
    if !(1..=12).contains(&month) {
        return Err(EngineError::InvalidPeriod { year, month });
    }

    let known: Vec<String> = state
        .store()
        .list_employees()
        .await?
        .into_iter()
        .map(|e| e.name)
        .collect();

    Ok(classifier
        .with_reference(year, month)
        .parse(&request.text, &known))
}

async fn month_spans(state: &AppState, query: SpansQuery) -> EngineResult<Vec<EmployeeSpans>> {
    let period = Period::month(query.year, query.month)?;
    let records = state.store().list_leaves().await?;
    let names: HashMap<String, String> = state
        .store()
        .list_employees()
        .await?
        .into_iter()
        .map(|e| (e.id, e.name))
        .collect();

    let spans = aggregate_all(&records, &period)
        .into_iter()
        .map(|(employee_id, spans)| EmployeeSpans {
            employee_name: names.get(&employee_id).cloned(),
            spans: spans
                .into_iter()
                .filter_map(|span| place(state, span, &period))
                .collect(),
            employee_id,
        })
        .collect();
    Ok(spans)
}

fn place(state: &AppState, span: ConsecutiveSpan, period: &Period) -> Option<PlacedSpan> {
    let placement = SpanPlacement::for_span(&span, period)?;
    let (label, color) = match state.config().leave_type_style(span.leave_type) {
        Some(style) => (style.label.clone(), style.color.clone()),
        None => (span.leave_type.to_string(), String::new()),
    };
    Some(PlacedSpan {
        span,
        placement,
        label,
        color,
    })
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}
