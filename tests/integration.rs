//! Integration tests for the leave engine HTTP API.
//!
//! This test suite covers the end-to-end flows:
//! - Parsing pasted text into batches with diagnostics
//! - Registering batches, including re-registration overwrites
//! - Monthly span aggregation and placement
//! - Single-entry create, edit and delete with conflict detection
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use leave_engine::api::{AppState, create_router};
use leave_engine::config::ConfigLoader;
use leave_engine::store::MemoryStore;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    AppState::new(config, MemoryStore::default())
}

async fn send(
    state: &AppState,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let router: Router = create_router(state.clone());
    let response = router.oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

fn text_request(text: &str) -> Value {
    json!({
        "text": text,
        "reference_year": 2025,
        "reference_month": 7
    })
}

async fn register(state: &AppState, text: &str) -> (StatusCode, Value) {
    send(state, "POST", "/register", Some(text_request(text))).await
}

fn employee_spans<'a>(spans: &'a Value, name: &str) -> &'a Value {
    spans
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["employee_name"] == name)
        .unwrap_or_else(|| panic!("No spans for employee '{}'", name))
}

async fn employee_id(state: &AppState, name: &str) -> String {
    let (_, spans) = send(state, "GET", "/spans?year=2025&month=7", None).await;
    employee_spans(&spans, name)["employee_id"]
        .as_str()
        .unwrap()
        .to_string()
}

const TWO_EMPLOYEES: &str = "김철수\n0715\n0716(오전)\n\n박영희\n0720";

// =============================================================================
// SECTION 1: Parsing
// =============================================================================

#[tokio::test]
async fn test_parse_two_employee_batch() {
    let state = create_test_state();

    let (status, result) = send(&state, "POST", "/parse", Some(text_request(TWO_EMPLOYEES))).await;

    assert_eq!(status, StatusCode::OK);
    let batches = result["batches"].as_array().unwrap();
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0]["employee_name"], "김철수");
    assert_eq!(batches[0]["vacations"][0]["type"], "annual");
    assert_eq!(batches[0]["vacations"][1]["type"], "morning_half");
    assert_eq!(batches[1]["employee_name"], "박영희");
    assert_eq!(batches[1]["vacations"].as_array().unwrap().len(), 1);
    assert!(result["errors"].as_array().unwrap().is_empty());
    // Neither employee exists yet.
    assert_eq!(result["warnings"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_parse_equivalent_date_shapes() {
    let state = create_test_state();
    let text = "김철수\n25-07-17\n2025-07-17, 20250717";

    let (status, result) = send(&state, "POST", "/parse", Some(text_request(text))).await;

    assert_eq!(status, StatusCode::OK);
    let vacations = result["batches"][0]["vacations"].as_array().unwrap();
    assert_eq!(vacations.len(), 3);
    for vacation in vacations {
        assert_eq!(vacation["date"], "2025-07-17");
    }
}

#[tokio::test]
async fn test_parse_leap_day_depends_on_reference_year() {
    let state = create_test_state();

    let leap = json!({ "text": "김철수\n0229", "reference_year": 2024, "reference_month": 2 });
    let (_, result) = send(&state, "POST", "/parse", Some(leap)).await;
    assert_eq!(result["batches"][0]["vacations"][0]["date"], "2024-02-29");

    // Without a valid date the line reads as another name.
    let common = json!({ "text": "김철수\n0229", "reference_year": 2025, "reference_month": 2 });
    let (_, result) = send(&state, "POST", "/parse", Some(common)).await;
    assert!(result["batches"].as_array().unwrap().is_empty());
    assert!(result["errors"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_parse_date_before_name_is_error() {
    let state = create_test_state();

    let (status, result) = send(&state, "POST", "/parse", Some(text_request("0715"))).await;

    assert_eq!(status, StatusCode::OK);
    assert!(result["batches"].as_array().unwrap().is_empty());
    assert_eq!(result["errors"].as_array().unwrap().len(), 1);
    assert_eq!(result["errors"][0]["line_number"], 1);
    assert!(result["warnings"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_parse_missing_text_is_validation_error() {
    let state = create_test_state();

    let body = json!({ "reference_year": 2025 });
    let (status, result) = send(&state, "POST", "/parse", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "VALIDATION_ERROR");
}

// =============================================================================
// SECTION 2: Registration
// =============================================================================

#[tokio::test]
async fn test_register_creates_employees_and_records() {
    let state = create_test_state();

    let (status, report) = register(&state, TWO_EMPLOYEES).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["employees_created"], 2);
    assert_eq!(report["created"], 3);
    assert_eq!(report["overwritten"], 0);
    assert_eq!(report["failed"], 0);
    assert_eq!(report["warnings"].as_array().unwrap().len(), 2);

    let (_, leaves) = send(&state, "GET", "/leaves", None).await;
    assert_eq!(leaves.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_register_twice_overwrites() {
    let state = create_test_state();
    register(&state, TWO_EMPLOYEES).await;
    let (_, first) = send(&state, "GET", "/leaves", None).await;

    let (status, report) = register(&state, TWO_EMPLOYEES).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["employees_created"], 0);
    assert_eq!(report["created"], 3);
    assert_eq!(report["overwritten"], 3);
    // Known names no longer warn.
    assert!(report["warnings"].as_array().unwrap().is_empty());

    let (_, second) = send(&state, "GET", "/leaves", None).await;
    let content = |leaves: &Value| -> Vec<(String, String)> {
        let mut pairs: Vec<_> = leaves
            .as_array()
            .unwrap()
            .iter()
            .map(|r| (r["date"].to_string(), r["type"].to_string()))
            .collect();
        pairs.sort();
        pairs
    };
    assert_eq!(content(&first), content(&second));
    assert_ne!(first[0]["id"], second[0]["id"]);
}

#[tokio::test]
async fn test_register_blocked_by_parse_errors() {
    let state = create_test_state();

    let (status, result) = register(&state, "0714\n김철수\n0715").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(result["code"], "PARSE_ERRORS");
    let (_, leaves) = send(&state, "GET", "/leaves", None).await;
    assert!(leaves.as_array().unwrap().is_empty());
}

// =============================================================================
// SECTION 3: Spans
// =============================================================================

#[tokio::test]
async fn test_spans_split_on_gap() {
    let state = create_test_state();
    register(&state, "김철수\n0715, 0716, 0718").await;

    let (status, result) = send(&state, "GET", "/spans?year=2025&month=7", None).await;

    assert_eq!(status, StatusCode::OK);
    let spans = employee_spans(&result, "김철수")["spans"].as_array().unwrap();
    assert_eq!(spans.len(), 2);
    assert_eq!(spans[0]["start_date"], "2025-07-15");
    assert_eq!(spans[0]["end_date"], "2025-07-16");
    assert_eq!(spans[1]["start_date"], "2025-07-18");
    assert_eq!(spans[1]["end_date"], "2025-07-18");
}

#[tokio::test]
async fn test_spans_with_mixed_types_are_annual() {
    let state = create_test_state();
    register(&state, TWO_EMPLOYEES).await;

    let (_, result) = send(&state, "GET", "/spans?year=2025&month=7", None).await;

    let kim = &employee_spans(&result, "김철수")["spans"];
    assert_eq!(kim.as_array().unwrap().len(), 1);
    assert_eq!(kim[0]["type"], "annual");
    assert_eq!(kim[0]["label"], "연차");
    assert_eq!(kim[0]["color"], "#4f8ef7");
    assert_eq!(kim[0]["source_record_ids"].as_array().unwrap().len(), 2);

    let park = &employee_spans(&result, "박영희")["spans"];
    assert_eq!(park[0]["start_date"], "2025-07-20");
}

#[tokio::test]
async fn test_spans_of_other_month_are_excluded() {
    let state = create_test_state();
    register(&state, TWO_EMPLOYEES).await;

    let (status, result) = send(&state, "GET", "/spans?year=2025&month=8", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(result.as_array().unwrap().is_empty());
}

// =============================================================================
// SECTION 4: Single-entry edits
// =============================================================================

#[tokio::test]
async fn test_move_inside_own_span_allowed() {
    let state = create_test_state();
    register(&state, "김철수\n0715, 0716, 0717").await;
    let (_, leaves) = send(&state, "GET", "/leaves", None).await;
    let middle = leaves[1]["id"].as_str().unwrap().to_string();

    let body = json!({ "date": "2025-07-15", "type": "annual" });
    let (status, result) = send(&state, "PUT", &format!("/leaves/{}", middle), Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["date"], "2025-07-15");
}

#[tokio::test]
async fn test_move_onto_other_span_conflicts() {
    let state = create_test_state();
    register(&state, "김철수\n0715, 0717, 0718").await;
    let (_, leaves) = send(&state, "GET", "/leaves", None).await;
    let first = leaves[0]["id"].as_str().unwrap().to_string();
    let moved = leaves[1]["id"].as_str().unwrap().to_string();

    let body = json!({ "date": "2025-07-15", "type": "annual" });
    let (status, result) = send(&state, "PUT", &format!("/leaves/{}", moved), Some(body)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(result["code"], "LEAVE_CONFLICT");
    assert!(result["details"].as_str().unwrap().contains(&first));
}

#[tokio::test]
async fn test_create_range_then_conflict() {
    let state = create_test_state();
    register(&state, "김철수\n0701").await;
    let id = employee_id(&state, "김철수").await;

    let range = json!({
        "employee_id": id,
        "date": "2025-07-21",
        "end_date": "2025-07-23",
        "type": "special"
    });
    let (status, created) = send(&state, "POST", "/leaves", Some(range)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created.as_array().unwrap().len(), 3);

    let overlapping = json!({ "employee_id": id, "date": "2025-07-23", "type": "sick" });
    let (status, result) = send(&state, "POST", "/leaves", Some(overlapping)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(result["code"], "LEAVE_CONFLICT");
}

#[tokio::test]
async fn test_create_half_day_range_rejected() {
    let state = create_test_state();
    register(&state, "김철수\n0701").await;
    let id = employee_id(&state, "김철수").await;

    let body = json!({
        "employee_id": id,
        "date": "2025-07-21",
        "end_date": "2025-07-22",
        "type": "afternoon_half"
    });
    let (status, result) = send(&state, "POST", "/leaves", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_LEAVE");
}

#[tokio::test]
async fn test_create_for_unknown_employee_returns_404() {
    let state = create_test_state();
    let body = json!({ "employee_id": "nobody", "date": "2025-07-21", "type": "annual" });

    let (status, result) = send(&state, "POST", "/leaves", Some(body)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(result["code"], "EMPLOYEE_NOT_FOUND");
}

#[tokio::test]
async fn test_delete_splits_span() {
    let state = create_test_state();
    register(&state, "김철수\n0715, 0716, 0717").await;
    let (_, leaves) = send(&state, "GET", "/leaves", None).await;
    let middle = leaves[1]["id"].as_str().unwrap().to_string();

    let (status, _) = send(&state, "DELETE", &format!("/leaves/{}", middle), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, result) = send(&state, "GET", "/spans?year=2025&month=7", None).await;
    assert_eq!(
        employee_spans(&result, "김철수")["spans"]
            .as_array()
            .unwrap()
            .len(),
        2
    );
}
