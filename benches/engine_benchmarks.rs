//! Performance benchmarks for the leave engine.
//!
//! Covers the pure parsing and aggregation paths plus an end-to-end
//! register request through the router.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use leave_engine::api::{AppState, create_router};
use leave_engine::config::{ConfigLoader, ParserConfig};
use leave_engine::models::{LeaveRecord, LeaveType, Period};
use leave_engine::parsing::{BatchClassifier, DateNormalizer};
use leave_engine::schedule::aggregate_all;
use leave_engine::store::MemoryStore;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Builds pasted text with `employees` names, each followed by a week of
/// mixed-shape date tokens.
fn create_text(employees: usize) -> String {
    let mut text = String::new();
    for i in 0..employees {
        text.push_str(&format!("직원{:03}\n", i));
        text.push_str("0714, 0715\n2025-07-16\n250717(오전)\n18\n\n");
    }
    text
}

/// Builds `employees` x 20 records in July 2025 with a gap every fifth day.
fn create_records(employees: usize) -> Vec<LeaveRecord> {
    (0..employees)
        .flat_map(|e| {
            (1..=25u32).filter(|d| d % 5 != 0).map(move |d| LeaveRecord {
                id: format!("r{}_{}", e, d),
                employee_id: format!("emp_{:03}", e),
                date: NaiveDate::from_ymd_opt(2025, 7, d).expect("valid July day"),
                leave_type: if d % 2 == 0 { LeaveType::Annual } else { LeaveType::Sick },
                description: None,
            })
        })
        .collect()
}

/// Benchmark: Normalizing single tokens of each shape.
fn bench_normalize(c: &mut Criterion) {
    let normalizer = DateNormalizer::new(&ParserConfig::default());
    let tokens = [
        "20250717", "2025-07-17", "25.07.17", "250717", "0717", "7/17", "17", "0716(오전)",
    ];

    c.bench_function("normalize_tokens", |b| {
        b.iter(|| {
            for token in tokens {
                black_box(normalizer.normalize(black_box(token), 2025, 7));
            }
        })
    });
}

/// Benchmark: Classifying pasted text of various sizes.
fn bench_parse_scaling(c: &mut Criterion) {
    let classifier = BatchClassifier::new(DateNormalizer::new(&ParserConfig::default()))
        .with_reference(2025, 7);
    let known: Vec<String> = (0..50).map(|i| format!("직원{:03}", i)).collect();

    let mut group = c.benchmark_group("parse");
    for employees in [1, 10, 100].iter() {
        let text = create_text(*employees);
        group.throughput(Throughput::Elements(*employees as u64));
        group.bench_with_input(BenchmarkId::new("employees", employees), &text, |b, text| {
            b.iter(|| black_box(classifier.parse(text, &known)))
        });
    }
    group.finish();
}

/// Benchmark: Aggregating a month of records into spans.
fn bench_aggregate_scaling(c: &mut Criterion) {
    let period = Period::month(2025, 7).expect("valid period");

    let mut group = c.benchmark_group("aggregate");
    for employees in [1, 10, 100].iter() {
        let records = create_records(*employees);
        group.throughput(Throughput::Elements(records.len() as u64));
        group.bench_with_input(BenchmarkId::new("employees", employees), &records, |b, records| {
            b.iter(|| black_box(aggregate_all(records, &period)))
        });
    }
    group.finish();
}

/// Benchmark: Register request for ten employees via the router.
fn bench_register_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    let router = create_router(AppState::new(config, MemoryStore::default()));
    let body = serde_json::json!({
        "text": create_text(10),
        "reference_year": 2025,
        "reference_month": 7
    })
    .to_string();

    c.bench_function("register_10_employees", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/register")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_normalize,
    bench_parse_scaling,
    bench_aggregate_scaling,
    bench_register_request,
);
criterion_main!(benches);
