//! Consecutive span aggregation.
//!
//! Per-day leave records are merged into runs of calendar-adjacent days so
//! the calendar can draw one bar per run and edits can target a whole run.

use std::collections::BTreeMap;

use crate::models::{ConsecutiveSpan, LeaveRecord, LeaveType, Period};

/// Merges one employee's records within `period` into consecutive spans.
///
/// Records are sorted by date and scanned once. A record whose date is
/// exactly one day after the current span's end extends it; anything else
/// closes the span and opens a new one. When an extending record's type
/// differs from the span's type, the span becomes `Annual`.
///
/// # Example
///
/// ```
/// use leave_engine::models::{LeaveRecord, LeaveType, Period};
/// use leave_engine::schedule::aggregate;
/// use chrono::NaiveDate;
///
/// let record = |id: &str, day: u32| LeaveRecord {
///     id: id.to_string(),
///     employee_id: "emp_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2025, 7, day).unwrap(),
///     leave_type: LeaveType::Annual,
///     description: None,
/// };
/// let records = vec![record("a", 15), record("b", 16), record("c", 18)];
///
/// let spans = aggregate(&records, "emp_001", &Period::month(2025, 7).unwrap());
/// assert_eq!(spans.len(), 2);
/// assert_eq!(spans[0].source_record_ids, vec!["a", "b"]);
/// assert_eq!(spans[1].day_count(), 1);
/// ```
pub fn aggregate(
    records: &[LeaveRecord],
    employee_id: &str,
    period: &Period,
) -> Vec<ConsecutiveSpan> {
    let days: Vec<&LeaveRecord> = records
        .iter()
        .filter(|r| r.employee_id == employee_id && period.contains_date(r.date))
        .collect();
    build_spans(days)
}

/// Aggregates every employee present in `period`, keyed by employee id.
pub fn aggregate_all(
    records: &[LeaveRecord],
    period: &Period,
) -> BTreeMap<String, Vec<ConsecutiveSpan>> {
    let mut by_employee: BTreeMap<&str, Vec<&LeaveRecord>> = BTreeMap::new();
    for record in records.iter().filter(|r| period.contains_date(r.date)) {
        by_employee
            .entry(record.employee_id.as_str())
            .or_default()
            .push(record);
    }

    by_employee
        .into_iter()
        .map(|(employee_id, days)| (employee_id.to_string(), build_spans(days)))
        .collect()
}

/// Returns the span built from the record with `record_id`, if any.
pub fn find_span_for_record<'a>(
    spans: &'a [ConsecutiveSpan],
    record_id: &str,
) -> Option<&'a ConsecutiveSpan> {
    spans.iter().find(|span| span.contains_record(record_id))
}

fn build_spans(mut days: Vec<&LeaveRecord>) -> Vec<ConsecutiveSpan> {
    // Stable, so same-day records keep their input order.
    days.sort_by_key(|r| r.date);

    let mut spans = Vec::new();
    let mut current: Option<ConsecutiveSpan> = None;

    for record in days {
        match current.as_mut() {
            Some(span) if span.end_date.succ_opt() == Some(record.date) => {
                span.end_date = record.date;
                if span.leave_type != record.leave_type {
                    span.leave_type = LeaveType::Annual;
                }
                if span.description.is_none() {
                    span.description = non_empty_description(record);
                }
                span.source_record_ids.push(record.id.clone());
            }
            _ => {
                spans.extend(current.take());
                current = Some(open_span(record));
            }
        }
    }

    spans.extend(current);
    spans
}

fn open_span(record: &LeaveRecord) -> ConsecutiveSpan {
    ConsecutiveSpan {
        employee_id: record.employee_id.clone(),
        start_date: record.date,
        end_date: record.date,
        leave_type: record.leave_type,
        description: non_empty_description(record),
        source_record_ids: vec![record.id.clone()],
    }
}

fn non_empty_description(record: &LeaveRecord) -> Option<String> {
    record
        .description
        .as_ref()
        .filter(|d| !d.trim().is_empty())
        .cloned()
}
