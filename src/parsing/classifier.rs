//! Batch text classification.
//!
//! Raw multi-line text is read one line at a time. A line holding at least
//! one recognizable date token is a date line; anything else is a name line.
//! Date lines attach to the most recent name line.

use std::collections::HashSet;

use chrono::{Datelike, Local};
use tracing::debug;

use crate::models::{Diagnostic, ParseOutcome, ParsedEmployeeBatch, ParsedLeaveEntry};

use super::normalizer::DateNormalizer;

/// Characters that separate tokens within one line.
pub const TOKEN_SEPARATORS: [char; 5] = [',', ';', '，', '；', '、'];

/// Line cursor state.
enum Cursor {
    /// No name line seen yet. Date lines here are errors.
    AwaitingName,
    /// Date lines attach to this batch.
    HasEmployee(ParsedEmployeeBatch),
}

/// Splits a line into trimmed, non-empty tokens.
///
/// # Example
///
/// ```
/// use leave_engine::parsing::split_tokens;
///
/// assert_eq!(split_tokens("0715, 0716(오전); 0717"), vec!["0715", "0716(오전)", "0717"]);
/// ```
pub fn split_tokens(line: &str) -> Vec<&str> {
    line.split(TOKEN_SEPARATORS)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Converts free-form text into per-employee leave batches.
///
/// # Example
///
/// ```
/// use leave_engine::parsing::{BatchClassifier, DateNormalizer};
///
/// let classifier = BatchClassifier::new(DateNormalizer::default()).with_reference(2025, 7);
/// let outcome = classifier.parse("김철수\n0715, 0716(오전)\n", &["김철수".to_string()]);
///
/// assert_eq!(outcome.batches.len(), 1);
/// assert_eq!(outcome.batches[0].vacations.len(), 2);
/// assert!(outcome.errors.is_empty());
/// assert!(outcome.warnings.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct BatchClassifier {
    normalizer: DateNormalizer,
    reference_year: i32,
    reference_month: u32,
}

impl BatchClassifier {
    /// Creates a classifier whose reference month is the current local month.
    pub fn new(normalizer: DateNormalizer) -> Self {
        let today = Local::now().date_naive();
        Self {
            normalizer,
            reference_year: today.year(),
            reference_month: today.month(),
        }
    }

    /// Sets the year and month used for tokens that omit them.
    pub fn with_reference(mut self, year: i32, month: u32) -> Self {
        self.reference_year = year;
        self.reference_month = month;
        self
    }

    /// The (year, month) used for tokens that omit them.
    pub fn reference(&self) -> (i32, u32) {
        (self.reference_year, self.reference_month)
    }

    /// Parses `raw_text` into batches and diagnostics.
    ///
    /// Names absent from `known_employee_names` produce warnings; date lines
    /// before the first name line produce errors. Unrecognized tokens on a
    /// date line are dropped silently.
    pub fn parse(&self, raw_text: &str, known_employee_names: &[String]) -> ParseOutcome {
        let known: HashSet<&str> = known_employee_names.iter().map(String::as_str).collect();
        let mut outcome = ParseOutcome::default();
        let mut cursor = Cursor::AwaitingName;

        for (index, raw_line) in raw_text.lines().enumerate() {
            let line_number = index + 1;
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }

            let entries = self.recognize_dates(line);
            if entries.is_empty() {
                if let Cursor::HasEmployee(batch) = cursor {
                    flush(batch, &mut outcome);
                }
                if !known.contains(line) {
                    outcome.warnings.push(Diagnostic::warning(
                        line_number,
                        format!("Unknown employee '{}' will be created on registration", line),
                    ));
                }
                cursor = Cursor::HasEmployee(ParsedEmployeeBatch {
                    employee_name: line.to_string(),
                    vacations: Vec::new(),
                });
                continue;
            }

            match &mut cursor {
                Cursor::AwaitingName => {
                    for entry in &entries {
                        outcome.errors.push(Diagnostic::error(
                            line_number,
                            format!(
                                "Date '{}' appears before any employee name",
                                entry.original_text
                            ),
                        ));
                    }
                }
                Cursor::HasEmployee(batch) => batch.vacations.extend(entries),
            }
        }

        if let Cursor::HasEmployee(batch) = cursor {
            flush(batch, &mut outcome);
        }

        debug!(
            batches = outcome.batches.len(),
            entries = outcome.entry_count(),
            errors = outcome.errors.len(),
            warnings = outcome.warnings.len(),
            "classified leave text"
        );
        outcome
    }

    fn recognize_dates(&self, line: &str) -> Vec<ParsedLeaveEntry> {
        split_tokens(line)
            .into_iter()
            .filter_map(|token| {
                self.normalizer
                    .normalize(token, self.reference_year, self.reference_month)
                    .map(|normalized| ParsedLeaveEntry {
                        date: normalized.date,
                        leave_type: normalized.leave_type,
                        original_text: token.to_string(),
                    })
            })
            .collect()
    }
}

/// Keeps a finished batch only if it recognized at least one date.
fn flush(batch: ParsedEmployeeBatch, outcome: &mut ParseOutcome) {
    if batch.vacations.is_empty() {
        debug!(employee = %batch.employee_name, "dropping employee with no dates");
        return;
    }
    outcome.batches.push(batch);
}
