//! Date token normalization.
//!
//! This module turns one free-form date token (`0716`, `25-07-17`,
//! `2025.7.17`, `16(오전)`) into a calendar date plus the leave type implied
//! by an optional half-day qualifier.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::ParserConfig;
use crate::models::LeaveType;

/// Where a pattern takes its year from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum YearField {
    /// Four-digit year in the given capture group.
    Full(usize),
    /// Two-digit year in the given capture group, expanded by the pivot rule.
    Short(usize),
    /// No year in the token; use the reference year.
    Reference,
}

/// Where a pattern takes its month from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MonthField {
    Group(usize),
    Reference,
}

/// One recognized token shape.
#[derive(Debug)]
struct DatePattern {
    name: &'static str,
    regex: &'static str,
    year: YearField,
    month: MonthField,
    day: usize,
}

/// Recognized token shapes in priority order. Digit classes are ASCII only;
/// fullwidth input is folded before matching. The first regex that matches
/// decides the outcome; later, more permissive shapes are never retried.
const DATE_PATTERNS: &[DatePattern] = &[
    DatePattern {
        name: "yyyymmdd",
        regex: r"^([0-9]{4})([0-9]{2})([0-9]{2})$",
        year: YearField::Full(1),
        month: MonthField::Group(2),
        day: 3,
    },
    DatePattern {
        name: "yyyy-mm-dd",
        regex: r"^([0-9]{4})[-/.]([0-9]{1,2})[-/.]([0-9]{1,2})$",
        year: YearField::Full(1),
        month: MonthField::Group(2),
        day: 3,
    },
    DatePattern {
        name: "yy-mm-dd",
        regex: r"^([0-9]{2})[-/.]([0-9]{1,2})[-/.]([0-9]{1,2})$",
        year: YearField::Short(1),
        month: MonthField::Group(2),
        day: 3,
    },
    DatePattern {
        name: "yymmdd",
        regex: r"^([0-9]{2})([0-9]{2})([0-9]{2})$",
        year: YearField::Short(1),
        month: MonthField::Group(2),
        day: 3,
    },
    DatePattern {
        name: "mmdd",
        regex: r"^([0-9]{2})([0-9]{2})$",
        year: YearField::Reference,
        month: MonthField::Group(1),
        day: 2,
    },
    DatePattern {
        name: "mm-dd",
        regex: r"^([0-9]{1,2})[-/.]([0-9]{2})$",
        year: YearField::Reference,
        month: MonthField::Group(1),
        day: 2,
    },
    DatePattern {
        name: "m-d",
        regex: r"^([0-9])[-/.]([0-9]{1,2})$",
        year: YearField::Reference,
        month: MonthField::Group(1),
        day: 2,
    },
    DatePattern {
        name: "mm-d",
        regex: r"^([0-9]{2})[-/.]([0-9])$",
        year: YearField::Reference,
        month: MonthField::Group(1),
        day: 2,
    },
    DatePattern {
        name: "dd",
        regex: r"^([0-9]{1,2})$",
        year: YearField::Reference,
        month: MonthField::Reference,
        day: 1,
    },
];

fn compiled_patterns() -> &'static [Regex] {
    static COMPILED: OnceLock<Vec<Regex>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        DATE_PATTERNS
            .iter()
            .map(|p| Regex::new(p.regex).expect("date pattern table holds valid regexes"))
            .collect()
    })
}

/// A successfully normalized date token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedDate {
    /// The calendar date named by the token.
    pub date: NaiveDate,
    /// `MorningHalf`/`AfternoonHalf` when qualified, otherwise `Annual`.
    #[serde(rename = "type")]
    pub leave_type: LeaveType,
}

impl NormalizedDate {
    /// The canonical `yyyy-MM-dd` form of the date.
    pub fn canonical(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Parses single date tokens against the ordered pattern table.
///
/// # Example
///
/// ```
/// use leave_engine::config::ParserConfig;
/// use leave_engine::models::LeaveType;
/// use leave_engine::parsing::DateNormalizer;
///
/// let normalizer = DateNormalizer::new(&ParserConfig::default());
///
/// let parsed = normalizer.normalize("0716(오전)", 2025, 7).unwrap();
/// assert_eq!(parsed.canonical(), "2025-07-16");
/// assert_eq!(parsed.leave_type, LeaveType::MorningHalf);
///
/// assert!(normalizer.normalize("02-30", 2025, 7).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct DateNormalizer {
    qualifier: Regex,
    morning_markers: Vec<String>,
    short_year_pivot: u32,
}

impl DateNormalizer {
    /// Builds a normalizer from the parser settings.
    pub fn new(config: &ParserConfig) -> Self {
        let markers: Vec<String> = config
            .morning_markers
            .iter()
            .chain(&config.afternoon_markers)
            .map(|m| regex::escape(m.trim()))
            .collect();
        let qualifier = Regex::new(&format!(r"(?i)\(\s*({})\s*\)", markers.join("|")))
            .expect("escaped markers form a valid regex");

        Self {
            qualifier,
            morning_markers: config
                .morning_markers
                .iter()
                .map(|m| m.trim().to_lowercase())
                .collect(),
            short_year_pivot: config.short_year_pivot,
        }
    }

    /// Normalizes one token.
    ///
    /// Returns `None` when no shape matches or the matched fields do not
    /// name a real calendar day. `None` means "not a date", never an error.
    pub fn normalize(
        &self,
        token: &str,
        reference_year: i32,
        reference_month: u32,
    ) -> Option<NormalizedDate> {
        let folded = fold_fullwidth(token.trim());
        let (remainder, leave_type) = self.strip_qualifier(&folded);

        let (index, captures) = compiled_patterns()
            .iter()
            .enumerate()
            .find_map(|(i, re)| re.captures(&remainder).map(|c| (i, c)))?;
        let pattern = &DATE_PATTERNS[index];
        let group = |i: usize| captures.get(i).map(|m| m.as_str());

        let year = match pattern.year {
            YearField::Full(i) => group(i)?.parse::<i32>().ok()?,
            YearField::Short(i) => self.expand_short_year(group(i)?.parse::<u32>().ok()?),
            YearField::Reference => reference_year,
        };
        let month = match pattern.month {
            MonthField::Group(i) => group(i)?.parse::<u32>().ok()?,
            MonthField::Reference => reference_month,
        };
        let day = group(pattern.day)?.parse::<u32>().ok()?;

        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return None;
        }
        let date = NaiveDate::from_ymd_opt(year, month, day)?;

        tracing::trace!(token, pattern = pattern.name, %date, "normalized date token");
        Some(NormalizedDate { date, leave_type })
    }

    /// Removes a recognized half-day qualifier and resolves the leave type.
    fn strip_qualifier(&self, token: &str) -> (String, LeaveType) {
        let Some(captures) = self.qualifier.captures(token) else {
            return (token.to_string(), LeaveType::Annual);
        };
        let (Some(whole), Some(marker)) = (captures.get(0), captures.get(1)) else {
            return (token.to_string(), LeaveType::Annual);
        };

        let leave_type = if self
            .morning_markers
            .contains(&marker.as_str().to_lowercase())
        {
            LeaveType::MorningHalf
        } else {
            LeaveType::AfternoonHalf
        };

        let remainder = format!("{}{}", &token[..whole.start()], &token[whole.end()..]);
        (remainder.trim().to_string(), leave_type)
    }

    fn expand_short_year(&self, short: u32) -> i32 {
        let century = if short < self.short_year_pivot { 2000 } else { 1900 };
        century + short as i32
    }
}

/// Maps fullwidth ASCII forms (`０７１６`, `（오전）`, `／`) to their ASCII
/// counterparts.
fn fold_fullwidth(token: &str) -> String {
    token
        .chars()
        .map(|c| match c {
            '\u{FF01}'..='\u{FF5E}' => char::from_u32(c as u32 - 0xFEE0).unwrap_or(c),
            _ => c,
        })
        .collect()
}

impl Default for DateNormalizer {
    fn default() -> Self {
        Self::new(&ParserConfig::default())
    }
}
