//! Horizontal placement of spans within a period row.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{ConsecutiveSpan, Period};

/// Decimal places kept in placement fractions.
pub const PLACEMENT_SCALE: u32 = 4;

/// Position and width of a span as fractions of its period row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanPlacement {
    /// Days from the period start to the span start, over period length.
    pub offset: Decimal,
    /// Visible day count over period length.
    pub width: Decimal,
}

impl SpanPlacement {
    /// Computes the placement of `span` within `period`.
    ///
    /// The span is clipped to the period. Returns `None` when the span lies
    /// entirely outside it.
    ///
    /// # Example
    ///
    /// ```
    /// use leave_engine::models::{ConsecutiveSpan, LeaveType, Period};
    /// use leave_engine::schedule::SpanPlacement;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let span = ConsecutiveSpan {
    ///     employee_id: "emp_001".to_string(),
    ///     start_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
    ///     end_date: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
    ///     leave_type: LeaveType::Annual,
    ///     description: None,
    ///     source_record_ids: (0..15).map(|i| i.to_string()).collect(),
    /// };
    /// let placement = SpanPlacement::for_span(&span, &Period::month(2025, 6).unwrap()).unwrap();
    /// assert_eq!(placement.offset, Decimal::ZERO);
    /// assert_eq!(placement.width, Decimal::new(5, 1));
    /// ```
    pub fn for_span(span: &ConsecutiveSpan, period: &Period) -> Option<Self> {
        let start = span.start_date.max(period.start_date);
        let end = span.end_date.min(period.end_date);
        if start > end {
            return None;
        }

        let length = Decimal::from(period.day_count());
        let offset = Decimal::from((start - period.start_date).num_days()) / length;
        let width = Decimal::from((end - start).num_days() + 1) / length;

        Some(Self {
            offset: offset.round_dp(PLACEMENT_SCALE),
            width: width.round_dp(PLACEMENT_SCALE),
        })
    }
}
