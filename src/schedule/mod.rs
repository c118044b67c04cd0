//! Span aggregation, conflict detection and layout.
//!
//! Everything here is a pure function of the record set passed in; spans are
//! rebuilt from scratch on every call.

mod aggregation;
mod conflict;
mod layout;

pub use aggregation::{aggregate, aggregate_all, find_span_for_record};
pub use conflict::{LeaveCandidate, find_conflicts, has_conflict};
pub use layout::{PLACEMENT_SCALE, SpanPlacement};
