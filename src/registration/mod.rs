//! Writing leave into the store.
//!
//! Batch registration overwrites whatever already sits on a day; the
//! single-entry paths refuse to and report a conflict instead.

mod batch;
mod entry;

pub use batch::{EntryFailure, RegistrationReport, register_batches, register_outcome};
pub use entry::{LeaveUpdate, MAX_RANGE_DAYS, NewLeave, create_leave, delete_leave, update_leave};
