//! Batch leave text parsing.
//!
//! This module contains the date token normalizer, the line classifier that
//! groups recognized dates under employee names, and a debounced driver for
//! live text input.

mod classifier;
mod debounce;
mod normalizer;

pub use classifier::{BatchClassifier, TOKEN_SEPARATORS, split_tokens};
pub use debounce::ParseDebouncer;
pub use normalizer::{DateNormalizer, NormalizedDate};
