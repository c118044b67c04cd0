//! Leave Engine
//!
//! This crate turns pasted, free-form leave text into per-employee leave
//! batches, registers them against a record store, and groups stored
//! records into consecutive spans for a monthly schedule view.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod parsing;
pub mod registration;
pub mod schedule;
pub mod store;
