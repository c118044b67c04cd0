//! Request types for the leave engine API.

use serde::{Deserialize, Serialize};

/// Body of `POST /parse` and `POST /register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseRequest {
    /// The raw multi-line text.
    pub text: String,
    /// Year for tokens without one. Defaults to the current year.
    #[serde(default)]
    pub reference_year: Option<i32>,
    /// Month for bare day tokens. Defaults to the current month.
    #[serde(default)]
    pub reference_month: Option<u32>,
}

/// Query of `GET /spans`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpansQuery {
    /// Calendar year of the visible month.
    pub year: i32,
    /// Visible month, 1-12.
    pub month: u32,
}
