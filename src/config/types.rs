//! Configuration types for the leave engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

use crate::models::LeaveType;

/// Date parsing settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    /// Two-digit years below this value map to 20xx, the rest to 19xx.
    pub short_year_pivot: u32,
    /// Parenthesized qualifiers marking morning-only leave.
    pub morning_markers: Vec<String>,
    /// Parenthesized qualifiers marking afternoon-only leave.
    pub afternoon_markers: Vec<String>,
    /// Quiet period before a pending parse runs, in milliseconds.
    pub debounce_ms: u64,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            short_year_pivot: 50,
            morning_markers: vec!["오전".into(), "morning".into(), "am".into()],
            afternoon_markers: vec!["오후".into(), "afternoon".into(), "pm".into()],
            debounce_ms: 500,
        }
    }
}

impl ParserConfig {
    /// The debounce quiet period as a [`Duration`].
    pub fn debounce_period(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address to bind, e.g. "127.0.0.1:3000".
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Contents of `engine.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineSettings {
    /// Date parsing settings.
    #[serde(default)]
    pub parser: ParserConfig,
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
}

/// Presentation attributes for one leave type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LeaveTypeStyle {
    /// Display label.
    pub label: String,
    /// CSS color used on the calendar.
    pub color: String,
}

/// Contents of `leave_types.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveTypesConfig {
    /// Style per leave type.
    pub leave_types: BTreeMap<LeaveType, LeaveTypeStyle>,
}

impl Default for LeaveTypesConfig {
    fn default() -> Self {
        let style = |label: &str, color: &str| LeaveTypeStyle {
            label: label.to_string(),
            color: color.to_string(),
        };
        let leave_types = BTreeMap::from([
            (LeaveType::Annual, style("연차", "#4f8ef7")),
            (LeaveType::MorningHalf, style("오전반차", "#7fc8a9")),
            (LeaveType::AfternoonHalf, style("오후반차", "#f7c04f")),
            (LeaveType::Special, style("특별휴가", "#b07ff7")),
            (LeaveType::Sick, style("병가", "#f76f6f")),
            (LeaveType::Work, style("근무", "#9aa5b1")),
        ]);
        Self { leave_types }
    }
}

/// The complete engine configuration.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    settings: EngineSettings,
    leave_types: LeaveTypesConfig,
}

impl EngineConfig {
    /// Creates a new engine configuration.
    pub fn new(settings: EngineSettings, leave_types: LeaveTypesConfig) -> Self {
        Self {
            settings,
            leave_types,
        }
    }

    /// Returns the date parsing settings.
    pub fn parser(&self) -> &ParserConfig {
        &self.settings.parser
    }

    /// Returns the HTTP server settings.
    pub fn server(&self) -> &ServerConfig {
        &self.settings.server
    }

    /// Returns the style table for all leave types.
    pub fn leave_types(&self) -> &BTreeMap<LeaveType, LeaveTypeStyle> {
        &self.leave_types.leave_types
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parser_config() {
        let parser = ParserConfig::default();
        assert_eq!(parser.short_year_pivot, 50);
        assert_eq!(parser.debounce_period(), Duration::from_millis(500));
        assert!(parser.morning_markers.contains(&"오전".to_string()));
        assert!(parser.afternoon_markers.contains(&"pm".to_string()));
    }

    #[test]
    fn test_default_leave_types_cover_every_variant() {
        let config = LeaveTypesConfig::default();
        for leave_type in LeaveType::ALL {
            assert!(config.leave_types.contains_key(&leave_type));
        }
    }

    #[test]
    fn test_engine_settings_fill_missing_sections() {
        let settings: EngineSettings =
            serde_yaml::from_str("server:\n  bind: 0.0.0.0:8080\n").unwrap();
        assert_eq!(settings.server.bind, "0.0.0.0:8080");
        assert_eq!(settings.parser.short_year_pivot, 50);
    }

    #[test]
    fn test_leave_types_deserialize_with_snake_case_keys() {
        let yaml = r##"
leave_types:
  morning_half:
    label: Morning
    color: "#000000"
"##;
        let config: LeaveTypesConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.leave_types[&LeaveType::MorningHalf].label, "Morning");
    }
}
