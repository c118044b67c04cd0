//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::LeaveType;

use super::types::{EngineConfig, EngineSettings, LeaveTypeStyle, LeaveTypesConfig, ParserConfig};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml       # Parser vocabulary, pivot, debounce, server
/// └── leave_types.yaml  # Label and color per leave type
/// ```
///
/// # Example
///
/// ```no_run
/// use leave_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Debounce: {}ms", loader.parser().debounce_ms);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if either file is missing, contains invalid YAML,
    /// leaves a leave type without a style, or sets a pivot that is not a
    /// two-digit year.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let engine_path = path.join("engine.yaml");
        let settings = Self::load_yaml::<EngineSettings>(&engine_path)?;
        Self::validate_parser(&settings.parser, &engine_path)?;

        let leave_types_path = path.join("leave_types.yaml");
        let leave_types = Self::load_yaml::<LeaveTypesConfig>(&leave_types_path)?;
        if let Some(missing) = LeaveType::ALL
            .iter()
            .find(|t| !leave_types.leave_types.contains_key(t))
        {
            return Err(EngineError::ConfigParseError {
                path: leave_types_path.display().to_string(),
                message: format!("no style defined for leave type {}", missing),
            });
        }

        Ok(Self {
            config: EngineConfig::new(settings, leave_types),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate_parser(parser: &ParserConfig, path: &Path) -> EngineResult<()> {
        let message = if parser.short_year_pivot > 99 {
            Some("short_year_pivot must be between 0 and 99".to_string())
        } else if parser.morning_markers.is_empty() || parser.afternoon_markers.is_empty() {
            Some("half-day marker lists must not be empty".to_string())
        } else {
            None
        };

        match message {
            Some(message) => Err(EngineError::ConfigParseError {
                path: path.display().to_string(),
                message,
            }),
            None => Ok(()),
        }
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the date parsing settings.
    pub fn parser(&self) -> &ParserConfig {
        self.config.parser()
    }

    /// Gets the style for a leave type.
    pub fn leave_type_style(&self, leave_type: LeaveType) -> Option<&LeaveTypeStyle> {
        self.config.leave_types().get(&leave_type)
    }
}
