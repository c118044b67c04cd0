//! Configuration loading and management for the leave engine.
//!
//! This module loads parser vocabulary, server settings and the leave-type
//! palette from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use leave_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Short-year pivot: {}", config.parser().short_year_pivot);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    EngineConfig, EngineSettings, LeaveTypeStyle, LeaveTypesConfig, ParserConfig, ServerConfig,
};
