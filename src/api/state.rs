//! Application state for the leave engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::parsing::DateNormalizer;
use crate::store::MemoryStore;

/// Shared application state.
///
/// Holds the loaded configuration, a normalizer built from it, and the
/// record store.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    normalizer: Arc<DateNormalizer>,
    store: Arc<MemoryStore>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(config: ConfigLoader, store: MemoryStore) -> Self {
        let normalizer = DateNormalizer::new(config.parser());
        Self {
            config: Arc::new(config),
            normalizer: Arc::new(normalizer),
            store: Arc::new(store),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the date normalizer built from the parser settings.
    pub fn normalizer(&self) -> &DateNormalizer {
        &self.normalizer
    }

    /// Returns the record store.
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }
}
