//! Bulk configuration value object
//!
//! Sourced from a persisted world setting and handed to the engine
//! explicitly; nothing reads it from global state.

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// World-level switches for bulk calculation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BulkConfig {
    /// Treat coins as weightless
    pub ignore_coin_bulk: bool,
}

impl BulkConfig {
    pub fn with_ignore_coin_bulk(mut self, ignore: bool) -> Self {
        self.ignore_coin_bulk = ignore;
        self
    }

    /// Load from the JSON form of the world setting.
    ///
    /// Missing keys fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        Ok(serde_json::from_str(json)?)
    }
}
