//! Registry configuration.
//!
//! Hosts configure the registry at startup, either in code through the
//! builder methods or from a TOML table:
//!
//! ```toml
//! duplicate_ids = "evict"
//! initial_capacity = 256
//! ```
//!
//! Missing keys take their defaults.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// What to do when a new handler's identifier is already held by a live handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateIdPolicy {
    /// Last registered wins on the identifier index. The older handler stays
    /// live but can no longer be reached by id. A warning is logged.
    #[default]
    Replace,
    /// Keep the existing handler and refuse the new one.
    Reject,
    /// Remove the existing handler, then add the new one.
    Evict,
}

/// Configuration for an [`EventHandlers`](crate::handlers::EventHandlers) registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Policy for identifier collisions between live handlers.
    pub duplicate_ids: DuplicateIdPolicy,

    /// Primary-store slots to reserve up front.
    pub initial_capacity: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            duplicate_ids: DuplicateIdPolicy::default(),
            initial_capacity: 64,
        }
    }
}

impl RegistryConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duplicate identifier policy (builder pattern).
    #[must_use]
    pub fn with_duplicate_ids(mut self, policy: DuplicateIdPolicy) -> Self {
        self.duplicate_ids = policy;
        self
    }

    /// Set the initial primary-store capacity (builder pattern).
    #[must_use]
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Render the configuration as TOML text.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
