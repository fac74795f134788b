//! Error types.
//!
//! Lookups and removals never fail: absence is a routine outcome during
//! dispatch and is reported as `None` or an empty slice. The only fallible
//! paths are a rejected duplicate identifier and configuration parsing.

/// Errors raised by registry mutation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The identifier already resolves to a live handler and the registry is
    /// configured with [`DuplicateIdPolicy::Reject`](super::DuplicateIdPolicy::Reject).
    #[error("event handler id '{id}' is already held by a live handler")]
    DuplicateId { id: String },
}

/// Errors raised while loading or saving a [`RegistryConfig`](super::RegistryConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The TOML text could not be parsed into a configuration.
    #[error("invalid registry configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be rendered as TOML.
    #[error("failed to serialize registry configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}
