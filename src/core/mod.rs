//! Core types shared by the registry.
//!
//! - [`HandlerKey`]: stable, non-owning handle to a primary-store slot
//! - [`RegistryConfig`], [`DuplicateIdPolicy`]: startup configuration
//! - [`RegistryError`], [`ConfigError`]: the few fallible paths

mod config;
mod error;
mod key;

pub use config::{DuplicateIdPolicy, RegistryConfig};
pub use error::{ConfigError, RegistryError};
pub use key::HandlerKey;
