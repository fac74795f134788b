//! # game-events
//!
//! Registry and dispatch index for scripted game-event handlers.
//!
//! ## Design Principles
//!
//! 1. **Stable Slots**: Handlers live in an append-only primary store.
//!    Removal leaves a tombstone, so indices and keys taken during a
//!    dispatch pass stay meaningful while handlers mutate the registry.
//!
//! 2. **Non-Owning Indices**: The name, dynamic and identifier indices hold
//!    generation-checked [`HandlerKey`]s. A key never resolves to a removed
//!    handler.
//!
//! 3. **Caller Owns Semantics**: Parsing definitions, matching dynamic
//!    names, evaluating conditions and running handler bodies all happen
//!    outside this crate.
//!
//! ## Modules
//!
//! - `core`: Handler keys, configuration, errors
//! - `handlers`: Names, handler records, the registry and its cursor

pub mod core;
pub mod handlers;

pub use crate::core::{ConfigError, DuplicateIdPolicy, HandlerKey, RegistryConfig, RegistryError};

pub use crate::handlers::{
    standardize_name, DispatchCursor, EventHandler, EventHandlers, HandlerDefinition, TriggerName,
};
