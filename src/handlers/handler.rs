//! Event handler records.
//!
//! A [`HandlerDefinition`] is what the external definition parser hands the
//! registry. The registry only reads its trigger name and identifier; the
//! rest rides along for the dispatch caller.
//!
//! An [`EventHandler`] is the owning record built from a definition. It lives
//! in exactly one primary-store slot.

use serde::{Deserialize, Serialize};

use crate::core::HandlerKey;

use super::name::TriggerName;

/// Externally parsed handler definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandlerDefinition {
    /// Trigger-name specification: one name, a comma-separated list of
    /// names, or a pattern containing `$` variables.
    pub name: String,

    /// Identifier; empty means the handler is unidentified.
    pub id: String,

    /// Should the handler retire after its first firing?
    pub first_time_only: bool,
}

impl Default for HandlerDefinition {
    fn default() -> Self {
        Self {
            name: String::new(),
            id: String::new(),
            first_time_only: true,
        }
    }
}

impl HandlerDefinition {
    /// Create a definition for a trigger-name specification.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the identifier (builder pattern).
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Allow the handler to fire more than once (builder pattern).
    #[must_use]
    pub fn repeatable(mut self) -> Self {
        self.first_time_only = false;
        self
    }
}

/// A registered event handler.
///
/// `C` is the owner context handed to `add_event_handler`; the registry
/// stores it for the dispatch caller and never looks inside.
#[derive(Clone, Debug)]
pub struct EventHandler<C = ()> {
    key: HandlerKey,
    definition: HandlerDefinition,
    trigger: TriggerName,
    context: C,
    is_menu_item: bool,
    disabled: bool,
}

impl<C> EventHandler<C> {
    pub(crate) fn new(
        key: HandlerKey,
        definition: HandlerDefinition,
        context: C,
        is_menu_item: bool,
    ) -> Self {
        let trigger = TriggerName::parse(&definition.name);
        Self {
            key,
            definition,
            trigger,
            context,
            is_menu_item,
            disabled: false,
        }
    }

    /// The slot handle this handler was registered under.
    #[must_use]
    pub fn key(&self) -> HandlerKey {
        self.key
    }

    /// The identifier, possibly empty.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.definition.id
    }

    /// Check if the handler carries an identifier.
    #[must_use]
    pub fn has_id(&self) -> bool {
        !self.definition.id.is_empty()
    }

    /// The raw trigger-name specification, as defined.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// The parsed trigger name.
    #[must_use]
    pub fn trigger(&self) -> &TriggerName {
        &self.trigger
    }

    /// Check if the trigger name needs pattern matching at dispatch time.
    #[must_use]
    pub fn is_dynamic(&self) -> bool {
        self.trigger.is_dynamic()
    }

    #[must_use]
    pub fn definition(&self) -> &HandlerDefinition {
        &self.definition
    }

    #[must_use]
    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    /// Is this handler fired from a UI menu rather than automatically?
    #[must_use]
    pub fn is_menu_item(&self) -> bool {
        self.is_menu_item
    }

    #[must_use]
    pub fn first_time_only(&self) -> bool {
        self.definition.first_time_only
    }

    /// Mark the handler as no longer valid. It stays registered until removed.
    pub fn disable(&mut self) {
        self.disabled = true;
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }
}
