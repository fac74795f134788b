//! Event handler registry and dispatch index.
//!
//! Handlers are defined elsewhere (a scenario loader, a menu system) and
//! registered here. The dispatch loop asks the registry which handlers may
//! fire for an event, and handlers running during that loop may register
//! or remove other handlers.
//!
//! ## Key Components
//!
//! - [`HandlerDefinition`]: externally parsed definition (trigger name + id)
//! - [`TriggerName`]: fixed name list or dynamic pattern
//! - [`EventHandler`]: the owning handler record
//! - [`EventHandlers`]: primary store plus name, dynamic and id indices
//! - [`DispatchCursor`]: mutation-safe walk over the primary store
//!
//! ## Example Usage
//!
//! ```
//! use game_events::handlers::{EventHandlers, HandlerDefinition};
//!
//! let mut handlers = EventHandlers::new();
//!
//! // "When a unit dies, once"
//! handlers
//!     .add_event_handler(HandlerDefinition::new("die").with_id("first_blood"), (), false)
//!     .unwrap();
//! // "At the start of any turn", matched by the caller
//! handlers
//!     .add_event_handler(HandlerDefinition::new("turn $turn_number").repeatable(), (), false)
//!     .unwrap();
//!
//! // Dispatch "die": snapshot the candidates, then run them.
//! for key in handlers.candidates("die") {
//!     let Some(handler) = handlers.handler(key) else { continue };
//!     if handler.is_dynamic() {
//!         continue; // pattern matching is the caller's job
//!     }
//!     if handler.first_time_only() {
//!         handlers.remove(key);
//!     }
//! }
//!
//! assert!(handlers.get_event_handler_by_id("first_blood").is_none());
//! assert_eq!(handlers.get_dynamic().len(), 1);
//! assert_eq!(handlers.len(), 2);
//! ```
//!
//! ## Index Stability
//!
//! Removal tombstones a slot in place. Any index or [`HandlerKey`] taken
//! before a removal still refers to the same handler or to nothing, never
//! to a different handler. Only [`EventHandlers::clear`] resets indices, and
//! it expires every outstanding key.
//!
//! [`HandlerKey`]: crate::core::HandlerKey

mod cursor;
mod handler;
mod name;
mod registry;

pub use cursor::DispatchCursor;
pub use handler::{EventHandler, HandlerDefinition};
pub use name::{standardize_name, TriggerName, DYNAMIC_MARKER, NAME_SEPARATOR};
pub use registry::EventHandlers;
