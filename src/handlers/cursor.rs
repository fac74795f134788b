//! Detached dispatch cursor.
//!
//! A dispatch pass runs handlers, and handlers mutate the registry. A
//! borrowing iterator cannot survive that, so the cursor only remembers a
//! slot position and is handed the registry again at every step.

use crate::core::HandlerKey;

use super::registry::EventHandlers;

/// Forward cursor over the primary store.
///
/// The pass covers the slots that existed when the cursor was created;
/// handlers added during the pass wait for the next one. Tombstones are
/// skipped, including slots emptied after the cursor started. If the
/// registry is cleared the cursor is exhausted.
///
/// ```
/// use game_events::handlers::{EventHandlers, HandlerDefinition};
///
/// let mut handlers = EventHandlers::new();
/// handlers.add_event_handler(HandlerDefinition::new("die").with_id("a"), (), false).unwrap();
/// handlers.add_event_handler(HandlerDefinition::new("die").with_id("b"), (), false).unwrap();
///
/// let mut cursor = handlers.cursor();
/// let mut fired = Vec::new();
/// while let Some(key) = cursor.advance(&handlers) {
///     let id = handlers.handler(key).unwrap().id().to_owned();
///     // "a" removes "b" before it gets a turn.
///     if id == "a" {
///         handlers.remove_event_handler("b");
///     }
///     fired.push(id);
/// }
/// assert_eq!(fired, ["a"]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DispatchCursor {
    next: usize,
    end: usize,
    generation: u32,
}

impl DispatchCursor {
    /// Start a pass over the registry's current slots.
    #[must_use]
    pub fn new<C>(handlers: &EventHandlers<C>) -> Self {
        Self {
            next: 0,
            end: handlers.len(),
            generation: handlers.generation(),
        }
    }

    /// Step to the next live handler.
    pub fn advance<C>(&mut self, handlers: &EventHandlers<C>) -> Option<HandlerKey> {
        if handlers.generation() != self.generation {
            self.next = self.end;
            return None;
        }

        while self.next < self.end {
            let index = self.next;
            self.next += 1;
            if let Some(handler) = handlers.slot(index) {
                return Some(handler.key());
            }
        }
        None
    }

    /// Index of the next slot to inspect.
    #[must_use]
    pub fn position(&self) -> usize {
        self.next
    }

    /// Slots left to inspect in this pass, tombstones included.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.end - self.next
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.next >= self.end
    }
}
