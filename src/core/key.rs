//! Handler handles.
//!
//! The primary store owns every handler. Everything else (the name index,
//! the dynamic index, the identifier index, callers holding on to a handler
//! across a dispatch pass) refers to it through a [`HandlerKey`].
//!
//! ## Key Layout
//!
//! - `index`: the primary-store slot. Slots are append-only, so an index
//!   never moves and is never handed to a different handler.
//! - `generation`: the registry epoch the key was minted in. Clearing the
//!   registry bumps the epoch, which is the only time slot indices restart.
//!
//! A key therefore resolves iff its generation is current and its slot is
//! still occupied.
//!
//! ```
//! use game_events::core::HandlerKey;
//!
//! let key = HandlerKey::new(3, 0);
//! assert_eq!(key.index(), 3);
//! assert_eq!(key.generation(), 0);
//! assert_eq!(format!("{}", key), "Handler(3@0)");
//! ```

/// Non-owning reference to a primary-store slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandlerKey {
    index: u32,
    generation: u32,
}

impl HandlerKey {
    /// Create a key for a slot in a given generation.
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot position in the primary store.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.index as usize
    }

    /// Registry epoch this key belongs to.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl std::fmt::Display for HandlerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Handler({}@{})", self.index, self.generation)
    }
}
