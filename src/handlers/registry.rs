//! Event handler registry.
//!
//! The registry owns every active handler and keeps three indices over them:
//! fixed names, dynamic names and identifiers. Handlers may add or remove
//! other handlers (or themselves) while a dispatch pass is walking the
//! registry, so removal never shrinks or reorders the primary store. It
//! leaves an empty slot behind instead. Only [`EventHandlers::clear`]
//! compacts.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::core::{DuplicateIdPolicy, HandlerKey, RegistryConfig, RegistryError};

use super::cursor::DispatchCursor;
use super::handler::{EventHandler, HandlerDefinition};
use super::name::{standardize_name, TriggerName};

const LOG_TARGET: &str = "game_events::handlers";

/// Registry of active event handlers.
///
/// ## Indices
///
/// - primary store: one owning slot per handler ever added since the last
///   clear; removed handlers leave `None`
/// - name index: standardized fixed name to keys, in registration order
/// - dynamic index: keys of handlers whose names hold variables
/// - identifier index: id to key, checked for liveness on every read
///
/// Every key in the name and dynamic indices refers to an occupied slot, and
/// every occupied slot is listed in at least one of them.
///
/// ## Example
///
/// ```
/// use game_events::handlers::{EventHandlers, HandlerDefinition};
///
/// let mut handlers = EventHandlers::new();
/// let key = handlers
///     .add_event_handler(HandlerDefinition::new("turn 3").with_id("h1"), (), false)
///     .unwrap();
///
/// assert_eq!(handlers.get("Turn 3"), [key]);
/// assert_eq!(handlers.get_event_handler_by_id("h1").unwrap().key(), key);
///
/// handlers.remove_event_handler("h1");
/// assert!(handlers.get("turn 3").is_empty());
/// assert!(handlers.get_event_handler_by_id("h1").is_none());
/// assert_eq!(handlers.len(), 1); // tombstoned, not shrunk
/// ```
#[derive(Clone, Debug)]
pub struct EventHandlers<C = ()> {
    /// Owning slots. Never shrinks except in `clear`.
    active: Vec<Option<EventHandler<C>>>,

    /// Fixed-name handlers by standardized name.
    by_name: FxHashMap<String, Vec<HandlerKey>>,

    /// Handlers with variables in their event names.
    dynamic: Vec<HandlerKey>,

    /// Quick lookup by id. Non-owning.
    id_map: FxHashMap<String, HandlerKey>,

    /// Bumped on every clear so keys from before it expire.
    generation: u32,

    config: RegistryConfig,
}

impl<C> Default for EventHandlers<C> {
    fn default() -> Self {
        Self::with_config(RegistryConfig::default())
    }
}

impl<C> EventHandlers<C> {
    /// Create an empty registry with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with a custom configuration.
    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            active: Vec::with_capacity(config.initial_capacity),
            by_name: FxHashMap::default(),
            dynamic: Vec::new(),
            id_map: FxHashMap::default(),
            generation: 0,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Current registry epoch.
    #[must_use]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Add an event handler built from `definition`.
    ///
    /// The handler gets a new slot at the end of the primary store and is
    /// filed under each of its fixed names, or in the dynamic index. A
    /// non-empty id is installed in the identifier index; collisions with a
    /// live handler follow [`RegistryConfig::duplicate_ids`].
    pub fn add_event_handler(
        &mut self,
        definition: HandlerDefinition,
        context: C,
        is_menu_item: bool,
    ) -> Result<HandlerKey, RegistryError> {
        if !definition.id.is_empty() {
            if let Some(existing) = self.live_key_for(&definition.id) {
                let policy = self.config.duplicate_ids;
                match policy {
                    DuplicateIdPolicy::Replace => {
                        warn!(
                            target: LOG_TARGET,
                            id = %definition.id,
                            previous = %existing,
                            "event handler id already in use, newest registration wins"
                        );
                    }
                    DuplicateIdPolicy::Reject => {
                        warn!(
                            target: LOG_TARGET,
                            id = %definition.id,
                            existing = %existing,
                            "ignoring event handler with duplicate id"
                        );
                        return Err(RegistryError::DuplicateId { id: definition.id });
                    }
                    DuplicateIdPolicy::Evict => {
                        debug!(
                            target: LOG_TARGET,
                            id = %definition.id,
                            evicted = %existing,
                            "replacing event handler with duplicate id"
                        );
                        self.remove(existing);
                    }
                }
            }
        }

        let key = HandlerKey::new(self.active.len() as u32, self.generation);
        let handler = EventHandler::new(key, definition, context, is_menu_item);

        match handler.trigger() {
            TriggerName::Dynamic(_) => self.dynamic.push(key),
            TriggerName::Fixed(names) => {
                for name in names {
                    self.by_name.entry(name.clone()).or_default().push(key);
                }
            }
        }

        if handler.has_id() {
            self.id_map.insert(handler.id().to_owned(), key);
        }

        trace!(
            target: LOG_TARGET,
            %key,
            name = handler.name(),
            id = handler.id(),
            menu_item = is_menu_item,
            "added event handler"
        );

        self.active.push(Some(handler));
        Ok(key)
    }

    /// Remove the live handler registered under `id`.
    ///
    /// Unknown or already removed ids are a no-op. Returns the removed
    /// handler so the caller decides when it is dropped.
    pub fn remove_event_handler(&mut self, id: &str) -> Option<EventHandler<C>> {
        let Some(key) = self.live_key_for(id) else {
            trace!(target: LOG_TARGET, id, "no live event handler to remove");
            return None;
        };
        self.remove(key)
    }

    /// Remove the handler behind `key`.
    ///
    /// Its slot becomes a tombstone at the same index. Expired keys are a no-op.
    pub fn remove(&mut self, key: HandlerKey) -> Option<EventHandler<C>> {
        if key.generation() != self.generation {
            return None;
        }
        let handler = self.active.get_mut(key.index())?.take()?;

        match handler.trigger() {
            TriggerName::Dynamic(_) => self.dynamic.retain(|&k| k != key),
            TriggerName::Fixed(names) => {
                for name in names {
                    if let Some(list) = self.by_name.get_mut(name.as_str()) {
                        list.retain(|&k| k != key);
                        if list.is_empty() {
                            self.by_name.remove(name.as_str());
                        }
                    }
                }
            }
        }

        // A newer handler may have taken over the id.
        if handler.has_id() && self.id_map.get(handler.id()) == Some(&key) {
            self.id_map.remove(handler.id());
        }

        trace!(
            target: LOG_TARGET,
            %key,
            name = handler.name(),
            id = handler.id(),
            "removed event handler"
        );

        Some(handler)
    }

    /// Get the live handler registered under `id`.
    #[must_use]
    pub fn get_event_handler_by_id(&self, id: &str) -> Option<&EventHandler<C>> {
        self.handler(*self.id_map.get(id)?)
    }

    /// Get the live handler registered under `id`, mutably.
    pub fn get_event_handler_by_id_mut(&mut self, id: &str) -> Option<&mut EventHandler<C>> {
        let key = *self.id_map.get(id)?;
        self.handler_mut(key)
    }

    fn live_key_for(&self, id: &str) -> Option<HandlerKey> {
        let key = *self.id_map.get(id)?;
        self.is_live(key).then_some(key)
    }

    /// Resolve a key to its handler, if it has not been removed or cleared.
    #[must_use]
    pub fn handler(&self, key: HandlerKey) -> Option<&EventHandler<C>> {
        if key.generation() != self.generation {
            return None;
        }
        self.active.get(key.index())?.as_ref()
    }

    /// Resolve a key to its handler, mutably.
    pub fn handler_mut(&mut self, key: HandlerKey) -> Option<&mut EventHandler<C>> {
        if key.generation() != self.generation {
            return None;
        }
        self.active.get_mut(key.index())?.as_mut()
    }

    #[must_use]
    pub fn is_live(&self, key: HandlerKey) -> bool {
        self.handler(key).is_some()
    }

    /// Mark a live handler disabled. Returns `false` for expired keys.
    pub fn disable(&mut self, key: HandlerKey) -> bool {
        match self.handler_mut(key) {
            Some(handler) => {
                handler.disable();
                true
            }
            None => false,
        }
    }

    /// Handlers with variables in their event names.
    #[must_use]
    pub fn get_dynamic(&self) -> &[HandlerKey] {
        &self.dynamic
    }

    /// Handlers with a fixed event name, by name.
    ///
    /// The name is standardized first. Unknown names give an empty slice.
    #[must_use]
    pub fn get(&self, name: &str) -> &[HandlerKey] {
        match self.by_name.get(standardize_name(name).as_str()) {
            Some(list) => list,
            None => &[],
        }
    }

    /// Resolved view of [`get`](Self::get).
    pub fn handlers_named<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a EventHandler<C>> + 'a {
        self.get(name).iter().filter_map(move |&key| self.handler(key))
    }

    /// Resolved view of [`get_dynamic`](Self::get_dynamic).
    pub fn dynamic_handlers(&self) -> impl Iterator<Item = &EventHandler<C>> + '_ {
        self.dynamic.iter().filter_map(move |&key| self.handler(key))
    }

    /// Every handler that may fire for `name`: its fixed bucket plus all
    /// dynamic handlers, in registration order.
    ///
    /// The snapshot does not borrow the registry, so a dispatch pass can
    /// mutate it while walking the keys. Keys removed in the meantime no
    /// longer resolve. Dynamic entries still need pattern matching by the
    /// caller.
    #[must_use]
    pub fn candidates(&self, name: &str) -> SmallVec<[HandlerKey; 8]> {
        let mut keys: SmallVec<[HandlerKey; 8]> = SmallVec::new();
        keys.extend_from_slice(self.get(name));
        keys.extend_from_slice(&self.dynamic);
        keys.sort_unstable();
        keys
    }

    /// Number of primary-store slots, tombstones included.
    ///
    /// This is the valid index range for [`slot`](Self::slot) and indexing.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Check if the primary store has no slots at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.active.iter().filter(|slot| slot.is_some()).count()
    }

    /// Iterate all slots, tombstones included.
    pub fn iter(&self) -> std::slice::Iter<'_, Option<EventHandler<C>>> {
        self.active.iter()
    }

    /// Iterate live handlers in registration order.
    pub fn iter_live(&self) -> impl Iterator<Item = &EventHandler<C>> + '_ {
        self.active.iter().flatten()
    }

    /// Handler in slot `index`, or `None` for tombstones and out-of-range indices.
    #[must_use]
    pub fn slot(&self, index: usize) -> Option<&EventHandler<C>> {
        self.active.get(index)?.as_ref()
    }

    pub fn slot_mut(&mut self, index: usize) -> Option<&mut EventHandler<C>> {
        self.active.get_mut(index)?.as_mut()
    }

    /// Start a dispatch pass over the current slots.
    #[must_use]
    pub fn cursor(&self) -> DispatchCursor {
        DispatchCursor::new(self)
    }

    /// Drop every handler and index entry.
    ///
    /// Slot indices start over at zero and every outstanding key expires.
    pub fn clear(&mut self) {
        debug!(
            target: LOG_TARGET,
            slots = self.active.len(),
            live = self.live_count(),
            "clearing event handlers"
        );

        self.active.clear();
        self.by_name.clear();
        self.dynamic.clear();
        self.id_map.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    /// Log every live handler at debug level.
    pub fn log_handlers(&self) {
        debug!(
            target: LOG_TARGET,
            slots = self.active.len(),
            live = self.live_count(),
            names = self.by_name.len(),
            dynamic = self.dynamic.len(),
            "active event handlers"
        );

        for (index, slot) in self.active.iter().enumerate() {
            let Some(handler) = slot else {
                continue;
            };
            debug!(
                target: LOG_TARGET,
                index,
                name = handler.name(),
                id = handler.id(),
                dynamic = handler.is_dynamic(),
                menu_item = handler.is_menu_item(),
                "event handler"
            );
        }
    }
}

impl<C> std::ops::Index<usize> for EventHandlers<C> {
    type Output = Option<EventHandler<C>>;

    /// Slot view, tombstones included. Panics if `index >= len()`.
    fn index(&self, index: usize) -> &Self::Output {
        &self.active[index]
    }
}

impl<'a, C> IntoIterator for &'a EventHandlers<C> {
    type Item = &'a Option<EventHandler<C>>;
    type IntoIter = std::slice::Iter<'a, Option<EventHandler<C>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.active.iter()
    }
}
