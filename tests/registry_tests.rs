//! Registry integration tests.
//!
//! These tests drive the registry the way a dispatch loop does: handlers
//! added and removed mid-pass, lookups by name and id, bulk resets.

use game_events::{
    DuplicateIdPolicy, EventHandlers, HandlerDefinition, HandlerKey, RegistryConfig,
};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn add(handlers: &mut EventHandlers, definition: HandlerDefinition) -> HandlerKey {
    handlers.add_event_handler(definition, (), false).unwrap()
}

/// Add a handler with an id and a fixed name, find it both ways.
#[test]
fn test_lookup_by_name_and_id() {
    let mut handlers = EventHandlers::new();

    let key = add(&mut handlers, HandlerDefinition::new("turn 3").with_id("h1"));

    assert_eq!(handlers.get("turn 3").len(), 1);
    assert_eq!(handlers.get("turn 3")[0], key);
    let found = handlers.get_event_handler_by_id("h1").expect("h1 should resolve");
    assert_eq!(found.key(), key);
    assert_eq!(found.name(), "turn 3");
}

/// Handlers sharing a name come back in registration order.
#[test]
fn test_shared_name_registration_order() {
    let mut handlers = EventHandlers::new();

    let first = add(&mut handlers, HandlerDefinition::new("die"));
    let second = add(&mut handlers, HandlerDefinition::new("die"));

    assert_eq!(handlers.get("die"), [first, second]);
    let keys: Vec<_> = handlers.handlers_named("die").map(|h| h.key()).collect();
    assert_eq!(keys, vec![first, second]);
}

/// Removing a dynamic handler tombstones its slot without shrinking the store.
#[test]
fn test_remove_dynamic_tombstones() {
    let mut handlers = EventHandlers::new();

    add(&mut handlers, HandlerDefinition::new("prestart"));
    add(&mut handlers, HandlerDefinition::new("turn $turn_number").with_id("dyn"));
    let size_before = handlers.len();

    handlers.remove_event_handler("dyn");

    assert!(handlers.get_dynamic().is_empty());
    assert_eq!(handlers.len(), size_before);
    assert!(handlers[1].is_none());
    assert!(handlers[0].is_some());
}

/// Bulk reset empties every index and expires every id.
#[test]
fn test_clear_resets_everything() {
    init_logging();
    let mut handlers = EventHandlers::new();

    add(&mut handlers, HandlerDefinition::new("die").with_id("a"));
    add(&mut handlers, HandlerDefinition::new("moveto, attack").with_id("b"));
    add(&mut handlers, HandlerDefinition::new("side $side turn").with_id("c"));
    handlers.log_handlers();

    handlers.clear();

    assert_eq!(handlers.len(), 0);
    assert!(handlers.get_dynamic().is_empty());
    for name in ["die", "moveto", "attack"] {
        assert!(handlers.get(name).is_empty(), "bucket {} should be empty", name);
    }
    for id in ["a", "b", "c"] {
        assert!(handlers.get_event_handler_by_id(id).is_none(), "id {} should expire", id);
    }
}

/// A handler that removes itself and registers a follow-up while a pass runs.
#[test]
fn test_dispatch_with_self_removal_and_addition() {
    init_logging();
    let mut handlers = EventHandlers::new();

    add(&mut handlers, HandlerDefinition::new("moveto").with_id("ambush"));
    add(&mut handlers, HandlerDefinition::new("moveto").with_id("trap").repeatable());
    add(&mut handlers, HandlerDefinition::new("die").with_id("other"));

    let mut fired = Vec::new();
    let mut cursor = handlers.cursor();
    while let Some(key) = cursor.advance(&handlers) {
        let Some(handler) = handlers.handler(key) else {
            continue;
        };
        if !handler.trigger().lists("moveto") {
            continue;
        }
        let once = handler.first_time_only();
        let id = handler.id().to_owned();
        fired.push(id.clone());

        if once {
            handlers.remove_event_handler(&id);
            handlers
                .add_event_handler(HandlerDefinition::new("moveto").with_id("reinforcements"), (), false)
                .unwrap();
        }
    }

    // The follow-up waits for the next pass.
    assert_eq!(fired, vec!["ambush", "trap"]);
    assert_eq!(handlers.len(), 4);
    assert!(handlers.get_event_handler_by_id("ambush").is_none());

    let names: Vec<_> = handlers.handlers_named("moveto").map(|h| h.id().to_owned()).collect();
    assert_eq!(names, vec!["trap", "reinforcements"]);
}

/// One handler removes a later one before the pass reaches it.
#[test]
fn test_dispatch_removal_of_later_handler() {
    let mut handlers = EventHandlers::new();

    add(&mut handlers, HandlerDefinition::new("victory").with_id("first"));
    add(&mut handlers, HandlerDefinition::new("victory").with_id("second"));
    add(&mut handlers, HandlerDefinition::new("victory").with_id("third"));

    let mut fired = Vec::new();
    for key in handlers.candidates("victory") {
        let Some(handler) = handlers.handler(key) else {
            continue;
        };
        fired.push(handler.id().to_owned());
        if handler.id() == "first" {
            handlers.remove_event_handler("second");
        }
    }

    assert_eq!(fired, vec!["first", "third"]);
}

/// Indices captured before a removal survive it.
#[test]
fn test_captured_index_survives_removal() {
    let mut handlers = EventHandlers::new();

    for i in 0..5 {
        add(&mut handlers, HandlerDefinition::new("turn 1").with_id(format!("h{}", i)));
    }
    let captured: Vec<_> = (0..handlers.len())
        .map(|i| handlers.slot(i).map(|h| h.key()))
        .collect();

    handlers.remove_event_handler("h1");
    handlers.remove_event_handler("h3");

    assert_eq!(handlers.len(), 5);
    for (i, before) in captured.iter().enumerate() {
        match handlers.slot(i) {
            Some(handler) => assert_eq!(Some(handler.key()), *before),
            None => assert!(i == 1 || i == 3),
        }
    }
}

/// Menu items share the indices with automatic handlers; callers filter.
#[test]
fn test_menu_items_filtered_by_caller() {
    let mut handlers = EventHandlers::new();

    handlers
        .add_event_handler(HandlerDefinition::new("menu item heal").with_id("heal"), (), true)
        .unwrap();
    add(&mut handlers, HandlerDefinition::new("menu item heal"));

    let menu: Vec<_> = handlers
        .handlers_named("menu item heal")
        .filter(|h| h.is_menu_item())
        .map(|h| h.id())
        .collect();
    assert_eq!(menu, vec!["heal"]);
    assert_eq!(handlers.get("menu_item_heal").len(), 2);
}

/// Disabled handlers stay indexed until removed.
#[test]
fn test_disabled_handler_stays_indexed() {
    let mut handlers = EventHandlers::new();

    let key = add(&mut handlers, HandlerDefinition::new("attack end").with_id("x"));
    handlers.get_event_handler_by_id_mut("x").unwrap().disable();

    assert_eq!(handlers.get("attack end"), [key]);
    assert!(handlers.handler(key).unwrap().is_disabled());
}

/// Registry configured from TOML.
#[test]
fn test_registry_from_toml_config() {
    let config = RegistryConfig::from_toml_str("duplicate_ids = \"evict\"").unwrap();
    let mut handlers: EventHandlers = EventHandlers::with_config(config);
    assert_eq!(handlers.config().duplicate_ids, DuplicateIdPolicy::Evict);

    let old = add(&mut handlers, HandlerDefinition::new("die").with_id("boss"));
    let new = add(&mut handlers, HandlerDefinition::new("die").with_id("boss"));

    assert!(!handlers.is_live(old));
    assert_eq!(handlers.get_event_handler_by_id("boss").unwrap().key(), new);
    assert_eq!(handlers.live_count(), 1);
}

/// Owner context is handed back untouched.
#[test]
fn test_owner_context() {
    #[derive(Debug, PartialEq)]
    struct Scenario {
        name: &'static str,
    }

    let mut handlers: EventHandlers<std::rc::Rc<Scenario>> = EventHandlers::new();
    let scenario = std::rc::Rc::new(Scenario { name: "heir_to_the_throne" });

    let key = handlers
        .add_event_handler(HandlerDefinition::new("start"), scenario.clone(), false)
        .unwrap();
    assert_eq!(std::rc::Rc::strong_count(&scenario), 2);

    assert_eq!(handlers.handler(key).unwrap().context().name, "heir_to_the_throne");

    // Removing the handler releases what it owned.
    drop(handlers.remove(key));
    assert_eq!(std::rc::Rc::strong_count(&scenario), 1);
}
