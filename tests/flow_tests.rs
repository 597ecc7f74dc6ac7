//! End-to-end reducer flows through EffectStore and EffectStoreTestHarness.

use chrono::{TimeZone, Utc};
use tui_dispatch::testing::*;
use tui_dispatch::{assert_emitted, assert_not_emitted, EffectStore, NumericComponentId};

use pokewish::action::Action;
use pokewish::catalog::{PageDirection, PAGE_SIZE};
use pokewish::components::{CatalogPanel, CatalogPanelProps, Component};
use pokewish::effect::Effect;
use pokewish::error::Error;
use pokewish::pokemon::PokemonEntry;
use pokewish::reducer::{reducer, MSG_DUPLICATE, MSG_NOT_FOUND};
use pokewish::state::{AppState, Severity, NOTIFICATION_TICKS};
use pokewish::storage::{self, FileStore, KeyValueStore, WISHLIST_KEY};
use pokewish::wishlist::Wishlist;

fn mon(id: u32, name: &str) -> PokemonEntry {
    PokemonEntry {
        id,
        name: name.into(),
        image: format!("https://img/{id}.png"),
        types: vec!["normal".into()],
        height: 5,
        weight: 50,
        is_captured: false,
        date_added: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    }
}

fn owned_through(last: u32) -> Wishlist {
    Wishlist::from_entries((1..=last).map(|id| mon(id, &format!("mon{id}"))).collect()).unwrap()
}

fn persisted(effects: &[Effect]) -> Option<&Wishlist> {
    effects.iter().find_map(|effect| match effect {
        Effect::PersistWishlist(wishlist) => Some(wishlist),
        _ => None,
    })
}

#[test]
fn test_search_then_add_persists() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::SearchStart);
    for ch in " Pikachu ".chars() {
        harness.dispatch_collect(Action::SearchInput(ch));
    }
    harness.dispatch_collect(Action::SearchSubmit);
    harness.assert_state(|s| s.search.loading && !s.search.active);

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(
        |e| matches!(e, Effect::SearchPokemon { query } if query == "pikachu"),
    );

    harness.complete_action(Action::SearchDidLoad(mon(25, "pikachu")));
    let (changed, total) = harness.process_emitted();
    assert_eq!((changed, total), (1, 1));
    harness.assert_state(|s| s.search.result.as_ref().map(|e| e.id) == Some(25));

    harness.dispatch_collect(Action::SearchAddResult);
    harness.assert_state(|s| s.wishlist.contains(25) && s.search.result.is_none());
    harness.assert_state(|s| {
        s.notification.as_ref().map(|n| n.text.as_str()) == Some("pikachu added to your list!")
    });

    let effects = harness.drain_effects();
    let saved = persisted(&effects).expect("persist effect");
    assert_eq!(saved.len(), 1);
}

#[test]
fn test_duplicate_add_warns_without_persist() {
    let wishlist = Wishlist::from_entries(vec![mon(25, "pikachu")]).unwrap();
    let mut store = EffectStore::new(AppState::new(wishlist, false), reducer);

    store.dispatch(Action::SearchDidLoad(mon(25, "pikachu")));
    let result = store.dispatch(Action::SearchAddResult);

    assert!(result.effects.is_empty());
    assert_eq!(store.state().wishlist.len(), 1);
    let notification = store.state().notification.as_ref().unwrap();
    assert_eq!(notification.text, MSG_DUPLICATE);
    assert_eq!(notification.severity, Severity::Warning);
}

#[test]
fn test_search_not_found_message() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::SearchStart);
    store.dispatch(Action::SearchInput('x'));
    store.dispatch(Action::SearchSubmit);
    store.dispatch(Action::SearchDidError(Error::NotFound("x".into())));

    assert!(!store.state().search.loading);
    assert_eq!(store.state().search.error.as_deref(), Some(MSG_NOT_FOUND));
    assert_eq!(
        store.state().notification.as_ref().map(|n| n.severity),
        Some(Severity::Error)
    );
}

#[test]
fn test_autoload_pages_past_owned_prefix() {
    let mut store = EffectStore::new(AppState::new(owned_through(19), true), reducer);

    let result = store.dispatch(Action::Init);

    assert_eq!(result.effects.len(), PAGE_SIZE);
    assert_eq!(result.effects[0], Effect::LoadCard { id: 20 });
    assert_eq!(store.state().catalog.ids(), (20..40).collect::<Vec<_>>());
    assert!(store.state().cards.values().all(|card| card.is_loading()));
    // Everything below 20 is owned, so there is nowhere to go back to.
    assert!(!store.state().can_page_back());
}

#[test]
fn test_no_autoload_on_first_run() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    let result = store.dispatch(Action::Init);

    assert!(result.effects.is_empty());
    assert!(store.state().catalog.is_empty());
}

#[test]
fn test_catalog_add_removes_card_and_persists() {
    let mut harness = EffectStoreTestHarness::new(AppState::new(owned_through(19), true), reducer);
    harness.dispatch_collect(Action::Init);
    harness.drain_effects();

    harness.complete_action(Action::CardDidLoad {
        id: 20,
        entry: mon(20, "raticate"),
    });
    harness.process_emitted();
    harness.assert_state(|s| s.card(20).is_some_and(|card| card.is_loaded()));

    harness.dispatch_collect(Action::CatalogAddSelected);

    harness.assert_state(|s| s.wishlist.contains(20));
    harness.assert_state(|s| !s.catalog.contains(20) && s.catalog.ids().len() == PAGE_SIZE - 1);
    harness.assert_state(|s| s.selected_card_id() == Some(21));
    let effects = harness.drain_effects();
    assert_eq!(persisted(&effects).map(|w| w.len()), Some(20));
}

#[test]
fn test_stale_cards_are_dropped_after_paging() {
    let mut store = EffectStore::new(AppState::new(Wishlist::default(), true), reducer);
    store.dispatch(Action::Init);
    store.dispatch(Action::CatalogPage(PageDirection::Forward));
    assert_eq!(store.state().catalog.ids()[0], 21);

    let stale = store.dispatch(Action::CardDidLoad {
        id: 3,
        entry: mon(3, "venusaur"),
    });
    let failed_stale = store.dispatch(Action::CardDidError {
        id: 4,
        error: Error::FetchFailed("timeout".into()),
    });

    assert!(!stale.changed);
    assert!(!failed_stale.changed);
    assert!(store.state().card(3).is_none());
    assert!(store.state().notification.is_none());
}

#[test]
fn test_back_is_blocked_at_frontier() {
    let mut store = EffectStore::new(AppState::new(Wishlist::default(), true), reducer);
    store.dispatch(Action::Init);

    let result = store.dispatch(Action::CatalogPage(PageDirection::Backward));

    assert!(!result.changed);
    assert!(result.effects.is_empty());
    assert_eq!(store.state().catalog.min_id(), 1);
}

#[test]
fn test_notification_expires() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    store.dispatch(Action::SearchStart);
    store.dispatch(Action::SearchSubmit);
    assert!(store.state().notification.is_some());

    for _ in 0..NOTIFICATION_TICKS - 1 {
        store.dispatch(Action::Tick);
    }
    assert!(store.state().notification.is_some());
    store.dispatch(Action::Tick);
    assert!(store.state().notification.is_none());
}

#[test]
fn test_toggle_and_remove_emit_persist() {
    let wishlist = Wishlist::from_entries(vec![mon(1, "bulbasaur"), mon(4, "charmander")]).unwrap();
    let mut store = EffectStore::new(AppState::new(wishlist, false), reducer);

    let toggled = store.dispatch(Action::WishlistToggleSelected);
    assert!(store.state().wishlist.get(1).unwrap().is_captured);
    assert!(matches!(toggled.effects.as_slice(), [Effect::PersistWishlist(_)]));

    let removed = store.dispatch(Action::WishlistRemove(4));
    assert!(!store.state().wishlist.contains(4));
    assert_eq!(persisted(&removed.effects).map(|w| w.len()), Some(1));

    let missing = store.dispatch(Action::WishlistRemove(99));
    assert!(missing.effects.is_empty());
}

#[test]
fn test_persisted_snapshot_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = EffectStore::new(AppState::default(), reducer);
    store.dispatch(Action::SearchDidLoad(mon(7, "squirtle")));
    let result = store.dispatch(Action::SearchAddResult);

    let mut files = FileStore::new(dir.path());
    persisted(&result.effects).unwrap().persist(&mut files);
    assert!(files.get(WISHLIST_KEY).is_some());

    let boot = storage::bootstrap(&mut FileStore::new(dir.path()));
    assert_eq!(&boot.wishlist, &store.state().wishlist);
    assert!(boot.catalog_autoload);
}

#[test]
fn test_repeated_saved_id_keeps_rest_of_list() {
    let dir = tempfile::tempdir().unwrap();
    let mut files = FileStore::new(dir.path());
    let saved = serde_json::to_string(&vec![mon(1, "bulbasaur"), mon(2, "ivysaur"), mon(1, "copy")])
        .unwrap();
    files.set(WISHLIST_KEY, &saved).unwrap();

    let boot = storage::bootstrap(&mut files);
    let mut store = EffectStore::new(AppState::new(boot.wishlist, boot.catalog_autoload), reducer);
    store.dispatch(Action::SearchDidLoad(mon(9, "wartortle")));
    let result = store.dispatch(Action::SearchAddResult);

    let ids: Vec<u32> = persisted(&result.effects)
        .unwrap()
        .list()
        .iter()
        .map(|entry| entry.id)
        .collect();
    assert_eq!(ids, vec![1, 2, 9]);
    assert_eq!(store.state().wishlist.get(1).unwrap().name, "bulbasaur");
}

#[test]
fn test_catalog_keys_drive_paging() {
    let mut harness = EffectStoreTestHarness::new(AppState::new(Wishlist::default(), true), reducer);
    harness.dispatch_collect(Action::Init);
    harness.drain_effects();
    let mut panel = CatalogPanel::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("n p", |state, event| {
        let props = CatalogPanelProps {
            ids: state.catalog.ids(),
            cards: &state.cards,
            selected: state.catalog_selected,
            can_page_back: state.can_page_back(),
            is_focused: true,
        };
        panel
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    // First page starts at the frontier, so "p" yields nothing.
    actions.assert_count(1);
    assert_emitted!(actions, Action::CatalogPage(PageDirection::Forward));
    assert_not_emitted!(actions, Action::CatalogPage(PageDirection::Backward));

    for action in actions {
        harness.dispatch_collect(action);
    }
    harness.assert_state(|s| s.catalog.min_id() == 21 && s.can_page_back());
}

#[test]
fn test_action_categories() {
    let did_load = Action::SearchDidLoad(mon(1, "bulbasaur"));
    assert_eq!(did_load.category(), Some("search_did"));
    assert!(did_load.is_search_did());
    assert_eq!(Action::Tick.category(), None);
}
