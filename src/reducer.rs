use chrono::Utc;
use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::catalog::PageDirection;
use crate::effect::Effect;
use crate::error::Error;
use crate::pokemon::PokemonEntry;
use crate::state::{AppState, Severity};

pub const MSG_DUPLICATE: &str = "This Pokémon is already in your list";
pub const MSG_REMOVED: &str = "Pokémon removed from the list";
pub const MSG_EMPTY_QUERY: &str = "Please enter a Pokémon name";
pub const MSG_NOT_FOUND: &str = "Pokémon not found. Check the name and try again.";
pub const MSG_SEARCH_FAILED: &str = "Error searching for the Pokémon. Try again.";
pub const MSG_CARD_FAILED: &str = "Error loading the Pokémon";

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            state.notification = None;
            if state.catalog_autoload {
                return page_catalog(state, PageDirection::Refresh);
            }
            DispatchResult::changed()
        }

        Action::FocusNext => {
            if state.search.active {
                return DispatchResult::unchanged();
            }
            state.focus_next();
            DispatchResult::changed()
        }

        Action::FocusSet(area) => {
            if state.search.active || state.focus == area {
                return DispatchResult::unchanged();
            }
            state.focus = area;
            DispatchResult::changed()
        }

        Action::WishlistSelect(index) => {
            let count = state.visible_wishlist().len();
            if count == 0 {
                return DispatchResult::unchanged();
            }
            let bounded = index.min(count - 1);
            if bounded == state.wishlist_selected {
                return DispatchResult::unchanged();
            }
            state.wishlist_selected = bounded;
            DispatchResult::changed()
        }

        Action::WishlistToggleSelected => {
            let Some(id) = state.selected_wishlist_entry().map(|entry| entry.id) else {
                return DispatchResult::unchanged();
            };
            toggle_entry(state, id)
        }

        Action::WishlistRemoveSelected => {
            let Some(id) = state.selected_wishlist_entry().map(|entry| entry.id) else {
                return DispatchResult::unchanged();
            };
            remove_entry(state, id)
        }

        Action::WishlistToggle(id) => toggle_entry(state, id),

        Action::WishlistRemove(id) => remove_entry(state, id),

        Action::FilterSet(filter) => {
            if state.filter == filter {
                return DispatchResult::unchanged();
            }
            state.filter = filter;
            state.wishlist_selected = 0;
            DispatchResult::changed()
        }

        Action::FilterNext => {
            state.filter = state.filter.next();
            state.wishlist_selected = 0;
            DispatchResult::changed()
        }

        Action::SearchStart => {
            state.search.active = true;
            state.search.query.clear();
            state.search.error = None;
            DispatchResult::changed()
        }

        Action::SearchCancel => {
            if !state.search.active
                && state.search.query.is_empty()
                && state.search.result.is_none()
                && state.search.error.is_none()
            {
                return DispatchResult::unchanged();
            }
            state.search.active = false;
            state.search.query.clear();
            state.search.result = None;
            state.search.error = None;
            DispatchResult::changed()
        }

        Action::SearchInput(ch) => {
            if !state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.query.push(ch);
            DispatchResult::changed()
        }

        Action::SearchBackspace => {
            if !state.search.active || state.search.query.pop().is_none() {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }

        Action::SearchSubmit => {
            state.search.active = false;
            let query = state.search.query.trim().to_lowercase();
            if query.is_empty() {
                state.notify(MSG_EMPTY_QUERY, Severity::Error);
                return DispatchResult::changed();
            }
            state.search.loading = true;
            state.search.error = None;
            state.search.result = None;
            DispatchResult::changed_with(Effect::SearchPokemon { query })
        }

        Action::SearchDidLoad(entry) => {
            state.search.loading = false;
            state.search.error = None;
            state.search.result = Some(entry);
            DispatchResult::changed()
        }

        Action::SearchDidError(error) => {
            state.search.loading = false;
            state.search.result = None;
            let message = if error.is_not_found() {
                MSG_NOT_FOUND
            } else {
                MSG_SEARCH_FAILED
            };
            state.search.error = Some(message.to_string());
            state.notify(message, Severity::Error);
            DispatchResult::changed()
        }

        Action::SearchAddResult => {
            let Some(entry) = state.search.result.clone() else {
                return DispatchResult::unchanged();
            };
            let result = add_entry(state, entry);
            state.search.result = None;
            state.search.query.clear();
            result
        }

        Action::CatalogPage(direction) => {
            if direction == PageDirection::Backward && !state.can_page_back() {
                return DispatchResult::unchanged();
            }
            page_catalog(state, direction)
        }

        Action::CatalogSelect(index) => {
            let count = state.catalog.ids().len();
            if count == 0 {
                return DispatchResult::unchanged();
            }
            let bounded = index.min(count - 1);
            if bounded == state.catalog_selected {
                return DispatchResult::unchanged();
            }
            state.catalog_selected = bounded;
            DispatchResult::changed()
        }

        Action::CatalogAddSelected => {
            let Some(id) = state.selected_card_id() else {
                return DispatchResult::unchanged();
            };
            let Some(entry) = state.card(id).and_then(|card| card.data()).cloned() else {
                return DispatchResult::unchanged();
            };
            let result = add_entry(state, entry);
            if state.wishlist.contains(id) && state.catalog.remove(id) {
                state.cards.remove(&id);
                state.clamp_selections();
            }
            result
        }

        Action::CardDidLoad { id, entry } => {
            if !state.catalog.contains(id) {
                tracing::debug!(id, "dropping stale card");
                return DispatchResult::unchanged();
            }
            state.cards.insert(id, DataResource::Loaded(entry));
            DispatchResult::changed()
        }

        Action::CardDidError { id, error } => {
            if !state.catalog.contains(id) {
                return DispatchResult::unchanged();
            }
            state.cards.insert(id, DataResource::Failed(error.to_string()));
            state.notify(MSG_CARD_FAILED, Severity::Error);
            DispatchResult::changed()
        }

        // Saving is best-effort; the task already logged any failure.
        Action::PersistDidComplete | Action::PersistDidError(_) => DispatchResult::unchanged(),

        Action::UiTerminalResize(width, height) => {
            state.terminal_size = (width, height);
            DispatchResult::changed()
        }

        Action::Tick => {
            state.tick = state.tick.wrapping_add(1);
            let Some(notification) = state.notification.as_mut() else {
                return DispatchResult::unchanged();
            };
            notification.ticks_remaining = notification.ticks_remaining.saturating_sub(1);
            if notification.ticks_remaining == 0 {
                state.notification = None;
                return DispatchResult::changed();
            }
            DispatchResult::unchanged()
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Entries are stamped when they join the list, not when they were fetched.
fn add_entry(state: &mut AppState, mut entry: PokemonEntry) -> DispatchResult<Effect> {
    entry.date_added = Utc::now();
    match state.wishlist.add(entry) {
        Ok(added) => {
            let message = format!("{} added to your list!", added.name);
            state.notify(message, Severity::Success);
            DispatchResult::changed_with(persist(state))
        }
        Err(Error::DuplicateEntry { .. }) => {
            state.notify(MSG_DUPLICATE, Severity::Warning);
            DispatchResult::changed()
        }
        Err(error) => {
            state.notify(error.to_string(), Severity::Error);
            DispatchResult::changed()
        }
    }
}

fn remove_entry(state: &mut AppState, id: u32) -> DispatchResult<Effect> {
    if state.wishlist.remove(id).is_none() {
        return DispatchResult::unchanged();
    }
    state.clamp_selections();
    state.notify(MSG_REMOVED, Severity::Success);
    DispatchResult::changed_with(persist(state))
}

fn toggle_entry(state: &mut AppState, id: u32) -> DispatchResult<Effect> {
    if state.wishlist.toggle_captured(id).is_none() {
        return DispatchResult::unchanged();
    }
    state.clamp_selections();
    DispatchResult::changed_with(persist(state))
}

fn persist(state: &AppState) -> Effect {
    Effect::PersistWishlist(state.wishlist.clone())
}

fn page_catalog(state: &mut AppState, direction: PageDirection) -> DispatchResult<Effect> {
    let owned = state.wishlist.id_set();
    let ids = state.catalog.navigate(direction, &owned).to_vec();
    state.cards = ids
        .iter()
        .map(|id| (*id, DataResource::Loading))
        .collect();
    state.catalog_selected = 0;
    let effects = ids.into_iter().map(|id| Effect::LoadCard { id }).collect();
    DispatchResult::changed_with_many(effects)
}
