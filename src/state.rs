use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

use crate::catalog::Catalog;
use crate::pokemon::PokemonEntry;
use crate::wishlist::{Wishlist, WishlistFilter};

pub const TICK_MS: u64 = 100;
/// Four seconds at `TICK_MS`.
pub const NOTIFICATION_TICKS: u32 = 40;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Success,
    Error,
    Warning,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub text: String,
    pub severity: Severity,
    pub ticks_remaining: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
    pub loading: bool,
    pub result: Option<PokemonEntry>,
    pub error: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FocusArea {
    Wishlist,
    Catalog,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppState {
    pub terminal_size: (u16, u16),
    pub focus: FocusArea,

    pub wishlist: Wishlist,
    pub filter: WishlistFilter,
    pub wishlist_selected: usize,

    pub catalog: Catalog,
    pub cards: HashMap<u32, DataResource<PokemonEntry>>,
    pub catalog_selected: usize,
    /// Refresh the catalog on startup.
    pub catalog_autoload: bool,

    pub search: SearchState,
    pub notification: Option<Notification>,
    pub tick: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Wishlist::default(), false)
    }
}

impl AppState {
    pub fn new(wishlist: Wishlist, catalog_autoload: bool) -> Self {
        Self {
            terminal_size: (80, 24),
            focus: FocusArea::Wishlist,
            wishlist,
            filter: WishlistFilter::All,
            wishlist_selected: 0,
            catalog: Catalog::default(),
            cards: HashMap::new(),
            catalog_selected: 0,
            catalog_autoload,
            search: SearchState::default(),
            notification: None,
            tick: 0,
        }
    }

    pub fn visible_wishlist(&self) -> Vec<&PokemonEntry> {
        self.wishlist.filtered(self.filter)
    }

    pub fn selected_wishlist_entry(&self) -> Option<&PokemonEntry> {
        self.visible_wishlist().get(self.wishlist_selected).copied()
    }

    pub fn selected_card_id(&self) -> Option<u32> {
        self.catalog.ids().get(self.catalog_selected).copied()
    }

    pub fn card(&self, id: u32) -> Option<&DataResource<PokemonEntry>> {
        self.cards.get(&id)
    }

    pub fn can_page_back(&self) -> bool {
        self.catalog.can_go_back(&self.wishlist.id_set())
    }

    pub fn notify(&mut self, text: impl Into<String>, severity: Severity) {
        self.notification = Some(Notification {
            text: text.into(),
            severity,
            ticks_remaining: NOTIFICATION_TICKS,
        });
    }

    pub fn clamp_selections(&mut self) {
        let visible = self.visible_wishlist().len();
        self.wishlist_selected = self.wishlist_selected.min(visible.saturating_sub(1));
        let cards = self.catalog.ids().len();
        self.catalog_selected = self.catalog_selected.min(cards.saturating_sub(1));
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            FocusArea::Wishlist => FocusArea::Catalog,
            FocusArea::Catalog => FocusArea::Wishlist,
        };
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        let stats = self.wishlist.stats();
        vec![
            DebugSection::new("Wishlist")
                .entry("total", ron_string(&stats.total))
                .entry("captured", ron_string(&stats.captured))
                .entry("pending", ron_string(&stats.pending))
                .entry("filter", ron_string(&self.filter))
                .entry("selected", ron_string(&self.wishlist_selected)),
            DebugSection::new("Catalog")
                .entry("min_id", ron_string(&self.catalog.min_id()))
                .entry("max_id", ron_string(&self.catalog.max_id()))
                .entry("window", ron_string(&self.catalog.ids()))
                .entry("selected", ron_string(&self.catalog_selected))
                .entry("autoload", ron_string(&self.catalog_autoload)),
            DebugSection::new("Status")
                .entry("focus", ron_string(&self.focus))
                .entry("search", ron_string(&self.search.query))
                .entry("search_active", ron_string(&self.search.active))
                .entry("search_loading", ron_string(&self.search.loading))
                .entry(
                    "notification",
                    ron_string(&self.notification.as_ref().map(|n| n.text.clone())),
                ),
        ]
    }
}
