use serde::{Deserialize, Serialize};

use crate::catalog::PageDirection;
use crate::error::Error;
use crate::pokemon::PokemonEntry;
use crate::state::FocusArea;
use crate::wishlist::WishlistFilter;

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(infer_categories)]
pub enum Action {
    Init,

    FocusNext,
    FocusSet(FocusArea),

    WishlistSelect(usize),
    WishlistToggleSelected,
    WishlistRemoveSelected,
    WishlistToggle(u32),
    WishlistRemove(u32),

    FilterSet(WishlistFilter),
    FilterNext,

    SearchStart,
    SearchCancel,
    SearchSubmit,
    SearchInput(char),
    SearchBackspace,
    SearchDidLoad(PokemonEntry),
    SearchDidError(Error),
    SearchAddResult,

    CatalogPage(PageDirection),
    CatalogSelect(usize),
    CatalogAddSelected,
    CardDidLoad { id: u32, entry: PokemonEntry },
    CardDidError { id: u32, error: Error },

    PersistDidComplete,
    PersistDidError(Error),

    UiTerminalResize(u16, u16),
    Tick,
    Quit,
}
