use crate::wishlist::Wishlist;

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    SearchPokemon { query: String },
    LoadCard { id: u32 },
    /// Write the full collection back to storage.
    PersistWishlist(Wishlist),
}
