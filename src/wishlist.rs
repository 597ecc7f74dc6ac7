use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::pokemon::PokemonEntry;
use crate::storage::{KeyValueStore, WISHLIST_KEY};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WishlistFilter {
    #[default]
    All,
    Captured,
    Pending,
}

impl WishlistFilter {
    pub const ALL: [WishlistFilter; 3] = [
        WishlistFilter::All,
        WishlistFilter::Captured,
        WishlistFilter::Pending,
    ];

    pub fn matches(&self, entry: &PokemonEntry) -> bool {
        match self {
            WishlistFilter::All => true,
            WishlistFilter::Captured => entry.is_captured,
            WishlistFilter::Pending => !entry.is_captured,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            WishlistFilter::All => WishlistFilter::Captured,
            WishlistFilter::Captured => WishlistFilter::Pending,
            WishlistFilter::Pending => WishlistFilter::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WishlistFilter::All => "All",
            WishlistFilter::Captured => "Captured",
            WishlistFilter::Pending => "Pending",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistStats {
    pub total: usize,
    pub captured: usize,
    pub pending: usize,
}

impl WishlistStats {
    pub fn count(&self, filter: WishlistFilter) -> usize {
        match filter {
            WishlistFilter::All => self.total,
            WishlistFilter::Captured => self.captured,
            WishlistFilter::Pending => self.pending,
        }
    }
}

/// The saved pokemon, in insertion order, unique by id.
///
/// Serializes as a bare JSON array so the stored document is just the list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wishlist {
    entries: Vec<PokemonEntry>,
}

impl Wishlist {
    pub fn from_entries(entries: Vec<PokemonEntry>) -> Result<Self, Error> {
        let mut wishlist = Self::default();
        for entry in entries {
            wishlist.add(entry)?;
        }
        Ok(wishlist)
    }

    pub fn add(&mut self, entry: PokemonEntry) -> Result<&PokemonEntry, Error> {
        if self.contains(entry.id) {
            return Err(Error::DuplicateEntry { id: entry.id });
        }
        self.entries.push(entry);
        Ok(&self.entries[self.entries.len() - 1])
    }

    pub fn remove(&mut self, id: u32) -> Option<PokemonEntry> {
        let index = self.position(id)?;
        Some(self.entries.remove(index))
    }

    /// Swaps the entry for a copy with the capture flag flipped.
    pub fn toggle_captured(&mut self, id: u32) -> Option<PokemonEntry> {
        let index = self.position(id)?;
        let updated = self.entries[index].toggled();
        self.entries[index] = updated.clone();
        Some(updated)
    }

    pub fn list(&self) -> &[PokemonEntry] {
        &self.entries
    }

    pub fn filtered(&self, filter: WishlistFilter) -> Vec<&PokemonEntry> {
        self.entries
            .iter()
            .filter(|entry| filter.matches(entry))
            .collect()
    }

    pub fn get(&self, id: u32) -> Option<&PokemonEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.position(id).is_some()
    }

    pub fn id_set(&self) -> HashSet<u32> {
        self.entries.iter().map(|entry| entry.id).collect()
    }

    pub fn stats(&self) -> WishlistStats {
        let captured = self.entries.iter().filter(|entry| entry.is_captured).count();
        WishlistStats {
            total: self.entries.len(),
            captured,
            pending: self.entries.len() - captured,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Loads the saved wishlist; the flag tells whether anything was restored.
    pub fn restore(store: &dyn KeyValueStore) -> (Self, bool) {
        let Some(raw) = store.get(WISHLIST_KEY) else {
            return (Self::default(), false);
        };
        match serde_json::from_str::<Vec<PokemonEntry>>(&raw) {
            Ok(entries) => {
                let mut wishlist = Self::default();
                for entry in entries {
                    // First occurrence of an id wins.
                    if let Err(error) = wishlist.add(entry) {
                        tracing::warn!(%error, "dropping repeated entry from saved wishlist");
                    }
                }
                (wishlist, true)
            }
            Err(error) => {
                tracing::error!(%error, "error loading saved wishlist, starting empty");
                (Self::default(), false)
            }
        }
    }

    /// Best-effort write of the whole collection.
    pub fn persist(&self, store: &mut dyn KeyValueStore) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(error) => {
                tracing::warn!(%error, "failed to serialize wishlist");
                return;
            }
        };
        match store.set(WISHLIST_KEY, &json) {
            Ok(()) => tracing::debug!(entries = self.len(), "wishlist persisted"),
            Err(error) => tracing::warn!(%error, "failed to persist wishlist"),
        }
    }

    fn position(&self, id: u32) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }
}
