//! Catalog paginator: pages of pokemon ids the user does not own yet

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

pub const PAGE_SIZE: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageDirection {
    Forward,
    Backward,
    Refresh,
}

/// Up to `PAGE_SIZE` unowned ids, strictly ascending.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogWindow {
    ids: Vec<u32>,
}

impl CatalogWindow {
    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    pub fn min_id(&self) -> Option<u32> {
        self.ids.first().copied()
    }

    pub fn max_id(&self) -> Option<u32> {
        self.ids.last().copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Walks the id space from the cursor implied by `direction`, skipping owned ids.
///
/// The window comes back short only when the scan runs off the top of the id space.
///
/// Reaching id 0 resets the cursor to 1 and switches the scan to ascending,
/// so a backward page near the origin fills up with the lowest unowned ids.
pub fn compute_window(
    direction: PageDirection,
    owned: &HashSet<u32>,
    current_min: u32,
    current_max: u32,
) -> CatalogWindow {
    let mut id = match direction {
        PageDirection::Forward => current_max.saturating_add(1),
        PageDirection::Backward => current_min.saturating_sub(1),
        PageDirection::Refresh => current_min,
    };
    let mut descending = direction == PageDirection::Backward;
    let mut collected = BTreeSet::new();

    while collected.len() < PAGE_SIZE {
        if id == 0 {
            id = 1;
            descending = false;
            continue;
        }
        if !owned.contains(&id) {
            collected.insert(id);
        }
        id = if descending {
            id - 1
        } else {
            match id.checked_add(1) {
                Some(next) => next,
                None => break,
            }
        };
    }

    CatalogWindow {
        ids: collected.into_iter().collect(),
    }
}

/// Smallest positive id not in `owned`.
pub fn frontier(owned: &HashSet<u32>) -> u32 {
    let mut id = 1;
    while owned.contains(&id) {
        id += 1;
    }
    id
}

/// The window currently on screen together with its cursors.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    window: CatalogWindow,
    min_id: u32,
    max_id: u32,
}

impl Catalog {
    pub fn navigate(&mut self, direction: PageDirection, owned: &HashSet<u32>) -> &[u32] {
        let window = compute_window(direction, owned, self.min_id, self.max_id);
        self.min_id = window.min_id().unwrap_or(self.min_id);
        self.max_id = window.max_id().unwrap_or(self.max_id);
        self.window = window;
        self.window.ids()
    }

    /// Drops one id from the window; the cursors stay where they were.
    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.window.ids.len();
        self.window.ids.retain(|existing| *existing != id);
        self.window.ids.len() != before
    }

    pub fn can_go_back(&self, owned: &HashSet<u32>) -> bool {
        self.min_id != frontier(owned)
    }

    pub fn ids(&self) -> &[u32] {
        self.window.ids()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.window.ids.contains(&id)
    }

    pub fn min_id(&self) -> u32 {
        self.min_id
    }

    pub fn max_id(&self) -> u32 {
        self.max_id
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }
}
