//! Key-value persistence for the wishlist
//!
//! The app uses exactly two keys: the serialized wishlist and a flag that
//! records a completed initial load.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::wishlist::Wishlist;

pub const WISHLIST_KEY: &str = "pokemonWishlist";
pub const LOADED_FLAG_KEY: &str = "pokemonsLoaded";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), Error>;
}

/// One file per key under a root directory.
#[derive(Clone, Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    /// Same layout as `set`, without blocking the caller's thread.
    pub async fn write(&self, key: &str, value: &str) -> Result<(), Error> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| Error::Storage(format!("Failed to create data directory: {e}")))?;
        tokio::fs::write(self.key_path(key), value)
            .await
            .map_err(|e| Error::Storage(format!("Failed to write {key}: {e}")))
    }
}

/// Writes a wishlist snapshot off the event loop.
pub async fn save_wishlist(store: &FileStore, wishlist: &Wishlist) -> Result<(), Error> {
    let json = serde_json::to_string(wishlist)
        .map_err(|e| Error::Storage(format!("Failed to serialize wishlist: {e}")))?;
    store.write(WISHLIST_KEY, &json).await?;
    tracing::debug!(entries = wishlist.len(), "wishlist saved");
    Ok(())
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(value) => Some(value),
            Err(err) if err.kind() == ErrorKind::NotFound => None,
            Err(err) => {
                tracing::warn!(key, error = %err, "failed to read stored value");
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        fs::create_dir_all(&self.root)
            .map_err(|e| Error::Storage(format!("Failed to create data directory: {e}")))?;
        fs::write(self.key_path(key), value)
            .map_err(|e| Error::Storage(format!("Failed to write {key}: {e}")))
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// What startup recovered from storage.
#[derive(Clone, Debug, PartialEq)]
pub struct Bootstrap {
    pub wishlist: Wishlist,
    pub catalog_autoload: bool,
}

pub fn bootstrap(store: &mut dyn KeyValueStore) -> Bootstrap {
    let (wishlist, restored) = Wishlist::restore(store);
    if restored {
        if let Err(error) = store.set(LOADED_FLAG_KEY, "true") {
            tracing::warn!(%error, "failed to record initial load");
        }
    }
    let catalog_autoload = store
        .get(LOADED_FLAG_KEY)
        .map(|value| value.trim() == "true")
        .unwrap_or(false);
    tracing::info!(
        entries = wishlist.len(),
        catalog_autoload,
        "wishlist bootstrapped"
    );
    Bootstrap {
        wishlist,
        catalog_autoload,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pokemon::PokemonEntry;
    use chrono::Utc;

    fn entry(id: u32) -> PokemonEntry {
        PokemonEntry {
            id,
            name: format!("mon{id}"),
            image: format!("https://img/{id}.png"),
            types: vec!["normal".into()],
            height: 10,
            weight: 100,
            is_captured: false,
            date_added: Utc::now(),
        }
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested"));

        assert_eq!(store.get("missing"), None);
        store.set("k", "v1").unwrap();
        assert_eq!(store.get("k").as_deref(), Some("v1"));
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").as_deref(), Some("v2"));
    }

    #[tokio::test]
    async fn test_save_wishlist_then_bootstrap() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("data"));
        let mut wishlist = Wishlist::default();
        wishlist.add(entry(3)).unwrap();
        wishlist.add(entry(1)).unwrap();
        wishlist.toggle_captured(1);

        save_wishlist(&store, &wishlist).await.unwrap();
        assert!(dir.path().join("data").join("pokemonWishlist.json").is_file());

        wishlist.remove(3);
        save_wishlist(&store, &wishlist).await.unwrap();

        let boot = bootstrap(&mut store.clone());
        assert_eq!(boot.wishlist, wishlist);
        assert!(boot.catalog_autoload);
    }

    #[tokio::test]
    async fn test_save_wishlist_reports_unwritable_root() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("occupied");
        std::fs::write(&blocker, "not a directory").unwrap();
        let store = FileStore::new(&blocker);

        let result = save_wishlist(&store, &Wishlist::default()).await;

        assert!(matches!(result, Err(Error::Storage(_))));
    }

    #[test]
    fn test_bootstrap_empty_store() {
        let mut store = MemoryStore::new();
        let boot = bootstrap(&mut store);
        assert!(boot.wishlist.is_empty());
        assert!(!boot.catalog_autoload);
        assert_eq!(store.get(LOADED_FLAG_KEY), None);
    }

    #[test]
    fn test_bootstrap_restores_and_sets_flag() {
        let mut store = MemoryStore::new();
        let mut wishlist = Wishlist::default();
        wishlist.add(entry(1)).unwrap();
        wishlist.add(entry(4)).unwrap();
        wishlist.persist(&mut store);

        let boot = bootstrap(&mut store);

        assert_eq!(boot.wishlist, wishlist);
        assert!(boot.catalog_autoload);
        assert_eq!(store.get(LOADED_FLAG_KEY).as_deref(), Some("true"));
    }

    #[test]
    fn test_bootstrap_corrupt_wishlist_keeps_previous_flag() {
        let mut store = MemoryStore::new();
        store.set(WISHLIST_KEY, "{not json").unwrap();
        store.set(LOADED_FLAG_KEY, "true").unwrap();

        let boot = bootstrap(&mut store);

        assert!(boot.wishlist.is_empty());
        assert!(boot.catalog_autoload);
    }
}
