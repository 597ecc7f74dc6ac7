use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use sha2::{Digest, Sha256};
use tokio::fs;

use crate::config::{self, AppConfig};
use crate::error::Error;
use crate::pokemon::{normalize, PokemonApiResponse, PokemonEntry};

/// Fetches one pokemon by numeric id or lowercase name.
pub async fn fetch_pokemon(query: &str) -> Result<PokemonEntry, Error> {
    fetch_pokemon_with(config::current(), query).await
}

pub async fn fetch_pokemon_with(config: &AppConfig, query: &str) -> Result<PokemonEntry, Error> {
    let url = config.pokemon_url(query);
    let record: PokemonApiResponse =
        fetch_json_cached(config.cache_dir.as_deref(), &url, query).await?;
    normalize(record)
}

async fn fetch_json_cached<T: serde::de::DeserializeOwned>(
    cache_dir: Option<&Path>,
    url: &str,
    query: &str,
) -> Result<T, Error> {
    let bytes = fetch_bytes_cached(cache_dir, url, query).await?;
    match serde_json::from_slice(&bytes) {
        Ok(value) => Ok(value),
        Err(err) => {
            if let Some(dir) = cache_dir {
                let _ = fs::remove_file(cache_path(dir, url)).await;
            }
            Err(Error::MalformedResponse(err.to_string()))
        }
    }
}

async fn fetch_bytes_cached(
    cache_dir: Option<&Path>,
    url: &str,
    query: &str,
) -> Result<Vec<u8>, Error> {
    let cache_path = cache_dir.map(|dir| cache_path(dir, url));
    if let Some(path) = cache_path.as_deref() {
        if let Some(bytes) = read_cache(path).await {
            tracing::debug!(url, "cache hit");
            return Ok(bytes);
        }
    }

    tracing::debug!(url, "fetching");
    let response = http_client()
        .get(url)
        .send()
        .await
        .map_err(|err| Error::FetchFailed(err.to_string()))?;
    if response.status() == reqwest::StatusCode::NOT_FOUND {
        return Err(Error::NotFound(query.to_string()));
    }
    let response = response
        .error_for_status()
        .map_err(|err| Error::FetchFailed(err.to_string()))?;
    let bytes = response
        .bytes()
        .await
        .map_err(|err| Error::FetchFailed(err.to_string()))?
        .to_vec();
    if let Some(path) = cache_path.as_deref() {
        write_cache(path, &bytes).await;
    }
    Ok(bytes)
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}

fn cache_path(dir: &Path, url: &str) -> PathBuf {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    let digest = hex::encode(hasher.finalize());
    dir.join("http").join(digest)
}

async fn read_cache(path: &Path) -> Option<Vec<u8>> {
    fs::read(path).await.ok()
}

async fn write_cache(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent).await;
    }
    if let Err(error) = fs::write(path, bytes).await {
        tracing::debug!(%error, "failed to write http cache");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_path_is_stable_per_url() {
        let dir = Path::new("/tmp/pokewish-cache");
        let a = cache_path(dir, "https://pokeapi.co/api/v2/pokemon/1");
        let b = cache_path(dir, "https://pokeapi.co/api/v2/pokemon/1");
        let c = cache_path(dir, "https://pokeapi.co/api/v2/pokemon/2");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.starts_with(dir.join("http")));
        assert_eq!(a.file_name().unwrap().len(), 64);
    }

    #[tokio::test]
    async fn test_cached_body_is_served_without_network() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            api_base: "http://127.0.0.1:9".into(),
            cache_dir: Some(dir.path().to_path_buf()),
            ..AppConfig::default()
        };
        let url = config.pokemon_url("ditto");
        write_cache(
            &cache_path(dir.path(), &url),
            br#"{"id":132,"name":"ditto","height":3,"weight":40,
                 "sprites":{"front_default":"https://img/132.png"},
                 "types":[{"type":{"name":"normal"}}]}"#,
        )
        .await;

        let entry = fetch_pokemon_with(&config, "ditto").await.unwrap();

        assert_eq!(entry.id, 132);
        assert_eq!(entry.types, vec!["normal"]);
    }

    #[tokio::test]
    async fn test_corrupt_cache_is_evicted() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            api_base: "http://127.0.0.1:9".into(),
            cache_dir: Some(dir.path().to_path_buf()),
            ..AppConfig::default()
        };
        let url = config.pokemon_url("ditto");
        let path = cache_path(dir.path(), &url);
        write_cache(&path, b"not json").await;

        let result = fetch_pokemon_with(&config, "ditto").await;

        assert!(matches!(result, Err(Error::MalformedResponse(_))));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_cached_record_missing_fields_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            api_base: "http://127.0.0.1:9".into(),
            cache_dir: Some(dir.path().to_path_buf()),
            ..AppConfig::default()
        };
        let url = config.pokemon_url("7");
        write_cache(&cache_path(dir.path(), &url), br#"{"id":7,"name":"squirtle"}"#).await;

        let result = fetch_pokemon_with(&config, "7").await;

        assert_eq!(result, Err(Error::MalformedResponse("sprites.front_default".into())));
    }
}
