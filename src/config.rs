use std::path::PathBuf;
use std::sync::OnceLock;

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";
const APP_DIR: &str = "pokewish";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub api_base: String,
    pub data_dir: PathBuf,
    /// `None` disables the HTTP response cache.
    pub cache_dir: Option<PathBuf>,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let data_dir = default_data_dir();
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            log_file: default_log_file(&data_dir),
            data_dir,
            cache_dir: Some(default_cache_dir()),
        }
    }
}

impl AppConfig {
    pub fn pokemon_url(&self, query: &str) -> String {
        format!(
            "{}/pokemon/{}",
            self.api_base.trim_end_matches('/'),
            urlencoding::encode(query)
        )
    }
}

pub fn default_data_dir() -> PathBuf {
    dirs_next::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

pub fn default_cache_dir() -> PathBuf {
    dirs_next::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join(APP_DIR)
}

pub fn default_log_file(data_dir: &std::path::Path) -> PathBuf {
    data_dir.join("logs").join("pokewish.log")
}

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Installs the process-wide configuration; only the first call wins.
pub fn install(config: AppConfig) -> &'static AppConfig {
    if CONFIG.set(config).is_err() {
        tracing::warn!("configuration already installed, keeping the first one");
    }
    current()
}

pub fn current() -> &'static AppConfig {
    CONFIG.get_or_init(AppConfig::default)
}
