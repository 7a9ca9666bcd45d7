use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::error::ConfigError;

/// Tunables for a refresh run. Every field has a default, so an absent or
/// empty config file is valid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
    #[serde(default)]
    pub catalogs: CatalogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_kinopoisk_base_url")]
    pub kinopoisk_base_url: String,
    #[serde(default = "default_tmdb_base_url")]
    pub tmdb_base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    /// Maximum artwork API requests in flight at once.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Preferred poster language (`include_image_language`).
    #[serde(default = "default_image_language")]
    pub language: String,
    /// Locale for title searches.
    #[serde(default = "default_search_language")]
    pub search_language: String,
    /// Look up artwork posters even when the listing already has one.
    #[serde(default)]
    pub refresh_posters: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_pages")]
    pub movies_pages: u32,
    #[serde(default = "default_pages")]
    pub series_pages: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_output_path() -> PathBuf {
    PathBuf::from("data.json")
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_kinopoisk_base_url() -> String {
    "https://api.kinopoisk.dev".to_string()
}

fn default_tmdb_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_concurrency() -> usize {
    5
}

fn default_image_language() -> String {
    "ru".to_string()
}

fn default_search_language() -> String {
    "ru-RU".to_string()
}

fn default_pages() -> u32 {
    2
}

fn default_page_size() -> u32 {
    250
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            kinopoisk_base_url: default_kinopoisk_base_url(),
            tmdb_base_url: default_tmdb_base_url(),
        }
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            language: default_image_language(),
            search_language: default_search_language(),
            refresh_posters: false,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            movies_pages: default_pages(),
            series_pages: default_pages(),
            page_size: default_page_size(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path` when given, otherwise fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enrichment.concurrency == 0 {
            return Err(ConfigError::Invalid("enrichment.concurrency must be at least 1".to_string()));
        }
        if self.catalogs.movies_pages == 0 || self.catalogs.series_pages == 0 {
            return Err(ConfigError::Invalid("catalog page counts must be at least 1".to_string()));
        }
        if self.catalogs.page_size == 0 {
            return Err(ConfigError::Invalid("catalogs.page_size must be at least 1".to_string()));
        }
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Invalid("http.timeout_secs must be at least 1".to_string()));
        }
        if self.http.kinopoisk_base_url.trim().is_empty() || self.http.tmdb_base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("API base URLs cannot be empty".to_string()));
        }
        if self.output.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("output.path cannot be empty".to_string()));
        }
        Ok(())
    }

    /// Image language as an optional filter; an empty string disables the
    /// localized first pass.
    pub fn image_language(&self) -> Option<&str> {
        Some(self.enrichment.language.trim()).filter(|lang| !lang.is_empty())
    }
}
