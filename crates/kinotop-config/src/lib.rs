pub mod config;
pub mod credentials;
pub mod error;
pub mod paths;

pub use config::{CatalogConfig, Config, EnrichmentConfig, HttpConfig, OutputConfig};
pub use credentials::{CredentialKind, Credentials, KINOPOISK_API_KEY_VAR, TMDB_API_TOKEN_VAR};
pub use error::ConfigError;
pub use paths::{resolve_config_path, PathManager, CONFIG_PATH_VAR};
