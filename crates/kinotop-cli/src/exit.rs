use kinotop_config::{ConfigError, CredentialKind};
use thiserror::Error;

pub const EXIT_PIPELINE_ERROR: u8 = 1;
pub const EXIT_MISSING_KINOPOISK_KEY: u8 = 3;
pub const EXIT_MISSING_TMDB_TOKEN: u8 = 4;

/// A failed refresh, classified by the process exit code it maps to.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Pipeline(#[from] anyhow::Error),
}

impl RunError {
    pub fn exit_code(&self) -> u8 {
        match self {
            RunError::Config(ConfigError::MissingCredential(CredentialKind::Kinopoisk)) => EXIT_MISSING_KINOPOISK_KEY,
            RunError::Config(ConfigError::MissingCredential(CredentialKind::Tmdb)) => EXIT_MISSING_TMDB_TOKEN,
            RunError::Config(_) | RunError::Pipeline(_) => EXIT_PIPELINE_ERROR,
        }
    }
}
