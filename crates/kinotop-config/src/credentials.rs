use std::fmt;
use crate::error::ConfigError;

pub const KINOPOISK_API_KEY_VAR: &str = "KINOPOISK_API_KEY";
pub const TMDB_API_TOKEN_VAR: &str = "TMDB_API_TOKEN";

/// The two secrets a refresh cannot run without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind {
    /// `X-API-KEY` for the listing API.
    Kinopoisk,
    /// Bearer token for the artwork/search API.
    Tmdb,
}

impl CredentialKind {
    pub fn env_var(&self) -> &'static str {
        match self {
            CredentialKind::Kinopoisk => KINOPOISK_API_KEY_VAR,
            CredentialKind::Tmdb => TMDB_API_TOKEN_VAR,
        }
    }

    pub fn service(&self) -> &'static str {
        match self {
            CredentialKind::Kinopoisk => "Kinopoisk",
            CredentialKind::Tmdb => "TMDB",
        }
    }
}

/// API credentials, read from the environment only.
#[derive(Clone)]
pub struct Credentials {
    kinopoisk_api_key: String,
    tmdb_api_token: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve credentials through `lookup`, checking the listing key first so
    /// that a run missing both reports the listing key.
    /// Empty or whitespace-only values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |kind: CredentialKind| {
            lookup(kind.env_var())
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::MissingCredential(kind))
        };

        let kinopoisk_api_key = read(CredentialKind::Kinopoisk)?;
        let tmdb_api_token = read(CredentialKind::Tmdb)?;

        Ok(Self {
            kinopoisk_api_key,
            tmdb_api_token,
        })
    }

    pub fn kinopoisk_api_key(&self) -> &str {
        &self.kinopoisk_api_key
    }

    pub fn tmdb_api_token(&self) -> &str {
        &self.tmdb_api_token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("kinopoisk_api_key", &"***")
            .field("tmdb_api_token", &"***")
            .finish()
    }
}
