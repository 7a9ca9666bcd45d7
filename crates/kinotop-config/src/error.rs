use std::path::PathBuf;
use thiserror::Error;
use crate::credentials::CredentialKind;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{} is not set (required for the {} API)", .0.env_var(), .0.service())]
    MissingCredential(CredentialKind),

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("could not determine config directory")]
    NoConfigDir,
}
