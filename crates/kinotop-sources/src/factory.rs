//! Builds the two API clients from configuration and credentials.
//!
//! Both clients share one HTTP connection pool and the configured timeout.

use kinotop_config::{Config, Credentials};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use crate::error::SourceError;
use crate::http::build_client;
use crate::kinopoisk::KinopoiskClient;
use crate::tmdb::TmdbClient;
use crate::traits::{ArtworkSource, ListingSource};

pub struct Sources {
    pub listing: Arc<dyn ListingSource>,
    pub artwork: Arc<dyn ArtworkSource>,
}

pub fn create_sources(config: &Config, credentials: &Credentials) -> Result<Sources, SourceError> {
    let client = build_client(Duration::from_secs(config.http.timeout_secs))?;

    let listing = KinopoiskClient::new(
        client.clone(),
        config.http.kinopoisk_base_url.clone(),
        credentials.kinopoisk_api_key(),
    );
    let artwork = TmdbClient::new(
        client,
        config.http.tmdb_base_url.clone(),
        credentials.tmdb_api_token(),
        config.enrichment.search_language.clone(),
    );

    debug!(
        listing = listing.source_name(),
        artwork = artwork.source_name(),
        timeout_secs = config.http.timeout_secs,
        "Created API clients"
    );

    Ok(Sources {
        listing: Arc::new(listing),
        artwork: Arc::new(artwork),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_sources() {
        let credentials = Credentials::from_lookup(|name| Some(format!("{}-value", name))).unwrap();
        let sources = create_sources(&Config::default(), &credentials).unwrap();
        assert_eq!(sources.listing.source_name(), "kinopoisk");
        assert_eq!(sources.artwork.source_name(), "tmdb");
    }
}
