use async_trait::async_trait;
use kinotop_models::{ImageDescriptor, MediaKind, SearchMatch};
use reqwest::Client;
use crate::error::SourceError;
use crate::tmdb::api;
use crate::traits::ArtworkSource;

#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    base_url: String,
    token: String,
    search_language: String,
}

impl TmdbClient {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        token: impl Into<String>,
        search_language: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            token: token.into(),
            search_language: search_language.into(),
        }
    }
}

#[async_trait]
impl ArtworkSource for TmdbClient {
    fn source_name(&self) -> &str {
        "tmdb"
    }

    async fn poster_images(
        &self,
        kind: MediaKind,
        id: u64,
        language: Option<&str>,
    ) -> Result<Vec<ImageDescriptor>, SourceError> {
        let images = api::get_images(&self.client, &self.base_url, &self.token, kind, id, language).await?;
        Ok(images.posters)
    }

    async fn search(
        &self,
        kind: MediaKind,
        title: &str,
        year: Option<i32>,
    ) -> Result<Vec<SearchMatch>, SourceError> {
        let found = api::search(
            &self.client,
            &self.base_url,
            &self.token,
            kind,
            title,
            year,
            &self.search_language,
        )
        .await?;
        Ok(found.results)
    }
}
