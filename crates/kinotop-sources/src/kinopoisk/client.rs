use async_trait::async_trait;
use kinotop_models::ListingItem;
use reqwest::Client;
use tracing::debug;
use crate::error::SourceError;
use crate::kinopoisk::api;
use crate::query::ListingQuery;
use crate::traits::ListingSource;

#[derive(Clone)]
pub struct KinopoiskClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl KinopoiskClient {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl ListingSource for KinopoiskClient {
    fn source_name(&self) -> &str {
        "kinopoisk"
    }

    async fn fetch_page(&self, query: &ListingQuery, page: u32) -> Result<Vec<ListingItem>, SourceError> {
        let listing = api::get_listing_page(&self.client, &self.base_url, &self.api_key, query, page).await?;
        debug!(
            page,
            items = listing.docs.len(),
            total = ?listing.total,
            pages = ?listing.pages,
            "Kinopoisk: received listing page"
        );
        Ok(listing.docs)
    }

    async fn collection_cover(&self, slug: &str) -> Result<Option<String>, SourceError> {
        let info = api::get_list(&self.client, &self.base_url, &self.api_key, slug).await?;
        Ok(info.cover_url())
    }
}
