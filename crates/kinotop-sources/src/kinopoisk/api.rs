use kinotop_models::ListingItem;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use crate::error::SourceError;
use crate::http::{join_url, read_json};
use crate::query::ListingQuery;

pub(crate) const SERVICE: &str = "kinopoisk";

/// One page of `/v1.4/movie`.
#[derive(Debug, Deserialize)]
pub struct ListingPage {
    pub docs: Vec<ListingItem>,
    pub total: Option<u64>,
    pub page: Option<u32>,
    pub pages: Option<u32>,
}

/// Collection metadata from `/v1.4/list/{slug}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListInfo {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub cover: Option<ListCover>,
    pub movies_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCover {
    pub url: Option<String>,
    pub preview_url: Option<String>,
}

impl ListInfo {
    pub fn cover_url(&self) -> Option<String> {
        self.cover
            .as_ref()
            .and_then(|cover| cover.url.clone())
            .filter(|url| !url.is_empty())
    }
}

/// Fetch one page of the movie listing.
pub async fn get_listing_page(
    client: &Client,
    base_url: &str,
    api_key: &str,
    query: &ListingQuery,
    page: u32,
) -> Result<ListingPage, SourceError> {
    let url = join_url(base_url, "v1.4/movie");
    debug!(page, limit = query.page_size(), "Kinopoisk: requesting listing page");

    let response = client
        .get(&url)
        .header("X-API-KEY", api_key)
        .header("Accept", "application/json")
        .query(&query.for_page(page))
        .send()
        .await
        .map_err(|source| SourceError::Http { service: SERVICE, source })?;

    read_json(SERVICE, response).await
}

/// Fetch collection metadata for `slug`.
pub async fn get_list(
    client: &Client,
    base_url: &str,
    api_key: &str,
    slug: &str,
) -> Result<ListInfo, SourceError> {
    let url = join_url(base_url, &format!("v1.4/list/{}", urlencoding::encode(slug)));
    debug!(slug, "Kinopoisk: requesting collection metadata");

    let response = client
        .get(&url)
        .header("X-API-KEY", api_key)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|source| SourceError::Http { service: SERVICE, source })?;

    read_json(SERVICE, response).await
}
