use kinotop_models::{ImageDescriptor, MediaKind, SearchMatch};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use crate::error::SourceError;
use crate::http::{join_url, read_json};

pub(crate) const SERVICE: &str = "tmdb";

#[derive(Debug, Deserialize)]
pub struct ImagesResponse {
    pub id: Option<u64>,
    #[serde(default)]
    pub posters: Vec<ImageDescriptor>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub page: Option<u32>,
    #[serde(default)]
    pub results: Vec<SearchMatch>,
    pub total_results: Option<u64>,
}

/// `GET /{movie|tv}/{id}/images`, optionally restricted to one language.
pub async fn get_images(
    client: &Client,
    base_url: &str,
    token: &str,
    kind: MediaKind,
    id: u64,
    language: Option<&str>,
) -> Result<ImagesResponse, SourceError> {
    let url = join_url(base_url, &format!("{}/{}/images", kind.api_segment(), id));
    debug!(%kind, id, language = ?language, "TMDB: requesting images");

    let mut request = client
        .get(&url)
        .bearer_auth(token)
        .header("Accept", "application/json");
    if let Some(language) = language {
        request = request.query(&[("include_image_language", language)]);
    }

    let response = request
        .send()
        .await
        .map_err(|source| SourceError::Http { service: SERVICE, source })?;

    read_json(SERVICE, response).await
}

/// `GET /search/{movie|tv}?query=...`
pub async fn search(
    client: &Client,
    base_url: &str,
    token: &str,
    kind: MediaKind,
    title: &str,
    year: Option<i32>,
    language: &str,
) -> Result<SearchResponse, SourceError> {
    let url = join_url(base_url, &format!("search/{}", kind.api_segment()));
    debug!(%kind, title, year = ?year, "TMDB: searching by title");

    let mut params: Vec<(&str, String)> = vec![
        ("query", title.to_string()),
        ("include_adult", "false".to_string()),
    ];
    if !language.is_empty() {
        params.push(("language", language.to_string()));
    }
    if let Some(year) = year {
        params.push((kind.year_param(), year.to_string()));
    }

    let response = client
        .get(&url)
        .bearer_auth(token)
        .header("Accept", "application/json")
        .query(&params)
        .send()
        .await
        .map_err(|source| SourceError::Http { service: SERVICE, source })?;

    read_json(SERVICE, response).await
}
