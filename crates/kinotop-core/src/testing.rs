//! In-memory API fakes shared by the pipeline tests.

use async_trait::async_trait;
use kinotop_models::{ExternalIds, ImageDescriptor, ListingItem, MediaKind, Premiere, Ratings, SearchMatch};
use kinotop_sources::{ArtworkSource, ListingQuery, ListingSource, SourceError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub fn decode_error(service: &'static str) -> SourceError {
    let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    SourceError::Decode { service, source }
}

pub fn listing_item(name: &str, tmdb: Option<u64>, rating: f64) -> ListingItem {
    ListingItem {
        name: Some(name.to_string()),
        external_id: Some(ExternalIds {
            tmdb,
            ..ExternalIds::default()
        }),
        rating: Some(Ratings {
            kp: Some(rating),
            imdb: None,
        }),
        premiere: Some(Premiere {
            world: Some("2001-02-03T00:00:00.000Z".to_string()),
            russia: None,
        }),
        ..ListingItem::default()
    }
}

pub fn poster(path: &str, language: Option<&str>) -> ImageDescriptor {
    ImageDescriptor {
        file_path: Some(path.to_string()),
        language: language.map(str::to_string),
        vote_average: None,
    }
}

/// Listing pages keyed by the query's `lists`/`isSeries` marker and page.
#[derive(Default)]
pub struct FakeListing {
    pages: HashMap<(String, u32), Vec<ListingItem>>,
    failing: Vec<(String, u32)>,
    delays: HashMap<u32, Duration>,
    covers: HashMap<String, String>,
    pub requests: AtomicUsize,
}

impl FakeListing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, catalog: &str, page: u32, items: Vec<ListingItem>) -> Self {
        self.pages.insert((catalog.to_string(), page), items);
        self
    }

    pub fn failing_page(mut self, catalog: &str, page: u32) -> Self {
        self.failing.push((catalog.to_string(), page));
        self
    }

    /// Delay every catalog's `page` by `delay`, to reorder completions.
    pub fn delay(mut self, page: u32, delay: Duration) -> Self {
        self.delays.insert(page, delay);
        self
    }

    pub fn cover(mut self, slug: &str, url: &str) -> Self {
        self.covers.insert(slug.to_string(), url.to_string());
        self
    }

    /// Which catalog a query targets: the value of `lists`, or `series`.
    fn catalog_of(query: &ListingQuery) -> String {
        let params = query.for_page(1);
        if let Some((_, lists)) = params.iter().find(|(k, _)| k == "lists") {
            return lists.clone();
        }
        if params.iter().any(|(k, v)| k == "isSeries" && v == "true") {
            return "series".to_string();
        }
        "unknown".to_string()
    }
}

#[async_trait]
impl ListingSource for FakeListing {
    fn source_name(&self) -> &str {
        "fake-listing"
    }

    async fn fetch_page(&self, query: &ListingQuery, page: u32) -> Result<Vec<ListingItem>, SourceError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(&page) {
            tokio::time::sleep(*delay).await;
        }
        let key = (Self::catalog_of(query), page);
        if self.failing.contains(&key) {
            return Err(decode_error("fake-listing"));
        }
        Ok(self.pages.get(&key).cloned().unwrap_or_default())
    }

    async fn collection_cover(&self, slug: &str) -> Result<Option<String>, SourceError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        match self.covers.get(slug) {
            Some(url) => Ok(Some(url.clone())),
            None => Err(decode_error("fake-listing")),
        }
    }
}

/// Artwork fake that records every call and tracks peak concurrency.
#[derive(Default)]
pub struct FakeArtwork {
    images: HashMap<(u64, Option<String>), Vec<ImageDescriptor>>,
    failing_ids: Vec<u64>,
    matches: HashMap<(String, Option<i32>), Vec<SearchMatch>>,
    failing_titles: Vec<String>,
    latency: Option<Duration>,
    pub calls: Mutex<Vec<String>>,
    running: AtomicUsize,
    peak: AtomicUsize,
}

impl FakeArtwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn images(mut self, id: u64, language: Option<&str>, posters: Vec<ImageDescriptor>) -> Self {
        self.images.insert((id, language.map(str::to_string)), posters);
        self
    }

    pub fn failing_id(mut self, id: u64) -> Self {
        self.failing_ids.push(id);
        self
    }

    /// Answer searches for exactly `title` and `year`.
    pub fn search_result(mut self, title: &str, year: Option<i32>, id: u64, poster_path: Option<&str>) -> Self {
        self.matches.entry((title.to_string(), year)).or_default().push(SearchMatch {
            id,
            title: Some(title.to_string()),
            poster_path: poster_path.map(str::to_string),
        });
        self
    }

    pub fn failing_title(mut self, title: &str) -> Self {
        self.failing_titles.push(title.to_string());
        self
    }

    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn call_log(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    async fn enter(&self, call: String) {
        self.calls.lock().unwrap().push(call);
        let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.running.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ArtworkSource for FakeArtwork {
    fn source_name(&self) -> &str {
        "fake-artwork"
    }

    async fn poster_images(
        &self,
        kind: MediaKind,
        id: u64,
        language: Option<&str>,
    ) -> Result<Vec<ImageDescriptor>, SourceError> {
        self.enter(format!("images {} {} {:?}", kind, id, language)).await;
        if self.failing_ids.contains(&id) {
            return Err(decode_error("fake-artwork"));
        }
        Ok(self
            .images
            .get(&(id, language.map(str::to_string)))
            .cloned()
            .unwrap_or_default())
    }

    async fn search(
        &self,
        kind: MediaKind,
        title: &str,
        year: Option<i32>,
    ) -> Result<Vec<SearchMatch>, SourceError> {
        self.enter(format!("search {} {} {:?}", kind, title, year)).await;
        if self.failing_titles.iter().any(|t| t == title) {
            return Err(decode_error("fake-artwork"));
        }
        Ok(self
            .matches
            .get(&(title.to_string(), year))
            .cloned()
            .unwrap_or_default())
    }
}
