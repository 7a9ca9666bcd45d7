use async_trait::async_trait;
use kinotop_models::{ImageDescriptor, ListingItem, MediaKind, SearchMatch};
use crate::error::SourceError;
use crate::query::ListingQuery;

/// The ranked listing service (primary API).
#[async_trait]
pub trait ListingSource: Send + Sync {
    fn source_name(&self) -> &str;

    /// Fetch one page (1-based) of `query`, in the order the service returns it.
    async fn fetch_page(&self, query: &ListingQuery, page: u32) -> Result<Vec<ListingItem>, SourceError>;

    /// Cover image URL of the collection identified by `slug`, if it has one.
    async fn collection_cover(&self, slug: &str) -> Result<Option<String>, SourceError>;
}

/// The artwork and title-search service (secondary API).
#[async_trait]
pub trait ArtworkSource: Send + Sync {
    fn source_name(&self) -> &str;

    /// Posters for `id`. With `language` set, only posters tagged with that
    /// language are returned; without it, all posters are.
    async fn poster_images(
        &self,
        kind: MediaKind,
        id: u64,
        language: Option<&str>,
    ) -> Result<Vec<ImageDescriptor>, SourceError>;

    /// Title search, best match first. `year` narrows the search when known.
    async fn search(
        &self,
        kind: MediaKind,
        title: &str,
        year: Option<i32>,
    ) -> Result<Vec<SearchMatch>, SourceError>;
}
