use futures::future::join_all;
use kinotop_models::{CatalogEntry, ImageDescriptor, MediaKind, SearchMatch};
use kinotop_sources::{ArtworkSource, ListingSource, SourceError};
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};
use crate::limiter::{Limiter, LimiterError};

/// Why one entry could not be enriched. Never fatal for the run.
#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("lookup for {subject} failed: {source}")]
    Lookup {
        subject: String,
        #[source]
        source: SourceError,
    },
    #[error("lookup for {subject} was not scheduled: {source}")]
    Limiter {
        subject: String,
        #[source]
        source: LimiterError,
    },
}

impl EnrichError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, EnrichError::Lookup { source, .. } if source.is_rate_limited())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichStats {
    pub ids_searched: usize,
    pub ids_resolved: usize,
    pub posters_looked_up: usize,
    pub posters_resolved: usize,
    pub failures: usize,
}

/// Fills in missing artwork ids and posters from the artwork API.
///
/// Runs in two passes over a catalog whose ranks are already fixed:
/// 1. entries without an id are searched by title (with the release year as
///    a hint, then without it); the best match supplies the id, and the
///    poster when the entry has none;
/// 2. entries that have an id but still no poster get one from the images
///    endpoint, localized first, then unfiltered.
///
/// Every request goes through the shared [`Limiter`]. Results are written
/// back by index, so the order of entries never changes.
#[derive(Clone)]
pub struct Enricher {
    artwork: Arc<dyn ArtworkSource>,
    limiter: Limiter,
    image_language: Option<String>,
    refresh_posters: bool,
}

impl Enricher {
    pub fn new(artwork: Arc<dyn ArtworkSource>, limiter: Limiter) -> Self {
        Self {
            artwork,
            limiter,
            image_language: None,
            refresh_posters: false,
        }
    }

    /// Language tried first for posters; `None` goes straight to unfiltered.
    pub fn with_image_language(mut self, language: Option<String>) -> Self {
        self.image_language = language;
        self
    }

    /// Also look up posters for entries that already have one from the listing.
    pub fn with_refresh_posters(mut self, refresh: bool) -> Self {
        self.refresh_posters = refresh;
        self
    }

    pub async fn enrich(&self, entries: &mut [CatalogEntry]) -> EnrichStats {
        let mut stats = EnrichStats::default();
        self.resolve_ids(entries, &mut stats).await;
        self.resolve_posters(entries, &mut stats).await;

        info!(
            source = self.artwork.source_name(),
            entries = entries.len(),
            ids_searched = stats.ids_searched,
            ids_resolved = stats.ids_resolved,
            posters_looked_up = stats.posters_looked_up,
            posters_resolved = stats.posters_resolved,
            failures = stats.failures,
            "Enrichment finished"
        );
        stats
    }

    async fn resolve_ids(&self, entries: &mut [CatalogEntry], stats: &mut EnrichStats) {
        let pending: Vec<(usize, MediaKind, String, Option<i32>)> = entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.needs_id() && !entry.title.trim().is_empty())
            .map(|(index, entry)| (index, entry.kind(), entry.title.clone(), entry.year()))
            .collect();
        if pending.is_empty() {
            return;
        }
        stats.ids_searched = pending.len();
        debug!(count = pending.len(), "Searching artwork ids by title");

        let searches = pending.into_iter().map(|(index, kind, title, year)| async move {
            let outcome = self.search_match(kind, &title, year).await;
            (index, title, outcome)
        });

        for (index, title, outcome) in join_all(searches).await {
            let entry = &mut entries[index];
            match outcome {
                Ok(Some(found)) => {
                    debug!(rank = entry.rank, %title, id = found.id, "Resolved id by title");
                    entry.id = Some(found.id);
                    if entry.needs_poster() {
                        entry.poster_path = found.poster_path;
                    }
                    stats.ids_resolved += 1;
                }
                Ok(None) => {
                    debug!(rank = entry.rank, %title, "No title match");
                }
                Err(e) => {
                    warn!(rank = entry.rank, %title, rate_limited = e.is_rate_limited(), error = %e, "Title search failed");
                    stats.failures += 1;
                }
            }
        }
    }

    async fn resolve_posters(&self, entries: &mut [CatalogEntry], stats: &mut EnrichStats) {
        let pending: Vec<(usize, MediaKind, u64)> = entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.needs_poster() || self.refresh_posters)
            .filter_map(|(index, entry)| entry.id.map(|id| (index, entry.kind(), id)))
            .collect();
        if pending.is_empty() {
            return;
        }
        stats.posters_looked_up = pending.len();
        debug!(count = pending.len(), "Looking up posters");

        let lookups = pending.into_iter().map(|(index, kind, id)| async move {
            (index, id, self.poster_path(kind, id).await)
        });

        for (index, id, outcome) in join_all(lookups).await {
            let entry = &mut entries[index];
            match outcome {
                Ok(Some(path)) => {
                    entry.poster_path = Some(path);
                    stats.posters_resolved += 1;
                }
                Ok(None) => {
                    debug!(rank = entry.rank, id, "No poster available");
                }
                Err(e) => {
                    warn!(rank = entry.rank, id, rate_limited = e.is_rate_limited(), error = %e, "Poster lookup failed");
                    stats.failures += 1;
                }
            }
        }
    }

    async fn search_match(
        &self,
        kind: MediaKind,
        title: &str,
        year: Option<i32>,
    ) -> Result<Option<SearchMatch>, EnrichError> {
        let matches = self.limited(title, || self.artwork.search(kind, title, year)).await?;
        if !matches.is_empty() || year.is_none() {
            return Ok(matches.into_iter().next());
        }

        // premiere years from the listing sometimes disagree with the artwork API
        let matches = self.limited(title, || self.artwork.search(kind, title, None)).await?;
        Ok(matches.into_iter().next())
    }

    async fn poster_path(&self, kind: MediaKind, id: u64) -> Result<Option<String>, EnrichError> {
        let subject = format!("{} {}", kind, id);

        if let Some(language) = self.image_language.as_deref() {
            let localized = self
                .limited(&subject, || self.artwork.poster_images(kind, id, Some(language)))
                .await?;
            if let Some(path) = first_poster(&localized) {
                return Ok(Some(path));
            }
        }

        let any = self
            .limited(&subject, || self.artwork.poster_images(kind, id, None))
            .await?;
        Ok(first_poster(&any))
    }

    /// Run one request in a limiter slot, attaching `subject` to any error.
    async fn limited<F, Fut, T>(&self, subject: &str, request: F) -> Result<T, EnrichError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, SourceError>>,
    {
        match self.limiter.submit(request).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(source)) => Err(EnrichError::Lookup {
                subject: subject.to_string(),
                source,
            }),
            Err(source) => Err(EnrichError::Limiter {
                subject: subject.to_string(),
                source,
            }),
        }
    }
}

fn first_poster(posters: &[ImageDescriptor]) -> Option<String> {
    posters
        .iter()
        .find_map(|p| p.file_path.clone().filter(|path| !path.is_empty()))
}

/// Cover image of the collection `slug`, or `None` when it cannot be had.
pub async fn resolve_cover(source: &dyn ListingSource, slug: &str) -> Option<String> {
    match source.collection_cover(slug).await {
        Ok(Some(url)) => {
            debug!(slug, %url, "Resolved collection cover");
            Some(url)
        }
        Ok(None) => {
            warn!(slug, "Collection has no cover");
            None
        }
        Err(e) => {
            warn!(slug, error = %e, "Collection cover lookup failed");
            None
        }
    }
}
