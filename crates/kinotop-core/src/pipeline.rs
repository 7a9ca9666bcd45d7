use anyhow::{Context, Result};
use chrono::NaiveDate;
use kinotop_config::Config;
use kinotop_models::{CatalogEntry, MediaKind, Snapshot};
use kinotop_sources::{ArtworkSource, ListingSource};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};
use crate::catalog::CatalogSpec;
use crate::enrich::{resolve_cover, EnrichStats, Enricher};
use crate::fetcher::fetch_pages;
use crate::limiter::Limiter;
use crate::normalize::normalize;
use crate::snapshot::{assemble, today_utc, SnapshotWriter};

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub movies: CatalogSpec,
    pub series: CatalogSpec,
    /// Artwork requests allowed in flight at once, across both catalogs.
    pub concurrency: usize,
    pub image_language: Option<String>,
    pub refresh_posters: bool,
}

impl PipelineOptions {
    pub fn from_config(config: &Config) -> Self {
        let catalogs = &config.catalogs;
        Self {
            movies: CatalogSpec::movies(catalogs.page_size, catalogs.movies_pages),
            series: CatalogSpec::series(catalogs.page_size, catalogs.series_pages),
            concurrency: config.enrichment.concurrency,
            image_language: config.image_language().map(str::to_string),
            refresh_posters: config.enrichment.refresh_posters,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSummary {
    pub kind: MediaKind,
    pub entries: usize,
    pub failed_pages: Vec<u32>,
    pub enrichment: EnrichStats,
    pub ids_missing: usize,
    pub posters_missing: usize,
}

#[derive(Debug, Clone)]
pub struct RefreshSummary {
    pub date: NaiveDate,
    pub movies: CatalogSummary,
    pub series: CatalogSummary,
    pub movies_cover: bool,
    pub series_cover: bool,
    pub elapsed: Duration,
}

impl RefreshSummary {
    pub fn failed_pages(&self) -> usize {
        self.movies.failed_pages.len() + self.series.failed_pages.len()
    }

    pub fn log(&self) {
        for catalog in [&self.movies, &self.series] {
            info!(
                catalog = %catalog.kind,
                entries = catalog.entries,
                failed_pages = ?catalog.failed_pages,
                ids_resolved = catalog.enrichment.ids_resolved,
                ids_missing = catalog.ids_missing,
                posters_missing = catalog.posters_missing,
                "Catalog summary"
            );
        }
        info!(
            date = %self.date,
            movies_cover = self.movies_cover,
            series_cover = self.series_cover,
            elapsed_ms = self.elapsed.as_millis() as u64,
            "Refresh complete"
        );
    }
}

/// Builds a snapshot from the listing and artwork APIs.
///
/// Both catalogs are fetched, ordered, normalized and enriched concurrently,
/// together with the two collection covers. Artwork requests from both
/// catalogs share one limiter. Nothing is assembled until every stage has
/// settled.
pub struct RefreshPipeline {
    listing: Arc<dyn ListingSource>,
    artwork: Arc<dyn ArtworkSource>,
    options: PipelineOptions,
}

impl RefreshPipeline {
    pub fn new(listing: Arc<dyn ListingSource>, artwork: Arc<dyn ArtworkSource>, options: PipelineOptions) -> Self {
        Self {
            listing,
            artwork,
            options,
        }
    }

    #[instrument(skip(self))]
    pub async fn build(&self, date: NaiveDate) -> Result<(Snapshot, RefreshSummary)> {
        let started = Instant::now();
        let limiter = Limiter::new(self.options.concurrency).context("invalid enrichment concurrency")?;
        let enricher = Enricher::new(self.artwork.clone(), limiter)
            .with_image_language(self.options.image_language.clone())
            .with_refresh_posters(self.options.refresh_posters);

        info!(
            listing = self.listing.source_name(),
            artwork = self.artwork.source_name(),
            concurrency = self.options.concurrency,
            "Starting refresh"
        );

        let ((movies, movies_summary), (series, series_summary), movies_cover, series_cover) = tokio::join!(
            self.build_catalog(&self.options.movies, &enricher),
            self.build_catalog(&self.options.series, &enricher),
            resolve_cover(self.listing.as_ref(), self.options.movies.cover_slug),
            resolve_cover(self.listing.as_ref(), self.options.series.cover_slug),
        );

        let summary = RefreshSummary {
            date,
            movies: movies_summary,
            series: series_summary,
            movies_cover: movies_cover.is_some(),
            series_cover: series_cover.is_some(),
            elapsed: started.elapsed(),
        };
        let snapshot = assemble(date, movies, series, movies_cover, series_cover);
        Ok((snapshot, summary))
    }

    /// Build today's snapshot and persist it with `writer`.
    pub async fn run(&self, writer: &SnapshotWriter) -> Result<RefreshSummary> {
        let (snapshot, summary) = self.build(today_utc()).await?;
        writer
            .write(&snapshot)
            .with_context(|| format!("failed to persist snapshot to {}", writer.path().display()))?;
        Ok(summary)
    }

    async fn build_catalog(&self, spec: &CatalogSpec, enricher: &Enricher) -> (Vec<CatalogEntry>, CatalogSummary) {
        let mut report = fetch_pages(self.listing.as_ref(), &spec.query, spec.pages).await;
        if !report.failed_pages.is_empty() {
            warn!(
                catalog = %spec.kind,
                failed_pages = ?report.failed_pages,
                "Catalog is incomplete"
            );
        }

        spec.order.apply(&mut report.items);
        let mut entries = normalize(&report.items, spec.kind);
        info!(catalog = %spec.kind, entries = entries.len(), "Normalized catalog");

        let enrichment = enricher.enrich(&mut entries).await;

        let summary = CatalogSummary {
            kind: spec.kind,
            entries: entries.len(),
            failed_pages: report.failed_pages,
            enrichment,
            ids_missing: entries.iter().filter(|e| e.needs_id()).count(),
            posters_missing: entries.iter().filter(|e| e.needs_poster()).count(),
        };
        (entries, summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{listing_item, poster, FakeArtwork, FakeListing};
    use kinotop_models::ListingItem;
    use std::sync::atomic::Ordering;
    use tempfile::tempdir;

    fn options(pages: u32, concurrency: usize) -> PipelineOptions {
        PipelineOptions {
            movies: CatalogSpec::movies(2, pages),
            series: CatalogSpec::series(2, pages),
            concurrency,
            image_language: Some("ru".to_string()),
            refresh_posters: false,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn series_item(name: &str, tmdb: u64, top250: Option<u32>) -> ListingItem {
        let mut item = listing_item(name, Some(tmdb), 8.0);
        item.top250 = top250;
        item
    }

    /// Two pages of two movies each, best rated first; the second movie on
    /// page 2 has no artwork id.
    fn two_page_movies() -> FakeListing {
        FakeListing::new()
            .page("top500", 1, vec![listing_item("m1", Some(101), 9.1), listing_item("m2", Some(102), 9.0)])
            .page("top500", 2, vec![listing_item("m3", Some(103), 8.9), listing_item("m4", None, 8.8)])
            .cover("top500", "https://image.example/top500.jpg")
            .cover("series-top250", "https://image.example/series.jpg")
    }

    fn artwork_for_movies() -> FakeArtwork {
        FakeArtwork::new()
            .images(101, Some("ru"), vec![poster("/101.jpg", Some("ru"))])
            .images(102, Some("ru"), vec![poster("/102.jpg", Some("ru"))])
            .images(103, None, vec![poster("/103.jpg", None)])
            .search_result("m4", Some(2001), 104, None)
            .images(104, Some("ru"), vec![poster("/104.jpg", Some("ru"))])
    }

    #[tokio::test]
    async fn test_two_pages_with_missing_id() {
        let pipeline = RefreshPipeline::new(
            Arc::new(two_page_movies()),
            Arc::new(artwork_for_movies()),
            options(2, 5),
        );

        let (snapshot, summary) = pipeline.build(date()).await.unwrap();

        let titles: Vec<&str> = snapshot.movies.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["m1", "m2", "m3", "m4"]);
        let ranks: Vec<u32> = snapshot.movies.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
        let ids: Vec<Option<u64>> = snapshot.movies.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![Some(101), Some(102), Some(103), Some(104)]);
        let posters: Vec<Option<&str>> = snapshot.movies.iter().map(|e| e.poster_path.as_deref()).collect();
        assert_eq!(posters, vec![Some("/101.jpg"), Some("/102.jpg"), Some("/103.jpg"), Some("/104.jpg")]);
        assert_eq!(snapshot.movies[0].vote_average, Some(9.1));
        assert_eq!(snapshot.movies[0].release_date.as_deref(), Some("2001-02-03"));

        assert_eq!(snapshot.date, date());
        assert_eq!(snapshot.movies_cover.as_deref(), Some("https://image.example/top500.jpg"));
        assert_eq!(snapshot.series_cover.as_deref(), Some("https://image.example/series.jpg"));
        assert_eq!(summary.movies.enrichment.ids_resolved, 1);
        assert_eq!(summary.movies.ids_missing, 0);
        assert_eq!(summary.failed_pages(), 0);
    }

    #[tokio::test]
    async fn test_missing_posters_still_written() {
        let listing = FakeListing::new().page("top500", 1, vec![listing_item("m1", Some(101), 9.1)]);
        let pipeline = RefreshPipeline::new(Arc::new(listing), Arc::new(FakeArtwork::new()), options(1, 2));
        let dir = tempdir().unwrap();
        let writer = SnapshotWriter::new(dir.path().join("data.json"));

        let summary = pipeline.run(&writer).await.unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(writer.path()).unwrap()).unwrap();
        assert_eq!(json["movies"][0]["id"], 101);
        assert!(json["movies"][0]["poster_path"].is_null());
        assert!(json["movies_cover"].is_null());
        assert!(json["series_cover"].is_null());
        assert_eq!(json["series"].as_array().unwrap().len(), 0);
        assert_eq!(summary.movies.posters_missing, 1);
        assert!(!summary.movies_cover);
    }

    #[tokio::test]
    async fn test_failed_page_leaves_other_catalog_intact() {
        let listing = two_page_movies()
            .failing_page("top500", 1)
            .page("series", 1, vec![series_item("s1", 201, Some(1))]);
        let pipeline = RefreshPipeline::new(Arc::new(listing), Arc::new(artwork_for_movies()), options(2, 5));

        let (snapshot, summary) = pipeline.build(date()).await.unwrap();

        let titles: Vec<&str> = snapshot.movies.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["m3", "m4"]);
        assert_eq!(snapshot.movies[0].rank, 1);
        assert_eq!(snapshot.series.len(), 1);
        assert_eq!(summary.movies.failed_pages, vec![1]);
        assert!(summary.series.failed_pages.is_empty());
    }

    #[tokio::test]
    async fn test_series_ranked_by_top250() {
        let listing = FakeListing::new()
            .page("series", 1, vec![series_item("unranked", 301, None), series_item("second", 302, Some(2))])
            .page("series", 2, vec![series_item("first", 303, Some(1))]);
        let pipeline = RefreshPipeline::new(Arc::new(listing), Arc::new(FakeArtwork::new()), options(2, 2));

        let (snapshot, _) = pipeline.build(date()).await.unwrap();

        let ranked: Vec<(u32, &str)> = snapshot.series.iter().map(|e| (e.rank, e.title.as_str())).collect();
        assert_eq!(ranked, vec![(1, "first"), (2, "second"), (3, "unranked")]);
        assert!(snapshot.series.iter().all(|e| e.media_type == MediaKind::Series));
        assert_eq!(snapshot.series[0].first_air_date.as_deref(), Some("2001-02-03"));
    }

    #[tokio::test]
    async fn test_artwork_concurrency_shared_across_catalogs() {
        let mut movies = Vec::new();
        let mut series = Vec::new();
        for i in 0..6 {
            movies.push(listing_item(&format!("m{}", i), Some(100 + i), 8.0));
            series.push(series_item(&format!("s{}", i), 200 + i, Some(i as u32 + 1)));
        }
        let listing = FakeListing::new().page("top500", 1, movies).page("series", 1, series);
        let artwork = Arc::new(FakeArtwork::new().latency(Duration::from_millis(3)));
        let pipeline = RefreshPipeline::new(Arc::new(listing), artwork.clone(), options(1, 2));

        let (snapshot, _) = pipeline.build(date()).await.unwrap();

        assert_eq!(snapshot.movies.len(), 6);
        assert_eq!(snapshot.series.len(), 6);
        assert!(artwork.peak() <= 2);
        // localized and unfiltered lookup for each of the 12 entries
        assert_eq!(artwork.call_log().len(), 24);
    }

    #[tokio::test]
    async fn test_zero_concurrency_is_an_error() {
        let listing = Arc::new(FakeListing::new());
        let pipeline = RefreshPipeline::new(listing.clone(), Arc::new(FakeArtwork::new()), options(1, 0));

        assert!(pipeline.build(date()).await.is_err());
        assert_eq!(listing.requests.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_options_from_config() {
        let mut config = Config::default();
        config.enrichment.concurrency = 7;
        config.enrichment.language = String::new();
        config.catalogs.series_pages = 3;

        let options = PipelineOptions::from_config(&config);

        assert_eq!(options.concurrency, 7);
        assert_eq!(options.image_language, None);
        assert_eq!(options.series.pages, 3);
        assert_eq!(options.movies.pages, config.catalogs.movies_pages);
        assert_eq!(options.movies.query.page_size(), config.catalogs.page_size);
    }
}
