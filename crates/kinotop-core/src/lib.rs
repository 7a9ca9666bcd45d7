pub mod catalog;
pub mod enrich;
pub mod fetcher;
pub mod limiter;
pub mod normalize;
pub mod pipeline;
pub mod snapshot;

#[cfg(test)]
mod testing;

pub use catalog::{CatalogSpec, ListingOrder};
pub use enrich::{resolve_cover, EnrichError, EnrichStats, Enricher};
pub use fetcher::{fetch_pages, FetchReport};
pub use limiter::{Limiter, LimiterError};
pub use normalize::normalize;
pub use pipeline::{CatalogSummary, PipelineOptions, RefreshPipeline, RefreshSummary};
pub use snapshot::{assemble, today_utc, SnapshotError, SnapshotWriter};
