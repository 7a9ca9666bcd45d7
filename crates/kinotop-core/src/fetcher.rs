use futures::future::join_all;
use kinotop_models::ListingItem;
use kinotop_sources::{ListingQuery, ListingSource};
use tracing::{debug, warn};

/// Items from every page that loaded, plus the pages that did not.
#[derive(Debug, Default)]
pub struct FetchReport {
    pub items: Vec<ListingItem>,
    pub failed_pages: Vec<u32>,
}

/// Fetch pages `1..=pages` of `query` concurrently and concatenate them in
/// page order. A failed page is logged and contributes nothing.
pub async fn fetch_pages(source: &dyn ListingSource, query: &ListingQuery, pages: u32) -> FetchReport {
    let requests = (1..=pages).map(|page| async move { (page, source.fetch_page(query, page).await) });
    // join_all yields in input order, whatever order the requests finish in
    let outcomes = join_all(requests).await;

    let mut report = FetchReport::default();
    for (page, outcome) in outcomes {
        match outcome {
            Ok(items) => {
                debug!(source = source.source_name(), page, count = items.len(), "Fetched listing page");
                report.items.extend(items);
            }
            Err(e) => {
                warn!(
                    source = source.source_name(),
                    page,
                    rate_limited = e.is_rate_limited(),
                    error = %e,
                    "Listing page failed, skipping it"
                );
                report.failed_pages.push(page);
            }
        }
    }
    report
}
