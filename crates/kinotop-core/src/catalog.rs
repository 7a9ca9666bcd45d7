use kinotop_models::{ListingItem, MediaKind};
use kinotop_sources::ListingQuery;

/// Rank assigned to series that are not in the listing's own top 250.
const UNRANKED_TOP250: u32 = 251;

/// How fetched items are ordered before ranks are assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingOrder {
    /// Keep the order the listing API returned.
    AsListed,
    /// Stable sort by the `top250` hint, unranked titles last.
    Top250,
}

impl ListingOrder {
    pub fn apply(self, items: &mut [ListingItem]) {
        match self {
            ListingOrder::AsListed => {}
            ListingOrder::Top250 => {
                items.sort_by_key(|item| item.top250.unwrap_or(UNRANKED_TOP250));
            }
        }
    }
}

/// Everything needed to build one catalog of the snapshot.
#[derive(Debug, Clone)]
pub struct CatalogSpec {
    pub kind: MediaKind,
    /// Collection whose cover image heads this catalog.
    pub cover_slug: &'static str,
    pub query: ListingQuery,
    pub pages: u32,
    pub order: ListingOrder,
}

impl CatalogSpec {
    /// Top 500 movies, best rated first.
    pub fn movies(page_size: u32, pages: u32) -> Self {
        let query = ListingQuery::new(page_size)
            .params(
                "selectFields",
                ["externalId", "name", "premiere", "rating", "poster", "lists"],
            )
            .param("sortField", "rating.kp")
            .param("sortType", "-1")
            .param("lists", "top500");

        Self {
            kind: MediaKind::Movie,
            cover_slug: "top500",
            query,
            pages,
            order: ListingOrder::AsListed,
        }
    }

    /// Top 250 series, without children's, documentary and reality shows.
    pub fn series(page_size: u32, pages: u32) -> Self {
        let query = ListingQuery::new(page_size)
            .params(
                "selectFields",
                [
                    "externalId",
                    "name",
                    "premiere",
                    "rating",
                    "poster",
                    "top250",
                    "votes",
                    "isSeries",
                ],
            )
            .param("notNullFields", "name")
            .params("genres.name", ["!детский", "!документальный", "!реальное ТВ"])
            .param("votes.kp", "9999-9999999")
            .params("sortField", ["top250", "rating.kp"])
            .params("sortType", ["-1", "-1"])
            .param("isSeries", "true");

        Self {
            kind: MediaKind::Series,
            cover_slug: "series-top250",
            query,
            pages,
            order: ListingOrder::Top250,
        }
    }
}
