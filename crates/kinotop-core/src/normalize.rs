use chrono::NaiveDate;
use kinotop_models::{CatalogEntry, ListingItem, MediaKind};

/// Map listing items to ranked catalog entries.
///
/// Ranks follow the input order exactly (`1..=N`); nothing is re-sorted
/// here, so any ordering must be applied before calling this.
pub fn normalize(items: &[ListingItem], kind: MediaKind) -> Vec<CatalogEntry> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| normalize_item(index as u32 + 1, item, kind))
        .collect()
}

fn normalize_item(rank: u32, item: &ListingItem, kind: MediaKind) -> CatalogEntry {
    let title = item.name.clone().unwrap_or_default();
    let date = item.world_premiere().and_then(premiere_date);

    let mut entry = CatalogEntry::new(rank, kind, title, date);
    entry.id = item.tmdb_id();
    entry.vote_average = item.rating_kp();
    entry.poster_path = item.poster_url().map(str::to_string);
    entry
}

/// `2001-02-03T00:00:00.000Z` -> `2001-02-03`. Anything that does not start
/// with a valid calendar date is treated as unknown.
pub fn premiere_date(raw: &str) -> Option<String> {
    let day = raw.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .ok()
        .map(|date| date.format("%Y-%m-%d").to_string())
}
