use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::catalog_entry::CatalogEntry;

/// The published document: both ranked catalogs plus their collection covers.
///
/// Rebuilt from scratch on every refresh and replaced wholesale on disk.
/// Consumers must accept `null` covers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    /// Build date, UTC, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub movies: Vec<CatalogEntry>,
    pub series: Vec<CatalogEntry>,
    pub movies_cover: Option<String>,
    pub series_cover: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MediaKind;

    #[test]
    fn test_snapshot_wire_shape() {
        let snapshot = Snapshot {
            date: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
            movies: vec![CatalogEntry::new(1, MediaKind::Movie, "Heat".to_string(), None)],
            series: Vec::new(),
            movies_cover: Some("https://image.example/top500.jpg".to_string()),
            series_cover: None,
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["date"], "2026-10-19");
        assert_eq!(json["movies"].as_array().unwrap().len(), 1);
        assert_eq!(json["series"].as_array().unwrap().len(), 0);
        assert_eq!(json["movies_cover"], "https://image.example/top500.jpg");
        assert!(json["series_cover"].is_null());
    }

    #[test]
    fn test_snapshot_tolerates_missing_covers() {
        let json = r#"{ "date": "2026-01-02", "movies": [], "series": [], "movies_cover": null, "series_cover": null }"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.movies_cover, None);
        assert_eq!(snapshot.series_cover, None);
    }
}
