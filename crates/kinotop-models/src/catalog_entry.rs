use serde::{Deserialize, Serialize};
use crate::media::MediaKind;

/// One ranked movie or series in the snapshot.
///
/// Field names match what the plugin hands to the host card renderer, so an
/// entry can be displayed without any remapping on the consumer side.
/// Movies carry `release_date`, series carry `first_air_date`; exactly one of
/// the two is ever present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntry {
    pub rank: u32,
    /// Artwork API identifier; `None` when neither the listing nor a title
    /// search could provide one.
    pub id: Option<u64>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_air_date: Option<String>,
    pub vote_average: Option<f64>,
    pub poster_path: Option<String>,
    pub media_type: MediaKind,
}

impl CatalogEntry {
    /// Create an entry with the date stored under the key its kind uses.
    /// An unknown date is kept as the empty string.
    pub fn new(rank: u32, kind: MediaKind, title: String, date: Option<String>) -> Self {
        let date = date.unwrap_or_default();
        let (release_date, first_air_date) = match kind {
            MediaKind::Movie => (Some(date), None),
            MediaKind::Series => (None, Some(date)),
        };

        Self {
            rank,
            id: None,
            title,
            release_date,
            first_air_date,
            vote_average: None,
            poster_path: None,
            media_type: kind,
        }
    }

    pub fn kind(&self) -> MediaKind {
        self.media_type
    }

    /// `YYYY-MM-DD`, or `""` when unknown.
    pub fn date(&self) -> &str {
        self.release_date
            .as_deref()
            .or(self.first_air_date.as_deref())
            .unwrap_or("")
    }

    /// Release year parsed from the date, used to narrow title searches.
    pub fn year(&self) -> Option<i32> {
        self.date().get(..4).and_then(|y| y.parse().ok())
    }

    pub fn needs_id(&self) -> bool {
        self.id.is_none()
    }

    pub fn needs_poster(&self) -> bool {
        self.poster_path.is_none()
    }
}
