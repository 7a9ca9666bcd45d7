use serde::{Deserialize, Serialize};

/// Which catalog a record belongs to.
///
/// Serialized the way the host detail view expects its `method`:
/// `"movie"` for films and `"tv"` for series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MediaKind {
    #[serde(rename = "movie")]
    Movie,
    #[serde(rename = "tv")]
    Series,
}

impl MediaKind {
    /// Path segment used by the artwork API (`/movie/{id}`, `/tv/{id}`).
    pub fn api_segment(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "tv",
        }
    }

    /// Query parameter that narrows a title search to a release year.
    pub fn year_param(&self) -> &'static str {
        match self {
            MediaKind::Movie => "year",
            MediaKind::Series => "first_air_date_year",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.api_segment())
    }
}
