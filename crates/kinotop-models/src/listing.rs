use serde::{Deserialize, Serialize};

/// Raw record from the listing API, before normalization.
///
/// Every field is optional: the listing API omits whatever was not selected
/// or is unknown, and a missing field must never fail a whole page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListingItem {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub external_id: Option<ExternalIds>,
    pub premiere: Option<Premiere>,
    pub rating: Option<Ratings>,
    pub votes: Option<Votes>,
    /// Position in the listing's own top-250 ranking, when the title has one.
    pub top250: Option<u32>,
    pub poster: Option<PosterRef>,
    pub is_series: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExternalIds {
    pub imdb: Option<String>,
    pub tmdb: Option<u64>,
    #[serde(rename = "kpHD")]
    pub kp_hd: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Premiere {
    pub world: Option<String>,
    pub russia: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Ratings {
    pub kp: Option<f64>,
    pub imdb: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Votes {
    pub kp: Option<f64>,
    pub imdb: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PosterRef {
    pub url: Option<String>,
    pub preview_url: Option<String>,
}

impl ListingItem {
    pub fn tmdb_id(&self) -> Option<u64> {
        self.external_id.as_ref().and_then(|ids| ids.tmdb)
    }

    pub fn rating_kp(&self) -> Option<f64> {
        self.rating.as_ref().and_then(|r| r.kp)
    }

    pub fn world_premiere(&self) -> Option<&str> {
        self.premiere.as_ref().and_then(|p| p.world.as_deref())
    }

    pub fn poster_url(&self) -> Option<&str> {
        self.poster
            .as_ref()
            .and_then(|p| p.url.as_deref())
            .filter(|url| !url.is_empty())
    }
}
