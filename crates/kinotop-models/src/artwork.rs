use serde::{Deserialize, Serialize};

/// One poster returned by the artwork API's images endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ImageDescriptor {
    pub file_path: Option<String>,
    /// Language tag of the artwork (`ru`, `en`, ...), `None` for textless art.
    #[serde(rename = "iso_639_1")]
    pub language: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
}

/// One hit from a title search, in the artwork API's ranking order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchMatch {
    pub id: u64,
    /// Movie title or series name.
    #[serde(alias = "name")]
    pub title: Option<String>,
    pub poster_path: Option<String>,
}
