pub mod error;
pub mod factory;
pub mod http;
pub mod kinopoisk;
pub mod query;
pub mod tmdb;
pub mod traits;

pub use error::SourceError;
pub use factory::{create_sources, Sources};
pub use kinopoisk::KinopoiskClient;
pub use query::ListingQuery;
pub use tmdb::TmdbClient;
pub use traits::{ArtworkSource, ListingSource};
