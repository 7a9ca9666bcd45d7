pub mod artwork;
pub mod catalog_entry;
pub mod listing;
pub mod media;
pub mod snapshot;

pub use artwork::{ImageDescriptor, SearchMatch};
pub use catalog_entry::CatalogEntry;
pub use listing::{ExternalIds, ListingItem, PosterRef, Premiere, Ratings, Votes};
pub use media::MediaKind;
pub use snapshot::Snapshot;
