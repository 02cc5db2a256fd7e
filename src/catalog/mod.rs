mod error;
mod ids;
mod indices;
mod integrity;
mod links;
mod models;
mod store;
mod tables;
mod validation;

pub use error::{CatalogError, Missing, Result, Violation};
pub use ids::{AlbumId, ArtistId, EntityId, EntityKind, IdGenerator, SongId};
pub use indices::{AlbumArtistsIndex, Indices, SetIndex, YearIndex};
pub use integrity::Problem;
pub use links::SongAlbumLinks;
pub use models::*;
pub use store::Catalog;
pub use tables::Table;
pub use validation::{ValidationError, ValidationResult};
