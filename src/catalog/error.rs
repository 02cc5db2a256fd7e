use super::ids::{AlbumId, ArtistId, EntityId, EntityKind, SongId};
use super::validation::ValidationError;
use std::fmt;
use thiserror::Error;

/// Errors returned by catalog operations.
///
/// Every failing call leaves the catalog exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Not found: {0}")]
    NotFound(Missing),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(Violation),

    #[error("No {kind} identifiers left to assign")]
    IdentifierExhausted { kind: EntityKind },

    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// What a `NotFound` error could not find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    Artist(ArtistId),
    Song(SongId),
    Album(AlbumId),
    Link { song_id: SongId, album_id: AlbumId },
}

impl Missing {
    /// The missing record with the given id.
    pub fn record<I: EntityId>(id: I) -> Missing {
        match I::KIND {
            EntityKind::Artist => Missing::Artist(ArtistId::new(id.raw())),
            EntityKind::Song => Missing::Song(SongId::new(id.raw())),
            EntityKind::Album => Missing::Album(AlbumId::new(id.raw())),
        }
    }
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Missing::Artist(id) => write!(f, "artist {}", id),
            Missing::Song(id) => write!(f, "song {}", id),
            Missing::Album(id) => write!(f, "album {}", id),
            Missing::Link { song_id, album_id } => {
                write!(f, "link between song {} and album {}", song_id, album_id)
            }
        }
    }
}

/// The rule a `ConstraintViolation` error would have broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    ArtistHasSongs { artist_id: ArtistId, songs: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::ArtistHasSongs { artist_id, songs } => write!(
                f,
                "artist {} is still referenced by {} song(s)",
                artist_id, songs
            ),
        }
    }
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }
}

impl From<Missing> for CatalogError {
    fn from(missing: Missing) -> Self {
        CatalogError::NotFound(missing)
    }
}

impl From<Violation> for CatalogError {
    fn from(violation: Violation) -> Self {
        CatalogError::ConstraintViolation(violation)
    }
}
