//! Entity records stored in the catalog.
//!
//! Records handed out by the catalog are copies; the canonical values can
//! only change through the [`Catalog`](super::Catalog) facade.

use super::ids::{AlbumId, ArtistId, SongId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A song or album release year.
pub type Year = i32;

// =============================================================================
// Enumerations
// =============================================================================

/// Artist type classification
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtistType {
    Singer,
    Band,
    Composer,
}

impl ArtistType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtistType::Singer => "singer",
            ArtistType::Band => "band",
            ArtistType::Composer => "composer",
        }
    }
}

impl fmt::Display for ArtistType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtistType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "singer" => Ok(ArtistType::Singer),
            "band" => Ok(ArtistType::Band),
            "composer" => Ok(ArtistType::Composer),
            other => Err(format!(
                "Invalid artist type '{}'. Valid types are: singer, band, composer",
                other
            )),
        }
    }
}

// =============================================================================
// Core Entities
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    pub artist_type: ArtistType,
}

/// A song always has exactly one primary artist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: SongId,
    pub name: String,
    pub year: Year,
    pub artist_id: ArtistId,
}

/// Albums carry no artist reference, their artists are derived from the
/// songs linked to them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    pub name: String,
    pub year: Year,
}

// =============================================================================
// Partial updates
// =============================================================================

/// Fields to replace on an artist, `None` keeps the current value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArtistUpdate {
    pub name: Option<String>,
    pub artist_type: Option<ArtistType>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SongUpdate {
    pub name: Option<String>,
    pub year: Option<Year>,
    pub artist_id: Option<ArtistId>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AlbumUpdate {
    pub name: Option<String>,
    pub year: Option<Year>,
}

impl ArtistUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.artist_type.is_none()
    }

    pub(crate) fn apply_to(&self, artist: &Artist) -> Artist {
        Artist {
            id: artist.id,
            name: self.name.clone().unwrap_or_else(|| artist.name.clone()),
            artist_type: self.artist_type.unwrap_or(artist.artist_type),
        }
    }
}

impl SongUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.year.is_none() && self.artist_id.is_none()
    }

    pub(crate) fn apply_to(&self, song: &Song) -> Song {
        Song {
            id: song.id,
            name: self.name.clone().unwrap_or_else(|| song.name.clone()),
            year: self.year.unwrap_or(song.year),
            artist_id: self.artist_id.unwrap_or(song.artist_id),
        }
    }
}

impl AlbumUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.year.is_none()
    }

    pub(crate) fn apply_to(&self, album: &Album) -> Album {
        Album {
            id: album.id,
            name: self.name.clone().unwrap_or_else(|| album.name.clone()),
            year: self.year.unwrap_or(album.year),
        }
    }
}

/// Record and link counts, one entry per table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub artists: usize,
    pub songs: usize,
    pub albums: usize,
    pub links: usize,
}
