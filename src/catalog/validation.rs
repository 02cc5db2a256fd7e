//! Validation for catalog entities.
//!
//! Every check here runs before the catalog writes anything, so a failed
//! validation never leaves partial state behind.

use super::models::{Album, Artist, Song, Year};
use std::fmt;

/// Validation error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyField { field: &'static str },
    NegativeValue { field: &'static str, value: i64 },
    InvalidRange { lo: Year, hi: Year },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyField { field } => {
                write!(f, "Field '{}' is required but was empty", field)
            }
            ValidationError::NegativeValue { field, value } => {
                write!(f, "Field '{}' must be non-negative, got {}", field, value)
            }
            ValidationError::InvalidRange { lo, hi } => {
                write!(f, "Invalid year range {}..={}, lower bound exceeds upper", lo, hi)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

pub fn validate_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyField { field: "name" });
    }
    Ok(())
}

pub fn validate_year(year: Year) -> ValidationResult<()> {
    if year < 0 {
        return Err(ValidationError::NegativeValue {
            field: "year",
            value: year as i64,
        });
    }
    Ok(())
}

/// Validate an inclusive year range, both bounds must be valid years.
pub fn validate_year_range(lo: Year, hi: Year) -> ValidationResult<()> {
    validate_year(lo)?;
    validate_year(hi)?;
    if lo > hi {
        return Err(ValidationError::InvalidRange { lo, hi });
    }
    Ok(())
}

/// Validate an artist entity
pub fn validate_artist(artist: &Artist) -> ValidationResult<()> {
    validate_name(&artist.name)
}

/// Validate a song entity (without foreign key check)
pub fn validate_song(song: &Song) -> ValidationResult<()> {
    validate_name(&song.name)?;
    validate_year(song.year)
}

/// Validate an album entity
pub fn validate_album(album: &Album) -> ValidationResult<()> {
    validate_name(&album.name)?;
    validate_year(album.year)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ids::{AlbumId, ArtistId, SongId};
    use crate::catalog::models::ArtistType;

    fn make_valid_artist() -> Artist {
        Artist {
            id: ArtistId::new(1),
            name: "Test Artist".to_string(),
            artist_type: ArtistType::Singer,
        }
    }

    fn make_valid_song() -> Song {
        Song {
            id: SongId::new(1),
            name: "Test Song".to_string(),
            year: 2001,
            artist_id: ArtistId::new(1),
        }
    }

    fn make_valid_album() -> Album {
        Album {
            id: AlbumId::new(1),
            name: "Test Album".to_string(),
            year: 2001,
        }
    }

    #[test]
    fn test_validate_artist_valid() {
        assert!(validate_artist(&make_valid_artist()).is_ok());
    }

    #[test]
    fn test_validate_artist_empty_name() {
        let mut artist = make_valid_artist();
        artist.name = "  ".to_string(); // whitespace only
        let err = validate_artist(&artist).unwrap_err();
        assert!(matches!(err, ValidationError::EmptyField { field: "name" }));
    }

    #[test]
    fn test_validate_song_valid() {
        assert!(validate_song(&make_valid_song()).is_ok());
    }

    #[test]
    fn test_validate_song_negative_year() {
        let mut song = make_valid_song();
        song.year = -1;
        let err = validate_song(&song).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::NegativeValue {
                field: "year",
                value: -1
            }
        ));
    }

    #[test]
    fn test_validate_album_year_zero_is_allowed() {
        let mut album = make_valid_album();
        album.year = 0;
        assert!(validate_album(&album).is_ok());
    }

    #[test]
    fn test_validate_album_empty_name() {
        let mut album = make_valid_album();
        album.name = String::new();
        let err = validate_album(&album).unwrap_err();
        assert!(matches!(err, ValidationError::EmptyField { field: "name" }));
    }

    #[test]
    fn test_validate_year_range() {
        assert!(validate_year_range(1970, 1970).is_ok());
        assert!(validate_year_range(1970, 1980).is_ok());
        assert_eq!(
            validate_year_range(1980, 1970),
            Err(ValidationError::InvalidRange { lo: 1980, hi: 1970 })
        );
        assert!(matches!(
            validate_year_range(-5, 1970),
            Err(ValidationError::NegativeValue { .. })
        ));
    }
}
