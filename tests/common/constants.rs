//! Keys and counts of the seed in `tests/fixtures/test-catalog.json`.
//!
//! When the fixture changes, update only this file.
#![allow(dead_code)]

pub const TEST_CATALOG_JSON: &str = include_str!("../fixtures/test-catalog.json");

// ============================================================================
// Artists
// ============================================================================

/// "Queen", band with three songs
pub const ARTIST_QUEEN: &str = "queen";

/// "David Bowie", singer with one song
pub const ARTIST_BOWIE: &str = "bowie";

/// "Ennio Morricone", composer with one song
pub const ARTIST_MORRICONE: &str = "morricone";

// ============================================================================
// Songs
// ============================================================================

pub const SONG_BOHEMIAN: &str = "bohemian";
pub const SONG_LOVE: &str = "love";
/// Queen song linked to both "Hot Space" and "Heroes"
pub const SONG_PRESSURE: &str = "pressure";
pub const SONG_HEROES: &str = "heroes";
pub const SONG_ECSTASY: &str = "ecstasy";

// ============================================================================
// Albums
// ============================================================================

/// "A Night at the Opera" (1975)
pub const ALBUM_OPERA: &str = "opera";

/// "Hot Space" (1982)
pub const ALBUM_HOT_SPACE: &str = "hot_space";

/// "Heroes" (1977), holds songs of Bowie and Queen
pub const ALBUM_HEROES: &str = "heroes_lp";

/// "Western Themes" (1966)
pub const ALBUM_WESTERNS: &str = "westerns";

// ============================================================================
// Counts
// ============================================================================

pub const ARTISTS_COUNT: usize = 3;
pub const SONGS_COUNT: usize = 5;
pub const ALBUMS_COUNT: usize = 4;
pub const LINKS_COUNT: usize = 6;
