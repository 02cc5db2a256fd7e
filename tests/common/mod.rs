//! Common test infrastructure
//!
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{seeded_catalog, ALBUM_OPERA};
//!
//! #[test]
//! fn test_songs_of_opera() {
//!     let (catalog, seed) = seeded_catalog();
//!     let songs = catalog.songs_of(seed.albums[ALBUM_OPERA]).unwrap();
//!     assert_eq!(songs.len(), 2);
//! }
//! ```

mod constants;
mod fixtures;

pub use constants::*;
#[allow(unused_imports)]
pub use fixtures::{
    assert_consistent, ids_of_albums, ids_of_artists, ids_of_songs, seeded_catalog,
    seeded_catalog_with_policy,
};
