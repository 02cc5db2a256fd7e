//! Catalog fixtures built from the seed document.
#![allow(dead_code)]

use super::constants::TEST_CATALOG_JSON;
use musicdb::catalog::{Album, AlbumId, Artist, ArtistId, Catalog, Song, SongId};
use musicdb::config::{CascadePolicy, CatalogConfig};
use musicdb::seed::{SeedCatalog, SeedReport};

/// A catalog holding the test seed, with the default cascade policy.
pub fn seeded_catalog() -> (Catalog, SeedReport) {
    seeded_catalog_with_policy(CascadePolicy::Reject)
}

pub fn seeded_catalog_with_policy(policy: CascadePolicy) -> (Catalog, SeedReport) {
    let catalog = Catalog::new(CatalogConfig::with_cascade_policy(policy));
    let seed = SeedCatalog::from_json(TEST_CATALOG_JSON).expect("test seed should parse");
    let report = seed.apply(&catalog).expect("test seed should apply");
    (catalog, report)
}

/// Fails the test with the list of problems if any index diverged.
pub fn assert_consistent(catalog: &Catalog) {
    let problems = catalog.check_integrity();
    assert!(problems.is_empty(), "integrity problems: {:?}", problems);
}

pub fn ids_of_songs(songs: &[Song]) -> Vec<SongId> {
    songs.iter().map(|song| song.id).collect()
}

pub fn ids_of_albums(albums: &[Album]) -> Vec<AlbumId> {
    albums.iter().map(|album| album.id).collect()
}

pub fn ids_of_artists(artists: &[Artist]) -> Vec<ArtistId> {
    artists.iter().map(|artist| artist.id).collect()
}
