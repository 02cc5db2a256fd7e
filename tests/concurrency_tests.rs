//! Concurrent readers and writers over a shared catalog.

mod common;

use common::{assert_consistent, seeded_catalog, ALBUM_OPERA, ARTIST_QUEEN};
use musicdb::catalog::{ArtistType, Catalog, SongId};
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

const WRITERS: usize = 4;
const SONGS_PER_WRITER: usize = 50;

#[test]
fn test_catalog_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Catalog>();
}

#[test]
fn test_concurrent_creates_get_distinct_ids() {
    let catalog = Arc::new(Catalog::default());
    let artist = catalog.create_artist("Session Band", ArtistType::Band).unwrap();

    let handles: Vec<_> = (0..WRITERS)
        .map(|writer| {
            let catalog = Arc::clone(&catalog);
            thread::spawn(move || {
                (0..SONGS_PER_WRITER)
                    .map(|i| {
                        catalog
                            .create_song(&format!("take {} of {}", i, writer), 1990, artist)
                            .unwrap()
                    })
                    .collect::<Vec<SongId>>()
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(ids.insert(id), "id {} issued twice", id);
        }
    }

    assert_eq!(ids.len(), WRITERS * SONGS_PER_WRITER);
    assert_eq!(
        catalog.songs_by_year(1990).unwrap().len(),
        WRITERS * SONGS_PER_WRITER
    );
    assert_eq!(
        catalog.artist_songs(artist).unwrap().len(),
        WRITERS * SONGS_PER_WRITER
    );
    assert_consistent(&catalog);
}

#[test]
fn test_readers_never_see_half_applied_links() {
    let (catalog, seed) = seeded_catalog();
    let catalog = Arc::new(catalog);
    let queen = seed.artists[ARTIST_QUEEN];
    let opera = seed.albums[ALBUM_OPERA];

    let writer = {
        let catalog = Arc::clone(&catalog);
        thread::spawn(move || {
            for i in 0..200 {
                let song = catalog
                    .create_song(&format!("Bonus {}", i), 1975, queen)
                    .unwrap();
                catalog.link(song, opera).unwrap();
                if i % 2 == 0 {
                    catalog.delete_song(song).unwrap();
                }
            }
        })
    };

    let readers: Vec<_> = (0..3)
        .map(|_| {
            let catalog = Arc::clone(&catalog);
            thread::spawn(move || {
                for _ in 0..200 {
                    // A song listed on the album always lists the album back.
                    for song in catalog.songs_of(opera).unwrap() {
                        if let Ok(albums) = catalog.albums_of(song.id) {
                            assert!(albums.iter().any(|album| album.id == opera));
                        }
                    }
                    let artists = catalog.album_artists(opera).unwrap();
                    assert!(artists.iter().all(|artist| artist.id == queen));
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    assert_eq!(catalog.songs_of(opera).unwrap().len(), 2 + 100);
    assert_consistent(&catalog);
}

#[test]
fn test_concurrent_integrity_checks_during_writes() {
    let catalog = Arc::new(Catalog::default());
    let artist = catalog.create_artist("Composer", ArtistType::Composer).unwrap();

    let writer = {
        let catalog = Arc::clone(&catalog);
        thread::spawn(move || {
            for year in 1900..2000 {
                let album = catalog.create_album("Suite", year).unwrap();
                let song = catalog.create_song("Movement", year, artist).unwrap();
                catalog.link(song, album).unwrap();
            }
        })
    };

    let checker = {
        let catalog = Arc::clone(&catalog);
        thread::spawn(move || {
            for _ in 0..20 {
                assert!(catalog.check_integrity().is_empty());
            }
        })
    };

    writer.join().unwrap();
    checker.join().unwrap();
    assert_eq!(catalog.albums_by_year_range(1900, 1999).unwrap().len(), 100);
}
