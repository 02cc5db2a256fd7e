//! Consistency checks over the whole catalog state.
//!
//! The check rebuilds every index from the primary tables and compares the
//! result with the incrementally maintained indices. It costs a full pass
//! over the catalog and is meant for tests and diagnostics, never for the
//! mutation path.

use super::ids::{AlbumId, ArtistId, SongId};
use super::indices::Indices;
use super::links::SongAlbumLinks;
use super::models::{Album, Artist, Song};
use super::tables::Table;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Problem {
    DanglingSongArtist { song_id: SongId, artist_id: ArtistId },
    DanglingLink { song_id: SongId, album_id: AlbumId },
    AsymmetricLinks,
    DivergedIndex { index: &'static str },
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::DanglingSongArtist { song_id, artist_id } => {
                write!(f, "song {} references missing artist {}", song_id, artist_id)
            }
            Problem::DanglingLink { song_id, album_id } => write!(
                f,
                "link between song {} and album {} references a missing record",
                song_id, album_id
            ),
            Problem::AsymmetricLinks => {
                write!(f, "song->album and album->song links disagree")
            }
            Problem::DivergedIndex { index } => {
                write!(f, "index '{}' differs from a rebuild", index)
            }
        }
    }
}

pub(crate) fn check(
    artists: &Table<ArtistId, Artist>,
    songs: &Table<SongId, Song>,
    albums: &Table<AlbumId, Album>,
    links: &SongAlbumLinks,
    indices: &Indices,
) -> Vec<Problem> {
    let mut problems = Vec::new();

    let mut dangling_songs: Vec<&Song> = songs
        .iter()
        .map(|(_, song)| song)
        .filter(|song| !artists.contains(song.artist_id))
        .collect();
    dangling_songs.sort_by_key(|song| song.id);
    problems.extend(dangling_songs.into_iter().map(|song| Problem::DanglingSongArtist {
        song_id: song.id,
        artist_id: song.artist_id,
    }));

    let mut dangling_links: Vec<(SongId, AlbumId)> = links
        .iter()
        .filter(|(song_id, album_id)| !songs.contains(*song_id) || !albums.contains(*album_id))
        .collect();
    dangling_links.sort();
    problems.extend(
        dangling_links
            .into_iter()
            .map(|(song_id, album_id)| Problem::DanglingLink { song_id, album_id }),
    );

    if !links.is_mirrored() {
        problems.push(Problem::AsymmetricLinks);
    }

    let rebuilt = Indices::rebuild(songs, albums, links);
    if rebuilt.song_years != indices.song_years {
        problems.push(Problem::DivergedIndex {
            index: "song_years",
        });
    }
    if rebuilt.album_years != indices.album_years {
        problems.push(Problem::DivergedIndex {
            index: "album_years",
        });
    }
    if rebuilt.artist_songs != indices.artist_songs {
        problems.push(Problem::DivergedIndex {
            index: "artist_songs",
        });
    }
    if rebuilt.album_artists != indices.album_artists {
        problems.push(Problem::DivergedIndex {
            index: "album_artists",
        });
    }

    problems
}
