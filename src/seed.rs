//! Seed documents for populating a catalog.
//!
//! A seed is a JSON document in which songs and links refer to other
//! entries through keys local to the document. Applying it creates every
//! entry through the [`Catalog`] facade and reports the id each key got.

use crate::catalog::{AlbumId, ArtistId, ArtistType, Catalog, SongId, Year};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedArtist {
    pub key: String,
    pub name: String,
    pub artist_type: ArtistType,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedSong {
    pub key: String,
    pub name: String,
    pub year: Year,
    /// Key of the song's artist.
    pub artist: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedAlbum {
    pub key: String,
    pub name: String,
    pub year: Year,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedLink {
    pub song: String,
    pub album: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SeedCatalog {
    pub artists: Vec<SeedArtist>,
    pub songs: Vec<SeedSong>,
    pub albums: Vec<SeedAlbum>,
    pub links: Vec<SeedLink>,
}

/// Ids assigned to the seed's keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub artists: BTreeMap<String, ArtistId>,
    pub songs: BTreeMap<String, SongId>,
    pub albums: BTreeMap<String, AlbumId>,
    pub links: usize,
}

impl SeedCatalog {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file: {:?}", path))?;
        Self::from_json(&content).with_context(|| format!("Failed to parse seed file: {:?}", path))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Checks that keys are unique per kind and that every reference names
    /// a key of the document.
    pub fn check_keys(&self) -> Result<()> {
        let artists = unique_keys("artist", self.artists.iter().map(|a| a.key.as_str()))?;
        let songs = unique_keys("song", self.songs.iter().map(|s| s.key.as_str()))?;
        let albums = unique_keys("album", self.albums.iter().map(|a| a.key.as_str()))?;

        for song in self.songs.iter() {
            if !artists.contains(song.artist.as_str()) {
                bail!("Song '{}' references unknown artist '{}'", song.key, song.artist);
            }
        }
        for link in self.links.iter() {
            if !songs.contains(link.song.as_str()) {
                bail!("Link references unknown song '{}'", link.song);
            }
            if !albums.contains(link.album.as_str()) {
                bail!("Link references unknown album '{}'", link.album);
            }
        }
        Ok(())
    }

    /// Creates every entry of the seed in `catalog`.
    ///
    /// Keys are checked before anything is created. A record the catalog
    /// rejects stops the import, entries created before it stay.
    pub fn apply(&self, catalog: &Catalog) -> Result<SeedReport> {
        self.check_keys()?;
        let mut report = SeedReport::default();

        for artist in self.artists.iter() {
            let id = catalog
                .create_artist(&artist.name, artist.artist_type)
                .with_context(|| format!("Failed to create artist '{}'", artist.key))?;
            report.artists.insert(artist.key.clone(), id);
        }
        for album in self.albums.iter() {
            let id = catalog
                .create_album(&album.name, album.year)
                .with_context(|| format!("Failed to create album '{}'", album.key))?;
            report.albums.insert(album.key.clone(), id);
        }
        for song in self.songs.iter() {
            let artist_id = lookup(&report.artists, "artist", &song.artist)?;
            let id = catalog
                .create_song(&song.name, song.year, artist_id)
                .with_context(|| format!("Failed to create song '{}'", song.key))?;
            report.songs.insert(song.key.clone(), id);
        }
        for link in self.links.iter() {
            let song_id = lookup(&report.songs, "song", &link.song)?;
            let album_id = lookup(&report.albums, "album", &link.album)?;
            catalog.link(song_id, album_id).with_context(|| {
                format!("Failed to link song '{}' to album '{}'", link.song, link.album)
            })?;
            report.links += 1;
        }

        info!(
            "Seeded catalog: {} artists, {} songs, {} albums, {} links",
            report.artists.len(),
            report.songs.len(),
            report.albums.len(),
            report.links
        );
        Ok(report)
    }
}

fn unique_keys<'a>(kind: &str, keys: impl Iterator<Item = &'a str>) -> Result<HashSet<&'a str>> {
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key) {
            bail!("Duplicate {} key '{}'", kind, key);
        }
    }
    Ok(seen)
}

fn lookup<I: Copy>(ids: &BTreeMap<String, I>, kind: &str, key: &str) -> Result<I> {
    ids.get(key)
        .copied()
        .with_context(|| format!("Unknown {} key '{}'", kind, key))
}
