//! The catalog facade.
//!
//! Every public operation runs as one unit of work under a single
//! reader/writer lock: validate, write the primary table, write the links,
//! write the indices. Validation always comes first, so a failing call
//! returns before anything is written and no caller ever observes a
//! partially applied operation.

use super::error::{CatalogError, Missing, Result, Violation};
use super::ids::{AlbumId, ArtistId, SongId};
use super::indices::Indices;
use super::integrity::{self, Problem};
use super::links::SongAlbumLinks;
use super::models::{
    Album, AlbumUpdate, Artist, ArtistType, ArtistUpdate, CatalogStats, Song, SongUpdate, Year,
};
use super::tables::Table;
use super::validation::{
    validate_album, validate_artist, validate_name, validate_song, validate_year,
    validate_year_range,
};
use crate::config::{CascadePolicy, CatalogConfig};
use parking_lot::RwLock;
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct CatalogState {
    artists: Table<ArtistId, Artist>,
    songs: Table<SongId, Song>,
    albums: Table<AlbumId, Album>,
    links: SongAlbumLinks,
    indices: Indices,
    version: u64,
}

impl CatalogState {
    /// Removes a song together with its links and index entries.
    fn remove_song(&mut self, song_id: SongId) -> Option<Song> {
        let song = self.songs.remove(song_id)?;
        for album_id in self.links.remove_song(song_id) {
            self.indices.link_removed(album_id, song.artist_id);
        }
        self.indices.song_removed(&song);
        Some(song)
    }

    fn songs_by_id<I>(&self, ids: I) -> Vec<Song>
    where
        I: IntoIterator<Item = SongId>,
    {
        ids.into_iter()
            .filter_map(|id| self.songs.get(id).cloned())
            .collect()
    }

    fn albums_by_id<I>(&self, ids: I) -> Vec<Album>
    where
        I: IntoIterator<Item = AlbumId>,
    {
        ids.into_iter()
            .filter_map(|id| self.albums.get(id).cloned())
            .collect()
    }

    fn bump_version(&mut self) {
        self.version += 1;
    }
}

/// An in-memory music catalog.
///
/// The catalog exclusively owns its records, every read returns copies.
/// Share it between threads as `Arc<Catalog>`.
#[derive(Debug, Default)]
pub struct Catalog {
    config: CatalogConfig,
    state: RwLock<CatalogState>,
}

impl Catalog {
    pub fn new(config: CatalogConfig) -> Self {
        Catalog {
            config,
            state: RwLock::new(CatalogState::default()),
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn cascade_policy(&self) -> CascadePolicy {
        self.config.cascade_policy
    }

    // =========================================================================
    // Create
    // =========================================================================

    pub fn create_artist(&self, name: &str, artist_type: ArtistType) -> Result<ArtistId> {
        validate_name(name)?;

        let mut guard = self.state.write();
        let state = &mut *guard;
        let (artist_id, _) = state.artists.insert_with(|id| Artist {
            id,
            name: name.to_string(),
            artist_type,
        })?;
        state.bump_version();

        debug!("Created artist {} ({})", artist_id, name);
        Ok(artist_id)
    }

    /// Creates a song of an existing artist.
    pub fn create_song(&self, name: &str, year: Year, artist_id: ArtistId) -> Result<SongId> {
        validate_name(name)?;
        validate_year(year)?;

        let mut guard = self.state.write();
        let state = &mut *guard;
        state.artists.require(artist_id)?;
        let (song_id, song) = state.songs.insert_with(|id| Song {
            id,
            name: name.to_string(),
            year,
            artist_id,
        })?;
        state.indices.song_added(song);
        state.bump_version();

        debug!("Created song {} ({}) of artist {}", song_id, name, artist_id);
        Ok(song_id)
    }

    pub fn create_album(&self, name: &str, year: Year) -> Result<AlbumId> {
        validate_name(name)?;
        validate_year(year)?;

        let mut guard = self.state.write();
        let state = &mut *guard;
        let (album_id, album) = state.albums.insert_with(|id| Album {
            id,
            name: name.to_string(),
            year,
        })?;
        state.indices.album_added(album);
        state.bump_version();

        debug!("Created album {} ({})", album_id, name);
        Ok(album_id)
    }

    // =========================================================================
    // Update
    // =========================================================================

    /// Replaces the given fields of an artist, returning the updated record.
    pub fn update_artist(&self, id: ArtistId, update: ArtistUpdate) -> Result<Artist> {
        let mut guard = self.state.write();
        let state = &mut *guard;
        let updated = update.apply_to(state.artists.require(id)?);
        validate_artist(&updated)?;
        if state.artists.replace(id, updated.clone()).as_ref() != Some(&updated) {
            state.bump_version();
        }

        debug!("Updated artist {}", id);
        Ok(updated)
    }

    /// Replaces the given fields of a song, returning the updated record.
    ///
    /// A new artist must exist. Year and artist changes move the song's
    /// index entries, an artist change also moves the derived album
    /// artists of every album the song is linked to.
    pub fn update_song(&self, id: SongId, update: SongUpdate) -> Result<Song> {
        let mut guard = self.state.write();
        let state = &mut *guard;
        let updated = update.apply_to(state.songs.require(id)?);
        validate_song(&updated)?;
        if let Some(artist_id) = update.artist_id {
            state.artists.require(artist_id)?;
        }
        let previous = state
            .songs
            .replace(id, updated.clone())
            .ok_or(CatalogError::NotFound(Missing::Song(id)))?;
        if previous != updated {
            state
                .indices
                .song_changed(&previous, &updated, state.links.albums_of(id));
            state.bump_version();
        }

        debug!("Updated song {}", id);
        Ok(updated)
    }

    /// Replaces the given fields of an album, returning the updated record.
    pub fn update_album(&self, id: AlbumId, update: AlbumUpdate) -> Result<Album> {
        let mut guard = self.state.write();
        let state = &mut *guard;
        let updated = update.apply_to(state.albums.require(id)?);
        validate_album(&updated)?;
        let previous = state
            .albums
            .replace(id, updated.clone())
            .ok_or(CatalogError::NotFound(Missing::Album(id)))?;
        if previous != updated {
            state.indices.album_changed(&previous, &updated);
            state.bump_version();
        }

        debug!("Updated album {}", id);
        Ok(updated)
    }

    // =========================================================================
    // Delete
    // =========================================================================

    /// Deletes an artist according to the configured [`CascadePolicy`].
    ///
    /// With `Reject` the call fails while any song references the artist.
    /// With `CascadeDelete` those songs are deleted first, along with their
    /// links and index entries.
    pub fn delete_artist(&self, id: ArtistId) -> Result<()> {
        let mut guard = self.state.write();
        let state = &mut *guard;
        state.artists.require(id)?;

        let song_ids: Vec<SongId> = state.indices.artist_songs.values(&id).copied().collect();
        if !song_ids.is_empty() && self.config.cascade_policy == CascadePolicy::Reject {
            return Err(Violation::ArtistHasSongs {
                artist_id: id,
                songs: song_ids.len(),
            }
            .into());
        }

        for song_id in song_ids.iter() {
            state.remove_song(*song_id);
        }
        state.artists.remove(id);
        state.bump_version();

        if song_ids.is_empty() {
            debug!("Deleted artist {}", id);
        } else {
            info!(
                "Deleted artist {} and cascaded to {} song(s)",
                id,
                song_ids.len()
            );
        }
        Ok(())
    }

    /// Deletes a song, its album links and its index entries.
    pub fn delete_song(&self, id: SongId) -> Result<()> {
        let mut guard = self.state.write();
        guard
            .remove_song(id)
            .ok_or(CatalogError::NotFound(Missing::Song(id)))?;
        guard.bump_version();

        debug!("Deleted song {}", id);
        Ok(())
    }

    /// Deletes an album and its links, the linked songs stay.
    pub fn delete_album(&self, id: AlbumId) -> Result<()> {
        let mut guard = self.state.write();
        let state = &mut *guard;
        let album = state
            .albums
            .remove(id)
            .ok_or(CatalogError::NotFound(Missing::Album(id)))?;
        let unlinked = state.links.remove_album(id);
        state.indices.album_removed(&album);
        state.bump_version();

        debug!("Deleted album {} and {} link(s)", id, unlinked.len());
        Ok(())
    }

    // =========================================================================
    // Links
    // =========================================================================

    /// Links a song to an album. Linking an already linked pair is a no-op.
    pub fn link(&self, song_id: SongId, album_id: AlbumId) -> Result<()> {
        let mut guard = self.state.write();
        let state = &mut *guard;
        let artist_id = state.songs.require(song_id)?.artist_id;
        state.albums.require(album_id)?;

        if state.links.link(song_id, album_id) {
            state.indices.link_added(album_id, artist_id);
            state.bump_version();
            debug!("Linked song {} to album {}", song_id, album_id);
        }
        Ok(())
    }

    /// Removes a link, failing with `NotFound` if the pair is not linked.
    pub fn unlink(&self, song_id: SongId, album_id: AlbumId) -> Result<()> {
        let mut guard = self.state.write();
        let state = &mut *guard;
        let artist_id = state.songs.require(song_id)?.artist_id;
        state.albums.require(album_id)?;

        if !state.links.unlink(song_id, album_id) {
            return Err(Missing::Link { song_id, album_id }.into());
        }
        state.indices.link_removed(album_id, artist_id);
        state.bump_version();

        debug!("Unlinked song {} from album {}", song_id, album_id);
        Ok(())
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    pub fn get_artist(&self, id: ArtistId) -> Result<Artist> {
        self.state.read().artists.require(id).cloned()
    }

    pub fn get_song(&self, id: SongId) -> Result<Song> {
        self.state.read().songs.require(id).cloned()
    }

    pub fn get_album(&self, id: AlbumId) -> Result<Album> {
        self.state.read().albums.require(id).cloned()
    }

    /// Songs released in exactly `year`, ordered by id.
    pub fn songs_by_year(&self, year: Year) -> Result<Vec<Song>> {
        validate_year(year)?;
        let state = self.state.read();
        Ok(state.songs_by_id(state.indices.song_years.by_year(year)))
    }

    /// Albums released in exactly `year`, ordered by id.
    pub fn albums_by_year(&self, year: Year) -> Result<Vec<Album>> {
        validate_year(year)?;
        let state = self.state.read();
        Ok(state.albums_by_id(state.indices.album_years.by_year(year)))
    }

    /// Songs released in `lo..=hi`, in non-decreasing year order.
    pub fn songs_by_year_range(&self, lo: Year, hi: Year) -> Result<Vec<Song>> {
        validate_year_range(lo, hi)?;
        let state = self.state.read();
        Ok(state.songs_by_id(state.indices.song_years.by_year_range(lo, hi)))
    }

    /// Albums released in `lo..=hi`, in non-decreasing year order.
    pub fn albums_by_year_range(&self, lo: Year, hi: Year) -> Result<Vec<Album>> {
        validate_year_range(lo, hi)?;
        let state = self.state.read();
        Ok(state.albums_by_id(state.indices.album_years.by_year_range(lo, hi)))
    }

    /// Albums a song is linked to.
    pub fn albums_of(&self, song_id: SongId) -> Result<Vec<Album>> {
        let state = self.state.read();
        state.songs.require(song_id)?;
        Ok(state.albums_by_id(state.links.albums_of(song_id)))
    }

    /// Songs linked to an album.
    pub fn songs_of(&self, album_id: AlbumId) -> Result<Vec<Song>> {
        let state = self.state.read();
        state.albums.require(album_id)?;
        Ok(state.songs_by_id(state.links.songs_of(album_id)))
    }

    /// Songs whose primary artist is `artist_id`.
    pub fn artist_songs(&self, artist_id: ArtistId) -> Result<Vec<Song>> {
        let state = self.state.read();
        state.artists.require(artist_id)?;
        Ok(state.songs_by_id(state.indices.artist_songs.values(&artist_id).copied()))
    }

    /// Artists with at least one song linked to `album_id`.
    pub fn album_artists(&self, album_id: AlbumId) -> Result<Vec<Artist>> {
        let state = self.state.read();
        state.albums.require(album_id)?;
        Ok(state
            .indices
            .album_artists
            .artists(album_id)
            .into_iter()
            .filter_map(|id| state.artists.get(id).cloned())
            .collect())
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    pub fn stats(&self) -> CatalogStats {
        let state = self.state.read();
        CatalogStats {
            artists: state.artists.len(),
            songs: state.songs.len(),
            albums: state.albums.len(),
            links: state.links.len(),
        }
    }

    /// Counter bumped by every call that changed the catalog. Failed calls
    /// and calls that leave every record as it was keep it unchanged.
    pub fn version(&self) -> u64 {
        self.state.read().version
    }

    /// Rebuilds every index from the primary tables and reports how the
    /// live state differs from it. An empty result means consistent.
    pub fn check_integrity(&self) -> Vec<Problem> {
        let state = self.state.read();
        let problems = integrity::check(
            &state.artists,
            &state.songs,
            &state.albums,
            &state.links,
            &state.indices,
        );
        if problems.is_empty() {
            info!("Catalog checked, no issues found.");
        } else {
            info!("Found {} problems:", problems.len());
            for problem in problems.iter() {
                warn!("- {}", problem);
            }
        }
        problems
    }
}

#[cfg(test)]
impl Catalog {
    /// A catalog whose id sequences continue after the given values.
    fn with_last_ids(config: CatalogConfig, artist: u64, song: u64, album: u64) -> Self {
        let state = CatalogState {
            artists: Table::with_last_id(artist),
            songs: Table::with_last_id(song),
            albums: Table::with_last_id(album),
            ..Default::default()
        };
        Catalog {
            config,
            state: RwLock::new(state),
        }
    }
}
