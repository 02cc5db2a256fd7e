//! Secondary indices derived from the primary tables and the link set.
//!
//! Indices hold ids only, never copies of records. Each catalog mutation
//! calls the narrow update methods below with exactly the entries it
//! affects; [`Indices::rebuild`] recomputes everything from scratch and is
//! only used to verify the incremental path.

use super::ids::{AlbumId, ArtistId, SongId};
use super::links::SongAlbumLinks;
use super::models::{Album, Song, Year};
use super::tables::Table;
use std::collections::btree_map::Entry as BTreeEntry;
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::hash::Hash;

// =============================================================================
// SetIndex
// =============================================================================

/// A key to set-of-values mapping. Empty sets are never kept, so two
/// indices holding the same pairs always compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetIndex<K: Eq + Hash, V: Ord> {
    map: HashMap<K, BTreeSet<V>>,
    total: usize,
}

impl<K: Eq + Hash, V: Ord> Default for SetIndex<K, V> {
    fn default() -> Self {
        SetIndex {
            map: HashMap::new(),
            total: 0,
        }
    }
}

impl<K: Eq + Hash, V: Ord> SetIndex<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: K, value: V) -> bool {
        let added = self.map.entry(key).or_default().insert(value);
        if added {
            self.total += 1;
        }
        added
    }

    pub fn remove(&mut self, key: &K, value: &V) -> bool {
        let Some(values) = self.map.get_mut(key) else {
            return false;
        };
        let removed = values.remove(value);
        if removed {
            self.total -= 1;
        }
        if values.is_empty() {
            self.map.remove(key);
        }
        removed
    }

    pub fn remove_key(&mut self, key: &K) -> Option<BTreeSet<V>> {
        let values = self.map.remove(key)?;
        self.total -= values.len();
        Some(values)
    }

    pub fn get(&self, key: &K) -> Option<&BTreeSet<V>> {
        self.map.get(key)
    }

    pub fn values<'a>(&'a self, key: &K) -> impl Iterator<Item = &'a V> + 'a {
        self.map.get(key).into_iter().flatten()
    }

    pub fn contains(&self, key: &K, value: &V) -> bool {
        self.map.get(key).is_some_and(|values| values.contains(value))
    }

    pub fn count(&self, key: &K) -> usize {
        self.map.get(key).map_or(0, BTreeSet::len)
    }

    /// Number of (key, value) pairs.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &BTreeSet<V>)> {
        self.map.iter()
    }
}

// =============================================================================
// YearIndex
// =============================================================================

/// Exact-year and year-range lookups for one entity kind.
///
/// The two structures are kept separately: a hash map answers exact-year
/// lookups, an ordered map answers ranges in year order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearIndex<I: Ord + Copy + Hash> {
    exact: SetIndex<Year, I>,
    ordered: BTreeMap<Year, BTreeSet<I>>,
}

impl<I: Ord + Copy + Hash> Default for YearIndex<I> {
    fn default() -> Self {
        YearIndex {
            exact: SetIndex::new(),
            ordered: BTreeMap::new(),
        }
    }
}

impl<I: Ord + Copy + Hash> YearIndex<I> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, year: Year, id: I) {
        self.exact.insert(year, id);
        self.ordered.entry(year).or_default().insert(id);
    }

    pub fn remove(&mut self, year: Year, id: I) {
        self.exact.remove(&year, &id);
        if let BTreeEntry::Occupied(mut entry) = self.ordered.entry(year) {
            entry.get_mut().remove(&id);
            if entry.get().is_empty() {
                entry.remove();
            }
        }
    }

    pub fn relocate(&mut self, old_year: Year, new_year: Year, id: I) {
        if old_year != new_year {
            self.remove(old_year, id);
            self.insert(new_year, id);
        }
    }

    /// Ids stored under exactly `year`, ordered by id.
    pub fn by_year(&self, year: Year) -> Vec<I> {
        self.exact.values(&year).copied().collect()
    }

    /// Ids whose year lies in `lo..=hi`, in non-decreasing year order, ties
    /// ordered by id. Callers check `lo <= hi`.
    pub fn by_year_range(&self, lo: Year, hi: Year) -> Vec<I> {
        self.ordered
            .range(lo..=hi)
            .flat_map(|(_, ids)| ids.iter().copied())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.exact.total()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty()
    }
}

// =============================================================================
// AlbumArtistsIndex
// =============================================================================

/// Album to artists, derived through linked songs.
///
/// Each entry counts how many of the album's songs belong to the artist, the
/// artist stays associated while the count is above zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlbumArtistsIndex {
    map: HashMap<AlbumId, BTreeMap<ArtistId, usize>>,
}

impl AlbumArtistsIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one more song of `artist_id` on `album_id`.
    pub fn acquire(&mut self, album_id: AlbumId, artist_id: ArtistId) {
        *self
            .map
            .entry(album_id)
            .or_default()
            .entry(artist_id)
            .or_insert(0) += 1;
    }

    /// Records one song of `artist_id` less on `album_id`.
    pub fn release(&mut self, album_id: AlbumId, artist_id: ArtistId) {
        let Entry::Occupied(mut album_entry) = self.map.entry(album_id) else {
            return;
        };
        if let BTreeEntry::Occupied(mut artist_entry) = album_entry.get_mut().entry(artist_id) {
            *artist_entry.get_mut() -= 1;
            if *artist_entry.get() == 0 {
                artist_entry.remove();
            }
        }
        if album_entry.get().is_empty() {
            album_entry.remove();
        }
    }

    pub fn remove_album(&mut self, album_id: AlbumId) {
        self.map.remove(&album_id);
    }

    pub fn artists(&self, album_id: AlbumId) -> Vec<ArtistId> {
        self.map
            .get(&album_id)
            .map(|artists| artists.keys().copied().collect())
            .unwrap_or_default()
    }
}

// =============================================================================
// Indices
// =============================================================================

/// Every secondary index of the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Indices {
    pub song_years: YearIndex<SongId>,
    pub album_years: YearIndex<AlbumId>,
    pub artist_songs: SetIndex<ArtistId, SongId>,
    pub album_artists: AlbumArtistsIndex,
}

impl Indices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds every index from scratch out of the primary state.
    pub fn rebuild(
        songs: &Table<SongId, Song>,
        albums: &Table<AlbumId, Album>,
        links: &SongAlbumLinks,
    ) -> Indices {
        let mut indices = Indices::new();
        for (_, song) in songs.iter() {
            indices.song_added(song);
        }
        for (_, album) in albums.iter() {
            indices.album_added(album);
        }
        for (song_id, album_id) in links.iter() {
            if let Some(song) = songs.get(song_id) {
                indices.link_added(album_id, song.artist_id);
            }
        }
        indices
    }

    pub fn song_added(&mut self, song: &Song) {
        self.song_years.insert(song.year, song.id);
        self.artist_songs.insert(song.artist_id, song.id);
    }

    /// Removes a song's own entries. Its links must already have been
    /// released through [`Indices::link_removed`].
    pub fn song_removed(&mut self, song: &Song) {
        self.song_years.remove(song.year, song.id);
        self.artist_songs.remove(&song.artist_id, &song.id);
    }

    /// Moves a song's entries after an update. `albums` are the albums the
    /// song is linked to, their artist sets follow an artist change.
    pub fn song_changed<A>(&mut self, old: &Song, new: &Song, albums: A)
    where
        A: IntoIterator<Item = AlbumId>,
    {
        self.song_years.relocate(old.year, new.year, new.id);
        if old.artist_id != new.artist_id {
            self.artist_songs.remove(&old.artist_id, &old.id);
            self.artist_songs.insert(new.artist_id, new.id);
            for album_id in albums {
                self.album_artists.release(album_id, old.artist_id);
                self.album_artists.acquire(album_id, new.artist_id);
            }
        }
    }

    pub fn album_added(&mut self, album: &Album) {
        self.album_years.insert(album.year, album.id);
    }

    pub fn album_removed(&mut self, album: &Album) {
        self.album_years.remove(album.year, album.id);
        self.album_artists.remove_album(album.id);
    }

    pub fn album_changed(&mut self, old: &Album, new: &Album) {
        self.album_years.relocate(old.year, new.year, new.id);
    }

    pub fn link_added(&mut self, album_id: AlbumId, artist_id: ArtistId) {
        self.album_artists.acquire(album_id, artist_id);
    }

    pub fn link_removed(&mut self, album_id: AlbumId, artist_id: ArtistId) {
        self.album_artists.release(album_id, artist_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(id: u64, year: Year, artist: u64) -> Song {
        Song {
            id: SongId::new(id),
            name: format!("song {}", id),
            year,
            artist_id: ArtistId::new(artist),
        }
    }

    #[test]
    fn test_set_index_drops_empty_buckets() {
        let mut index: SetIndex<u32, u32> = SetIndex::new();
        assert!(index.insert(1, 10));
        assert!(!index.insert(1, 10));
        assert!(index.insert(1, 11));
        assert_eq!(index.total(), 2);
        assert!(index.remove(&1, &10));
        assert!(index.remove(&1, &11));
        assert!(!index.remove(&1, &11));
        assert!(index.get(&1).is_none());
        assert_eq!(index, SetIndex::new());
    }

    #[test]
    fn test_set_index_remove_key() {
        let mut index: SetIndex<u32, u32> = SetIndex::new();
        index.insert(1, 10);
        index.insert(1, 11);
        index.insert(2, 10);
        let removed = index.remove_key(&1).unwrap();
        assert_eq!(removed.len(), 2);
        assert_eq!(index.total(), 1);
        assert!(index.remove_key(&1).is_none());
    }

    #[test]
    fn test_year_index_exact_and_range() {
        let mut index: YearIndex<SongId> = YearIndex::new();
        index.insert(1975, SongId::new(3));
        index.insert(1975, SongId::new(1));
        index.insert(1980, SongId::new(2));
        index.insert(1990, SongId::new(4));

        assert_eq!(index.by_year(1975), vec![SongId::new(1), SongId::new(3)]);
        assert!(index.by_year(1976).is_empty());
        assert_eq!(
            index.by_year_range(1975, 1980),
            vec![SongId::new(1), SongId::new(3), SongId::new(2)]
        );
        assert_eq!(index.by_year_range(1981, 1989), Vec::<SongId>::new());
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn test_year_index_relocate() {
        let mut index: YearIndex<SongId> = YearIndex::new();
        index.insert(1975, SongId::new(1));
        index.relocate(1975, 1976, SongId::new(1));
        assert!(index.by_year(1975).is_empty());
        assert_eq!(index.by_year(1976), vec![SongId::new(1)]);

        let mut expected = YearIndex::new();
        expected.insert(1976, SongId::new(1));
        assert_eq!(index, expected);
    }

    #[test]
    fn test_album_artists_reference_counting() {
        let mut index = AlbumArtistsIndex::new();
        let album = AlbumId::new(1);
        index.acquire(album, ArtistId::new(1));
        index.acquire(album, ArtistId::new(1));
        index.acquire(album, ArtistId::new(2));
        assert_eq!(index.artists(album), vec![ArtistId::new(1), ArtistId::new(2)]);

        index.release(album, ArtistId::new(1));
        assert_eq!(index.artists(album), vec![ArtistId::new(1), ArtistId::new(2)]);
        index.release(album, ArtistId::new(1));
        index.release(album, ArtistId::new(2));
        assert!(index.artists(album).is_empty());
        assert_eq!(index, AlbumArtistsIndex::new());
    }

    #[test]
    fn test_song_changed_moves_album_artists() {
        let mut indices = Indices::new();
        let old = song(1, 1975, 1);
        indices.song_added(&old);
        indices.link_added(AlbumId::new(7), old.artist_id);

        let new = song(1, 1977, 2);
        indices.song_changed(&old, &new, [AlbumId::new(7)]);

        assert_eq!(indices.song_years.by_year(1977), vec![SongId::new(1)]);
        assert!(indices.artist_songs.get(&ArtistId::new(1)).is_none());
        assert_eq!(indices.artist_songs.count(&ArtistId::new(2)), 1);
        assert_eq!(
            indices.album_artists.artists(AlbumId::new(7)),
            vec![ArtistId::new(2)]
        );
    }

    #[test]
    fn test_rebuild_matches_incremental_updates() {
        let mut songs: Table<SongId, Song> = Table::new();
        let mut albums: Table<AlbumId, Album> = Table::new();
        let mut links = SongAlbumLinks::new();
        let mut indices = Indices::new();

        let (song_id, song) = songs
            .insert_with(|id| Song {
                id,
                name: "a".to_string(),
                year: 2000,
                artist_id: ArtistId::new(1),
            })
            .unwrap();
        indices.song_added(song);

        let (album_id, album) = albums
            .insert_with(|id| Album {
                id,
                name: "b".to_string(),
                year: 2001,
            })
            .unwrap();
        indices.album_added(album);

        links.link(song_id, album_id);
        indices.link_added(album_id, ArtistId::new(1));

        assert_eq!(indices, Indices::rebuild(&songs, &albums, &links));
    }
}
