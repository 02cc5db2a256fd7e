//! Many-to-many association between songs and albums.

use super::ids::{AlbumId, SongId};
use super::indices::SetIndex;
use std::collections::BTreeSet;

/// The song/album link set, stored once per direction.
///
/// Both directions are updated together on every change, so looking up
/// either side costs the size of the answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongAlbumLinks {
    by_song: SetIndex<SongId, AlbumId>,
    by_album: SetIndex<AlbumId, SongId>,
}

impl SongAlbumLinks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the pair, returns false if it was already linked.
    pub fn link(&mut self, song_id: SongId, album_id: AlbumId) -> bool {
        let added = self.by_song.insert(song_id, album_id);
        self.by_album.insert(album_id, song_id);
        added
    }

    /// Removes the pair, returns false if it was not linked.
    pub fn unlink(&mut self, song_id: SongId, album_id: AlbumId) -> bool {
        let removed = self.by_song.remove(&song_id, &album_id);
        self.by_album.remove(&album_id, &song_id);
        removed
    }

    pub fn is_linked(&self, song_id: SongId, album_id: AlbumId) -> bool {
        self.by_song.contains(&song_id, &album_id)
    }

    pub fn albums_of(&self, song_id: SongId) -> impl Iterator<Item = AlbumId> + '_ {
        self.by_song.values(&song_id).copied()
    }

    pub fn songs_of(&self, album_id: AlbumId) -> impl Iterator<Item = SongId> + '_ {
        self.by_album.values(&album_id).copied()
    }

    /// Drops every link of a song, returning the albums it was on.
    pub fn remove_song(&mut self, song_id: SongId) -> BTreeSet<AlbumId> {
        let albums = self.by_song.remove_key(&song_id).unwrap_or_default();
        for album_id in albums.iter() {
            self.by_album.remove(album_id, &song_id);
        }
        albums
    }

    /// Drops every link of an album, returning the songs that were on it.
    pub fn remove_album(&mut self, album_id: AlbumId) -> BTreeSet<SongId> {
        let songs = self.by_album.remove_key(&album_id).unwrap_or_default();
        for song_id in songs.iter() {
            self.by_song.remove(song_id, &album_id);
        }
        songs
    }

    /// Number of linked pairs.
    pub fn len(&self) -> usize {
        self.by_song.total()
    }

    pub fn is_empty(&self) -> bool {
        self.by_song.is_empty()
    }

    /// True when both directions hold exactly the same pairs.
    pub fn is_mirrored(&self) -> bool {
        self.by_song.total() == self.by_album.total()
            && self
                .iter()
                .all(|(song_id, album_id)| self.by_album.contains(&album_id, &song_id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (SongId, AlbumId)> + '_ {
        self.by_song
            .iter()
            .flat_map(|(song_id, albums)| albums.iter().map(move |album_id| (*song_id, *album_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(id: u64) -> SongId {
        SongId::new(id)
    }

    fn album(id: u64) -> AlbumId {
        AlbumId::new(id)
    }

    #[test]
    fn test_link_is_visible_from_both_sides() {
        let mut links = SongAlbumLinks::new();
        assert!(links.link(song(1), album(10)));
        assert!(links.link(song(1), album(11)));
        assert!(links.link(song(2), album(10)));

        assert_eq!(
            links.albums_of(song(1)).collect::<Vec<_>>(),
            vec![album(10), album(11)]
        );
        assert_eq!(
            links.songs_of(album(10)).collect::<Vec<_>>(),
            vec![song(1), song(2)]
        );
        assert_eq!(links.len(), 3);
        assert!(links.is_mirrored());
    }

    #[test]
    fn test_duplicate_link_is_reported() {
        let mut links = SongAlbumLinks::new();
        assert!(links.link(song(1), album(1)));
        assert!(!links.link(song(1), album(1)));
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn test_unlink_removes_both_directions() {
        let mut links = SongAlbumLinks::new();
        links.link(song(1), album(1));
        assert!(links.unlink(song(1), album(1)));
        assert!(!links.unlink(song(1), album(1)));
        assert!(!links.is_linked(song(1), album(1)));
        assert_eq!(links.albums_of(song(1)).count(), 0);
        assert_eq!(links.songs_of(album(1)).count(), 0);
        assert!(links.is_empty());
        assert_eq!(links, SongAlbumLinks::new());
    }

    #[test]
    fn test_remove_song_and_album() {
        let mut links = SongAlbumLinks::new();
        links.link(song(1), album(1));
        links.link(song(1), album(2));
        links.link(song(2), album(2));

        let albums = links.remove_song(song(1));
        assert_eq!(albums.into_iter().collect::<Vec<_>>(), vec![album(1), album(2)]);
        assert_eq!(links.songs_of(album(2)).collect::<Vec<_>>(), vec![song(2)]);

        let songs = links.remove_album(album(2));
        assert_eq!(songs.into_iter().collect::<Vec<_>>(), vec![song(2)]);
        assert!(links.is_empty());
        assert_eq!(links.iter().count(), 0);
    }
}
