//! Typed identifiers and the per-kind sequence that issues them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

/// The three kinds of entity stored in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Artist,
    Song,
    Album,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Artist => "artist",
            EntityKind::Song => "song",
            EntityKind::Album => "album",
        };
        f.write_str(name)
    }
}

/// Common behavior of the typed identifiers.
///
/// Ids of different kinds may hold the same number, the type keeps them
/// from ever being compared.
pub trait EntityId: Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display + Send + Sync {
    const KIND: EntityKind;

    fn from_raw(raw: u64) -> Self;

    fn raw(&self) -> u64;
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub fn new(raw: u64) -> Self {
                $name(raw)
            }
        }

        impl EntityId for $name {
            const KIND: EntityKind = $kind;

            fn from_raw(raw: u64) -> Self {
                $name(raw)
            }

            fn raw(&self) -> u64 {
                self.0
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

entity_id!(
    /// Identifier of an [`Artist`](super::Artist).
    ArtistId,
    EntityKind::Artist
);
entity_id!(
    /// Identifier of a [`Song`](super::Song).
    SongId,
    EntityKind::Song
);
entity_id!(
    /// Identifier of an [`Album`](super::Album).
    AlbumId,
    EntityKind::Album
);

/// Issues strictly increasing ids for one entity kind, starting from 1.
///
/// Ids are never handed out twice, deleting a record does not return its id
/// to the sequence.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last_id: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        IdGenerator { last_id: 0 }
    }

    /// Resumes a sequence whose last issued value was `last_id`.
    pub fn resume_after(last_id: u64) -> Self {
        IdGenerator { last_id }
    }

    /// The value that the next call to [`IdGenerator::next`] would return,
    /// or `None` once the sequence space is used up.
    pub fn peek(&self) -> Option<u64> {
        self.last_id.checked_add(1)
    }

    pub fn last_issued(&self) -> u64 {
        self.last_id
    }
}

impl Iterator for IdGenerator {
    type Item = u64;

    /// Returns the next id, or `None` if the sequence is exhausted.
    fn next(&mut self) -> Option<u64> {
        let next = self.peek()?;
        self.last_id = next;
        Some(next)
    }
}
