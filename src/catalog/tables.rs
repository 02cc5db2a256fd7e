//! Primary tables, the canonical owners of entity records.

use super::error::{CatalogError, Missing, Result};
use super::ids::{EntityId, IdGenerator};
use std::collections::HashMap;

/// Records of one entity kind keyed by id, together with the sequence that
/// assigns their ids.
#[derive(Debug, Clone)]
pub struct Table<I: EntityId, R> {
    records: HashMap<I, R>,
    ids: IdGenerator,
}

impl<I: EntityId, R> Default for Table<I, R> {
    fn default() -> Self {
        Table {
            records: HashMap::new(),
            ids: IdGenerator::new(),
        }
    }
}

impl<I: EntityId, R> Table<I, R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table whose sequence continues after `last_id`.
    pub fn with_last_id(last_id: u64) -> Self {
        Table {
            records: HashMap::new(),
            ids: IdGenerator::resume_after(last_id),
        }
    }

    /// Assigns the next id, builds the record for it and stores it.
    ///
    /// Nothing is consumed when the id space is exhausted.
    pub fn insert_with<F>(&mut self, build: F) -> Result<(I, &R)>
    where
        F: FnOnce(I) -> R,
    {
        let raw = self
            .ids
            .next()
            .ok_or(CatalogError::IdentifierExhausted { kind: I::KIND })?;
        let id = I::from_raw(raw);
        let record: &R = self.records.entry(id).or_insert(build(id));
        Ok((id, record))
    }

    pub fn get(&self, id: I) -> Option<&R> {
        self.records.get(&id)
    }

    /// Like [`Table::get`], with a `NotFound` error for absent ids.
    pub fn require(&self, id: I) -> Result<&R> {
        self.records
            .get(&id)
            .ok_or_else(|| CatalogError::NotFound(Missing::record(id)))
    }

    pub fn contains(&self, id: I) -> bool {
        self.records.contains_key(&id)
    }

    /// Replaces an existing record, returning the previous one.
    pub fn replace(&mut self, id: I, record: R) -> Option<R> {
        match self.records.get_mut(&id) {
            Some(slot) => Some(std::mem::replace(slot, record)),
            None => None,
        }
    }

    pub fn remove(&mut self, id: I) -> Option<R> {
        self.records.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&I, &R)> {
        self.records.iter()
    }
}
