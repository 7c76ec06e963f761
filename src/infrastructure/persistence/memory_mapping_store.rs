//! Process-local mapping store.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::{InsertOutcome, MappingStore, ShortCode, ShortLinkEntry, StoreError};

/// In-memory store keyed by short code.
///
/// `DashMap::entry` holds the shard lock across the lookup and the write, so
/// concurrent inserts of the same code see exactly one `Inserted`. Data is
/// lost on restart and not shared between processes; use it for local
/// development and tests.
#[derive(Debug, Default)]
pub struct InMemoryMappingStore {
    entries: DashMap<String, String>,
}

impl InMemoryMappingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl MappingStore for InMemoryMappingStore {
    async fn exists(&self, code: &ShortCode) -> Result<bool, StoreError> {
        Ok(self.entries.contains_key(code.as_str()))
    }

    async fn insert_if_absent(&self, entry: ShortLinkEntry) -> Result<InsertOutcome, StoreError> {
        match self.entries.entry(entry.code.into_inner()) {
            Entry::Occupied(_) => Ok(InsertOutcome::AlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(entry.target);
                Ok(InsertOutcome::Inserted)
            }
        }
    }

    async fn get(&self, code: &ShortCode) -> Result<Option<ShortLinkEntry>, StoreError> {
        Ok(self
            .entries
            .get(code.as_str())
            .map(|target| ShortLinkEntry::new(code.clone(), target.value().clone())))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
