//! Storage abstraction for short link mappings.

use crate::domain::entities::ShortLinkEntry;
use crate::domain::short_code::ShortCode;
use async_trait::async_trait;
use thiserror::Error;

/// Result of an atomic insert attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The entry was written.
    Inserted,
    /// An entry with the same code already existed; nothing was written.
    AlreadyExists,
}

/// Failure to talk to the backing store.
///
/// Distinct from "not found": a lookup that completes without a row is
/// `Ok(None)`, never an error.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Persistent association between short codes and target URLs.
///
/// Every instance of the service shares one store, so the uniqueness
/// guarantee of [`MappingStore::insert_if_absent`] must hold across
/// processes, not just within one.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingStore`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryMappingStore`] - process-local, for development and tests
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingStore: Send + Sync {
    /// Returns whether an entry exists for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be queried.
    async fn exists(&self, code: &ShortCode) -> Result<bool, StoreError>;

    /// Inserts `entry` unless its code is already taken.
    ///
    /// The check and the write happen as one atomic step. An existing entry
    /// is never overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be reached. In that case
    /// nothing was written.
    async fn insert_if_absent(&self, entry: ShortLinkEntry) -> Result<InsertOutcome, StoreError>;

    /// Looks up the entry for `code` by exact match.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be queried.
    async fn get(&self, code: &ShortCode) -> Result<Option<ShortLinkEntry>, StoreError>;

    /// Round-trips to the store without touching any data.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store is unreachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
