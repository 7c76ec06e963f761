//! Repository trait definitions for the domain layer.
//!
//! Traits here describe what the services need from storage. Implementations
//! live in `crate::infrastructure::persistence`; mock implementations are
//! generated via `mockall` for unit tests.
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod mapping_store;

pub use mapping_store::{InsertOutcome, MappingStore, StoreError};

#[cfg(test)]
pub use mapping_store::MockMappingStore;
