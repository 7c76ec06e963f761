//! Mapping store implementations.
//!
//! # Stores
//!
//! - [`PgMappingStore`] - PostgreSQL via SQLx, shared by every service instance
//! - [`InMemoryMappingStore`] - process-local `DashMap`, for development and tests

pub mod memory_mapping_store;
pub mod pg_mapping_store;

pub use memory_mapping_store::InMemoryMappingStore;
pub use pg_mapping_store::PgMappingStore;
