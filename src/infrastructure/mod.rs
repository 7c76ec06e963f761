//! Infrastructure layer for external integrations.
//!
//! Implements the storage contract defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - Mapping store implementations (PostgreSQL and in-memory)

pub mod persistence;
