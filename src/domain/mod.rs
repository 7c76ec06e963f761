//! Domain layer containing business entities and storage contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`short_code`] - Validated short code value type
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on the HTTP layer. Business logic
//! lives in services (see [`crate::application::services`]).

pub mod entities;
pub mod repositories;
pub mod short_code;

pub use entities::ShortLinkEntry;
pub use repositories::{InsertOutcome, MappingStore, StoreError};
pub use short_code::{InvalidShortCode, ShortCode};
