//! Core domain entities.
//!
//! The service persists exactly one kind of record, the [`ShortLinkEntry`]
//! mapping a short code to the URL it stands for.

pub mod short_link;

pub use short_link::ShortLinkEntry;
