//! Helpers used by the HTTP layer.
//!
//! - [`short_url`] - Public short URL composition from request headers

pub mod short_url;
