//! Short link entity representing a code → URL mapping.

use crate::domain::short_code::ShortCode;

/// A persisted short link.
///
/// Entries are immutable: once a code is bound to a target it is never
/// rebound or removed by this service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLinkEntry {
    pub code: ShortCode,
    pub target: String,
}

impl ShortLinkEntry {
    /// Creates a new entry.
    pub fn new(code: ShortCode, target: impl Into<String>) -> Self {
        Self {
            code,
            target: target.into(),
        }
    }
}
