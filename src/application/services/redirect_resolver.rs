//! Short code resolution service.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::domain::{MappingStore, ShortCode, StoreError};

/// Outcome of resolving a short code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Send the client to `target`. Callers must answer with a temporary
    /// redirect so clients don't cache it permanently.
    Redirect { target: String },
    /// No entry exists for the code.
    NotFound,
}

/// The lookup could not be completed.
///
/// Never used for a missing code; that is [`Resolution::NotFound`].
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("mapping store unavailable: {0}")]
    UpstreamUnavailable(#[from] StoreError),
}

/// Resolves short codes to their target URLs. Read-only.
pub struct RedirectResolver {
    store: Arc<dyn MappingStore>,
}

impl RedirectResolver {
    pub fn new(store: Arc<dyn MappingStore>) -> Self {
        Self { store }
    }

    /// Looks up `code` by exact match.
    ///
    /// Strings that cannot be a short code resolve to
    /// [`Resolution::NotFound`] without querying the store.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::UpstreamUnavailable`] if the store failed.
    pub async fn resolve(&self, code: &str) -> Result<Resolution, ResolveError> {
        let Ok(code) = ShortCode::new(code) else {
            debug!(code, "Path segment is not a short code");
            return Ok(Resolution::NotFound);
        };

        Ok(match self.store.get(&code).await? {
            Some(entry) => Resolution::Redirect {
                target: entry.target,
            },
            None => Resolution::NotFound,
        })
    }
}
