//! Shared application state injected into handlers.

use std::sync::Arc;
use url::Url;

use crate::application::services::{CodeAllocator, CodeGenerator, RandomCodeGenerator, RedirectResolver};
use crate::domain::MappingStore;

/// Handles shared by every request.
///
/// Cloning is cheap; all fields are reference counted.
#[derive(Clone)]
pub struct AppState {
    pub allocator: Arc<CodeAllocator>,
    pub resolver: Arc<RedirectResolver>,
    pub store: Arc<dyn MappingStore>,
    /// Overrides the header-derived origin when composing short URLs.
    /// Always ends with a slash.
    pub public_base_url: Option<Url>,
}

impl AppState {
    /// Builds the services around one store handle.
    pub fn new(store: Arc<dyn MappingStore>, max_attempts: u32, public_base_url: Option<Url>) -> Self {
        Self::with_generator(
            store,
            Arc::new(RandomCodeGenerator::new()),
            max_attempts,
            public_base_url,
        )
    }

    /// Like [`AppState::new`] with an explicit code generator.
    pub fn with_generator(
        store: Arc<dyn MappingStore>,
        generator: Arc<dyn CodeGenerator>,
        max_attempts: u32,
        public_base_url: Option<Url>,
    ) -> Self {
        Self {
            allocator: Arc::new(CodeAllocator::with_generator(
                store.clone(),
                generator,
                max_attempts,
            )),
            resolver: Arc::new(RedirectResolver::new(store.clone())),
            store,
            public_base_url,
        }
    }
}
