//! Short code allocation service.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::application::services::code_generator::{CodeGenerator, RandomCodeGenerator};
use crate::domain::{InsertOutcome, MappingStore, ShortCode, ShortLinkEntry, StoreError};

/// Default number of random codes tried before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Codes that would shadow a fixed route and can never be reserved.
const RESERVED_CODES: &[&str] = &["api", "health"];

/// Reasons an allocation can fail. None of them leave an entry behind.
#[derive(Debug, Error)]
pub enum AllocationError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("custom code '{code}' is already taken")]
    CodeAlreadyTaken { code: String },

    #[error("no free short code found after {attempts} attempts")]
    AllocationExhausted { attempts: u32 },

    #[error("mapping store unavailable: {0}")]
    UpstreamUnavailable(#[from] StoreError),
}

/// Binds long URLs to unique short codes.
///
/// The allocator holds no mutable state. Uniqueness under concurrency comes
/// entirely from [`MappingStore::insert_if_absent`]: a code is taken by
/// whichever caller's insert lands first, and every other caller sees
/// [`InsertOutcome::AlreadyExists`].
pub struct CodeAllocator {
    store: Arc<dyn MappingStore>,
    generator: Arc<dyn CodeGenerator>,
    max_attempts: u32,
}

impl CodeAllocator {
    /// Creates an allocator with the random 4-character generator and the
    /// default retry budget.
    pub fn new(store: Arc<dyn MappingStore>) -> Self {
        Self::with_generator(
            store,
            Arc::new(RandomCodeGenerator::new()),
            DEFAULT_MAX_ATTEMPTS,
        )
    }

    /// Creates an allocator with an explicit generator and retry budget.
    ///
    /// A budget of zero is treated as one attempt.
    pub fn with_generator(
        store: Arc<dyn MappingStore>,
        generator: Arc<dyn CodeGenerator>,
        max_attempts: u32,
    ) -> Self {
        Self {
            store,
            generator,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Allocates a short code for `long_url`.
    ///
    /// `requested_code` is sanitized first (everything outside
    /// `[A-Za-z0-9_-]` is dropped). If anything is left the caller gets
    /// exactly that code or [`AllocationError::CodeAlreadyTaken`]. Otherwise a
    /// random code is generated, retrying on collision up to the budget.
    ///
    /// # Errors
    ///
    /// - [`AllocationError::InvalidInput`] if `long_url` is blank or contains
    ///   control characters; the store is not touched
    /// - [`AllocationError::CodeAlreadyTaken`] if the custom code is in use or reserved
    /// - [`AllocationError::AllocationExhausted`] if every random candidate collided
    /// - [`AllocationError::UpstreamUnavailable`] if the store failed
    pub async fn allocate(
        &self,
        long_url: &str,
        requested_code: Option<&str>,
    ) -> Result<ShortCode, AllocationError> {
        if long_url.trim().is_empty() {
            return Err(AllocationError::InvalidInput(
                "Long URL is required".to_string(),
            ));
        }

        // A target with control characters can never become a Location header.
        if long_url.chars().any(char::is_control) {
            return Err(AllocationError::InvalidInput(
                "Long URL must not contain control characters".to_string(),
            ));
        }

        match requested_code.and_then(ShortCode::sanitize) {
            Some(code) => self.reserve_custom_code(code, long_url).await,
            None => self.allocate_random_code(long_url).await,
        }
    }

    async fn reserve_custom_code(
        &self,
        code: ShortCode,
        long_url: &str,
    ) -> Result<ShortCode, AllocationError> {
        if RESERVED_CODES.contains(&code.as_str()) {
            return Err(AllocationError::CodeAlreadyTaken {
                code: code.into_inner(),
            });
        }

        let entry = ShortLinkEntry::new(code.clone(), long_url);
        match self.store.insert_if_absent(entry).await? {
            InsertOutcome::Inserted => {
                info!(code = %code, "Reserved custom short code");
                Ok(code)
            }
            InsertOutcome::AlreadyExists => Err(AllocationError::CodeAlreadyTaken {
                code: code.into_inner(),
            }),
        }
    }

    async fn allocate_random_code(&self, long_url: &str) -> Result<ShortCode, AllocationError> {
        for attempt in 1..=self.max_attempts {
            let code = self.generator.generate();
            let entry = ShortLinkEntry::new(code.clone(), long_url);

            match self.store.insert_if_absent(entry).await? {
                InsertOutcome::Inserted => {
                    info!(code = %code, attempt, "Allocated short code");
                    return Ok(code);
                }
                InsertOutcome::AlreadyExists => {
                    debug!(code = %code, attempt, "Generated code collided, retrying");
                }
            }
        }

        warn!(
            attempts = self.max_attempts,
            "Short code space exhausted for this request"
        );
        Err(AllocationError::AllocationExhausted {
            attempts: self.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::code_generator::MockCodeGenerator;
    use crate::domain::repositories::MockMappingStore;

    fn code(s: &str) -> ShortCode {
        ShortCode::new(s).unwrap()
    }

    fn allocator(store: MockMappingStore, generator: MockCodeGenerator) -> CodeAllocator {
        CodeAllocator::with_generator(
            Arc::new(store),
            Arc::new(generator),
            DEFAULT_MAX_ATTEMPTS,
        )
    }

    #[tokio::test]
    async fn test_allocate_random_code_success() {
        let mut store = MockMappingStore::new();
        let mut generator = MockCodeGenerator::new();

        generator
            .expect_generate()
            .times(1)
            .returning(|| code("Ab3x"));

        store
            .expect_insert_if_absent()
            .withf(|entry| entry.code.as_str() == "Ab3x" && entry.target == "https://example.com")
            .times(1)
            .returning(|_| Ok(InsertOutcome::Inserted));

        let result = allocator(store, generator)
            .allocate("https://example.com", None)
            .await;

        assert_eq!(result.unwrap(), code("Ab3x"));
    }

    #[tokio::test]
    async fn test_allocate_never_calls_exists() {
        let mut store = MockMappingStore::new();
        let mut generator = MockCodeGenerator::new();

        generator.expect_generate().returning(|| code("q1w2"));
        store.expect_exists().times(0);
        store
            .expect_insert_if_absent()
            .times(1)
            .returning(|_| Ok(InsertOutcome::Inserted));

        let result = allocator(store, generator)
            .allocate("https://example.com", None)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_allocate_retries_on_collision() {
        let mut store = MockMappingStore::new();
        let mut generator = MockCodeGenerator::new();

        let mut calls = 0;
        generator.expect_generate().times(2).returning(move || {
            calls += 1;
            if calls == 1 { code("taken") } else { code("free") }
        });

        store
            .expect_insert_if_absent()
            .withf(|entry| entry.code.as_str() == "taken")
            .times(1)
            .returning(|_| Ok(InsertOutcome::AlreadyExists));
        store
            .expect_insert_if_absent()
            .withf(|entry| entry.code.as_str() == "free")
            .times(1)
            .returning(|_| Ok(InsertOutcome::Inserted));

        let result = allocator(store, generator)
            .allocate("https://example.com", None)
            .await;

        assert_eq!(result.unwrap(), code("free"));
    }

    #[tokio::test]
    async fn test_allocate_exhausts_budget() {
        let mut store = MockMappingStore::new();
        let mut generator = MockCodeGenerator::new();

        generator
            .expect_generate()
            .times(3)
            .returning(|| code("same"));
        store
            .expect_insert_if_absent()
            .times(3)
            .returning(|_| Ok(InsertOutcome::AlreadyExists));

        let allocator =
            CodeAllocator::with_generator(Arc::new(store), Arc::new(generator), 3);

        let result = allocator.allocate("https://example.com", None).await;

        assert!(matches!(
            result.unwrap_err(),
            AllocationError::AllocationExhausted { attempts: 3 }
        ));
    }

    #[tokio::test]
    async fn test_allocate_custom_code_success() {
        let mut store = MockMappingStore::new();
        let mut generator = MockCodeGenerator::new();

        generator.expect_generate().times(0);
        store
            .expect_insert_if_absent()
            .withf(|entry| entry.code.as_str() == "abc123")
            .times(1)
            .returning(|_| Ok(InsertOutcome::Inserted));

        let result = allocator(store, generator)
            .allocate("https://example.com", Some("abc123"))
            .await;

        assert_eq!(result.unwrap(), code("abc123"));
    }

    #[tokio::test]
    async fn test_allocate_custom_code_is_sanitized() {
        let mut store = MockMappingStore::new();
        let generator = MockCodeGenerator::new();

        store
            .expect_insert_if_absent()
            .withf(|entry| entry.code.as_str() == "abc1")
            .times(1)
            .returning(|_| Ok(InsertOutcome::Inserted));

        let result = allocator(store, generator)
            .allocate("https://example.com", Some("a!b@c#1"))
            .await;

        assert_eq!(result.unwrap(), code("abc1"));
    }

    #[tokio::test]
    async fn test_allocate_custom_code_conflict() {
        let mut store = MockMappingStore::new();
        let mut generator = MockCodeGenerator::new();

        generator.expect_generate().times(0);
        store
            .expect_insert_if_absent()
            .times(1)
            .returning(|_| Ok(InsertOutcome::AlreadyExists));

        let result = allocator(store, generator)
            .allocate("https://example.com", Some("taken123"))
            .await;

        match result.unwrap_err() {
            AllocationError::CodeAlreadyTaken { code } => assert_eq!(code, "taken123"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_allocate_reserved_code_is_taken() {
        let mut store = MockMappingStore::new();
        let generator = MockCodeGenerator::new();

        store.expect_insert_if_absent().times(0);

        let result = allocator(store, generator)
            .allocate("https://example.com", Some("health"))
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AllocationError::CodeAlreadyTaken { .. }
        ));
    }

    #[tokio::test]
    async fn test_allocate_custom_code_sanitized_to_empty_falls_back_to_random() {
        let mut store = MockMappingStore::new();
        let mut generator = MockCodeGenerator::new();

        generator
            .expect_generate()
            .times(1)
            .returning(|| code("R4nd"));
        store
            .expect_insert_if_absent()
            .withf(|entry| entry.code.as_str() == "R4nd")
            .times(1)
            .returning(|_| Ok(InsertOutcome::Inserted));

        let result = allocator(store, generator)
            .allocate("https://example.com", Some("!!! ###"))
            .await;

        assert_eq!(result.unwrap(), code("R4nd"));
    }

    #[tokio::test]
    async fn test_allocate_empty_url_rejected_without_store_calls() {
        let mut store = MockMappingStore::new();
        let mut generator = MockCodeGenerator::new();

        store.expect_insert_if_absent().times(0);
        store.expect_exists().times(0);
        generator.expect_generate().times(0);

        let allocator = allocator(store, generator);

        for url in ["", "   "] {
            let result = allocator.allocate(url, Some("anything")).await;
            assert!(matches!(
                result.unwrap_err(),
                AllocationError::InvalidInput(_)
            ));
        }
    }

    #[tokio::test]
    async fn test_allocate_control_characters_rejected_without_store_calls() {
        let mut store = MockMappingStore::new();
        let mut generator = MockCodeGenerator::new();

        store.expect_insert_if_absent().times(0);
        generator.expect_generate().times(0);

        let allocator = allocator(store, generator);

        for url in [
            "https://example.com/a\nb",
            "https://example.com/\tx",
            "https://example.com/\u{7f}",
        ] {
            let result = allocator.allocate(url, None).await;
            assert!(matches!(
                result.unwrap_err(),
                AllocationError::InvalidInput(_)
            ));
        }
    }

    #[tokio::test]
    async fn test_allocate_store_failure_is_upstream_unavailable() {
        let mut store = MockMappingStore::new();
        let mut generator = MockCodeGenerator::new();

        generator.expect_generate().times(1).returning(|| code("abcd"));
        store
            .expect_insert_if_absent()
            .times(1)
            .returning(|_| Err(StoreError::Unavailable("connection refused".to_string())));

        let result = allocator(store, generator)
            .allocate("https://example.com", None)
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AllocationError::UpstreamUnavailable(_)
        ));
    }

    #[test]
    fn test_zero_budget_is_bumped_to_one() {
        let allocator = CodeAllocator::with_generator(
            Arc::new(MockMappingStore::new()),
            Arc::new(MockCodeGenerator::new()),
            0,
        );
        assert_eq!(allocator.max_attempts(), 1);
    }
}
