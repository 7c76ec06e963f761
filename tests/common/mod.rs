#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use shortlink::application::services::{CodeGenerator, DEFAULT_MAX_ATTEMPTS};
use shortlink::domain::{InsertOutcome, MappingStore, ShortCode, ShortLinkEntry, StoreError};
use shortlink::infrastructure::persistence::InMemoryMappingStore;
use shortlink::state::AppState;
use url::Url;

pub const BASE_URL: &str = "https://sho.rt/";

pub fn base_url() -> Url {
    Url::parse(BASE_URL).unwrap()
}

pub fn create_test_state() -> (AppState, Arc<InMemoryMappingStore>) {
    let store = Arc::new(InMemoryMappingStore::new());
    let state = AppState::new(store.clone(), DEFAULT_MAX_ATTEMPTS, Some(base_url()));
    (state, store)
}

/// State without `PUBLIC_BASE_URL`, so short URLs come from request headers.
pub fn create_header_based_state() -> (AppState, Arc<InMemoryMappingStore>) {
    let store = Arc::new(InMemoryMappingStore::new());
    let state = AppState::new(store.clone(), DEFAULT_MAX_ATTEMPTS, None);
    (state, store)
}

pub fn create_sequenced_state(
    codes: &[&str],
    max_attempts: u32,
) -> (AppState, Arc<InMemoryMappingStore>) {
    let store = Arc::new(InMemoryMappingStore::new());
    let state = AppState::with_generator(
        store.clone(),
        Arc::new(SequenceGenerator::new(codes)),
        max_attempts,
        Some(base_url()),
    );
    (state, store)
}

pub fn create_failing_state() -> AppState {
    AppState::new(Arc::new(FailingStore), DEFAULT_MAX_ATTEMPTS, Some(base_url()))
}

pub async fn seed(store: &InMemoryMappingStore, code: &str, target: &str) {
    let code = ShortCode::new(code).unwrap();
    let outcome = store
        .insert_if_absent(ShortLinkEntry::new(code, target))
        .await
        .unwrap();
    assert_eq!(outcome, InsertOutcome::Inserted);
}

/// Hands out a fixed list of codes, then repeats the last one.
pub struct SequenceGenerator {
    codes: Mutex<VecDeque<String>>,
    last: String,
}

impl SequenceGenerator {
    pub fn new(codes: &[&str]) -> Self {
        let codes: VecDeque<String> = codes.iter().map(|c| c.to_string()).collect();
        let last = codes.back().cloned().unwrap_or_else(|| "zzzz".to_string());
        Self {
            codes: Mutex::new(codes),
            last,
        }
    }
}

impl CodeGenerator for SequenceGenerator {
    fn generate(&self) -> ShortCode {
        let next = self
            .codes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.last.clone());
        ShortCode::new(next).unwrap()
    }
}

/// Store whose backend is always down.
pub struct FailingStore;

#[async_trait]
impl MappingStore for FailingStore {
    async fn exists(&self, _code: &ShortCode) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn insert_if_absent(&self, _entry: ShortLinkEntry) -> Result<InsertOutcome, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn get(&self, _code: &ShortCode) -> Result<Option<ShortLinkEntry>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}
