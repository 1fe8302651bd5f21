// src/util/testing.rs

use anyhow::Result;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::env;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::{BlobStore, NoteGateway};
use crate::domain::{DomainError, NoteDraft, NoteRecord};

/// Base URL handed out for blobs stored through the mock
pub const MOCK_BLOB_BASE: &str = "https://blobs.test";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    List,
    Create(NoteDraft),
    Delete(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlobCall {
    Put(String),
    Get(String),
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Default)]
struct GatewayState {
    records: Vec<NoteRecord>,
    list_failure: Option<String>,
    create_failure: Option<String>,
    delete_failures: HashSet<String>,
    created: usize,
    calls: Vec<GatewayCall>,
}

/// Shared mock gateway for testing the note list and the store
///
/// Clones share state, so a test can keep one handle and inspect the
/// recorded calls after handing another to the code under test.
///
/// # Examples
///
/// ```
/// use notegrid::util::testing::MockNoteGateway;
/// use notegrid::domain::NoteRecord;
///
/// let gateway = MockNoteGateway::builder()
///     .with_record(NoteRecord {
///         id: "1".to_string(),
///         name: "Groceries".to_string(),
///         description: "Milk".to_string(),
///         image: None,
///     })
///     .with_delete_failure("1")
///     .build();
/// assert!(gateway.calls().is_empty());
/// ```
#[derive(Clone)]
pub struct MockNoteGateway {
    state: Arc<Mutex<GatewayState>>,
}

impl MockNoteGateway {
    pub fn builder() -> MockNoteGatewayBuilder {
        MockNoteGatewayBuilder::new()
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        lock(&self.state).calls.clone()
    }

    /// Records currently held by the fake backend
    pub fn records(&self) -> Vec<NoteRecord> {
        lock(&self.state).records.clone()
    }
}

#[async_trait]
impl NoteGateway for MockNoteGateway {
    async fn list_notes(&self) -> Result<Vec<NoteRecord>, DomainError> {
        let mut state = lock(&self.state);
        state.calls.push(GatewayCall::List);
        match &state.list_failure {
            Some(message) => Err(DomainError::Gateway(message.clone())),
            None => Ok(state.records.clone()),
        }
    }

    async fn create_note(&self, input: &NoteDraft) -> Result<NoteRecord, DomainError> {
        let mut state = lock(&self.state);
        state.calls.push(GatewayCall::Create(input.clone()));
        if let Some(message) = &state.create_failure {
            return Err(DomainError::Gateway(message.clone()));
        }
        state.created += 1;
        let record = NoteRecord {
            id: format!("created-{}", state.created),
            name: input.name.clone(),
            description: input.description.clone(),
            image: input.image.clone(),
        };
        state.records.push(record.clone());
        Ok(record)
    }

    async fn delete_note(&self, id: &str) -> Result<(), DomainError> {
        let mut state = lock(&self.state);
        state.calls.push(GatewayCall::Delete(id.to_string()));
        if state.delete_failures.contains(id) {
            return Err(DomainError::Gateway(format!("delete of {id} rejected")));
        }
        state.records.retain(|record| record.id != id);
        Ok(())
    }
}

/// Builder for MockNoteGateway
pub struct MockNoteGatewayBuilder {
    state: GatewayState,
}

impl MockNoteGatewayBuilder {
    pub fn new() -> Self {
        Self {
            state: GatewayState::default(),
        }
    }

    /// Add a record returned by list_notes
    pub fn with_record(mut self, record: NoteRecord) -> Self {
        self.state.records.push(record);
        self
    }

    /// Make list_notes fail with a gateway error
    pub fn with_list_failure(mut self, message: &str) -> Self {
        self.state.list_failure = Some(message.to_string());
        self
    }

    /// Make create_note fail with a gateway error
    pub fn with_create_failure(mut self, message: &str) -> Self {
        self.state.create_failure = Some(message.to_string());
        self
    }

    /// Make delete_note fail for a specific id
    pub fn with_delete_failure(mut self, id: &str) -> Self {
        self.state.delete_failures.insert(id.to_string());
        self
    }

    pub fn build(self) -> MockNoteGateway {
        MockNoteGateway {
            state: Arc::new(Mutex::new(self.state)),
        }
    }
}

impl Default for MockNoteGatewayBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default)]
struct BlobState {
    urls: HashMap<String, String>,
    get_failures: HashMap<String, String>,
    put_failure: Option<String>,
    stored: HashMap<String, Vec<u8>>,
    calls: Vec<BlobCall>,
}

/// Shared mock blob store
///
/// `get` answers with a configured URL, then with a URL under
/// [`MOCK_BLOB_BASE`] for anything stored through `put`, and fails with
/// `ImageNotFound` otherwise.
#[derive(Clone)]
pub struct MockBlobStore {
    state: Arc<Mutex<BlobState>>,
}

impl MockBlobStore {
    pub fn builder() -> MockBlobStoreBuilder {
        MockBlobStoreBuilder::new()
    }

    pub fn calls(&self) -> Vec<BlobCall> {
        lock(&self.state).calls.clone()
    }

    pub fn stored(&self, key: &str) -> Option<Vec<u8>> {
        lock(&self.state).stored.get(key).cloned()
    }
}

#[async_trait]
impl BlobStore for MockBlobStore {
    async fn put(&self, key: &str, bytes: Vec<u8>, _content_type: &str) -> Result<(), DomainError> {
        let mut state = lock(&self.state);
        state.calls.push(BlobCall::Put(key.to_string()));
        if let Some(message) = &state.put_failure {
            return Err(DomainError::BlobStore {
                key: key.to_string(),
                message: message.clone(),
            });
        }
        state.stored.insert(key.to_string(), bytes);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<String, DomainError> {
        let mut state = lock(&self.state);
        state.calls.push(BlobCall::Get(key.to_string()));
        if let Some(message) = state.get_failures.get(key) {
            return Err(DomainError::BlobStore {
                key: key.to_string(),
                message: message.clone(),
            });
        }
        if let Some(url) = state.urls.get(key) {
            return Ok(url.clone());
        }
        if state.stored.contains_key(key) {
            return Ok(format!("{MOCK_BLOB_BASE}/{key}"));
        }
        Err(DomainError::ImageNotFound(key.to_string()))
    }
}

/// Builder for MockBlobStore
pub struct MockBlobStoreBuilder {
    state: BlobState,
}

impl MockBlobStoreBuilder {
    pub fn new() -> Self {
        Self {
            state: BlobState::default(),
        }
    }

    /// Resolve `key` to `url`
    pub fn with_url(mut self, key: &str, url: &str) -> Self {
        self.state.urls.insert(key.to_string(), url.to_string());
        self
    }

    /// Make get fail for `key` with a store error
    pub fn with_get_failure(mut self, key: &str, message: &str) -> Self {
        self.state
            .get_failures
            .insert(key.to_string(), message.to_string());
        self
    }

    /// Make every put fail
    pub fn with_put_failure(mut self, message: &str) -> Self {
        self.state.put_failure = Some(message.to_string());
        self
    }

    pub fn build(self) -> MockBlobStore {
        MockBlobStore {
            state: Arc::new(Mutex::new(self.state)),
        }
    }
}

impl Default for MockBlobStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Record fixture
pub fn record(id: &str, name: &str, description: &str, image: Option<&str>) -> NoteRecord {
    NoteRecord {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        image: image.map(str::to_string),
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    // Create a filter for noisy modules
    let noisy_modules = ["hyper", "reqwest", "mio", "wiremock"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
