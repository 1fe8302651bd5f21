// src/application/gateway.rs
use crate::domain::{DomainError, NoteDraft, NoteRecord};
use async_trait::async_trait;

/// Hosted note API
#[async_trait]
pub trait NoteGateway: Send + Sync {
    async fn list_notes(&self) -> Result<Vec<NoteRecord>, DomainError>;

    /// Persist a draft; the server assigns the id
    async fn create_note(&self, input: &NoteDraft) -> Result<NoteRecord, DomainError>;

    async fn delete_note(&self, id: &str) -> Result<(), DomainError>;
}

/// Object storage for note images
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), DomainError>;

    /// Resolve a key to a time-limited retrieval URL.
    /// Fails with `ImageNotFound` for unknown keys.
    async fn get(&self, key: &str) -> Result<String, DomainError>;
}
