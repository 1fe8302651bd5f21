// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Gateway error: {0}")]
    Gateway(String),
    #[error("Blob store error for '{key}': {message}")]
    BlobStore { key: String, message: String },
    #[error("Image not found: {0}")]
    ImageNotFound(String),
    #[error("Invalid storage key: {0}")]
    InvalidStorageKey(String),
    #[error("Configuration error: {0}")]
    Config(String),
}
