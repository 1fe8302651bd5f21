// src/domain/mod.rs
pub mod draft;
pub mod error;
pub mod note;
pub mod storage_key;

pub use draft::NoteDraft;
pub use error::DomainError;
pub use note::{Image, Note, NoteRecord, SyncStatus};
pub use storage_key::validate_storage_key;
