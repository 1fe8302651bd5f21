// src/application/mod.rs
pub mod form;
pub mod gateway;
pub mod note_list;
pub mod store;
pub mod uploader;

pub use form::FormState;
pub use gateway::{BlobStore, NoteGateway};
pub use note_list::{CreateOutcome, LoadReport, NoteList, UnresolvedImage};
pub use store::{BoardView, NoteStore};
pub use uploader::{ImageFile, KeyStrategy};
