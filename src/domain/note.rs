// src/domain/note.rs
use serde::{Deserialize, Serialize};

/// A note as persisted by the gateway. `image` holds a storage key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Image {
    /// Bare storage key, not yet resolved
    Key(String),
    /// Time-limited retrieval URL
    Url(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    Confirmed,
    Pending,
    Failed(String),
}

/// A note as held in the local list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub image: Option<Image>,
    pub status: SyncStatus,
}

impl Note {
    /// Local entry for a persisted record, with its image still unresolved
    pub fn from_record(record: NoteRecord) -> Self {
        Self {
            id: Some(record.id),
            name: record.name,
            description: record.description,
            image: record.image.map(Image::Key),
            status: SyncStatus::Confirmed,
        }
    }

    pub fn image_url(&self) -> Option<&str> {
        match &self.image {
            Some(Image::Url(url)) => Some(url),
            _ => None,
        }
    }

    pub fn has_id(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id)
    }
}
