// src/domain/draft.rs
use crate::domain::DomainError;
use serde::Serialize;

/// Not-yet-submitted note input. Serializes as the create input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NoteDraft {
    pub name: String,
    pub description: String,
    /// Storage key of an uploaded image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl NoteDraft {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            image: None,
        }
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    pub fn with_description(self, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..self
        }
    }

    pub fn with_image(self, image: Option<String>) -> Self {
        Self { image, ..self }
    }

    /// Both name and description must be non-empty
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.is_empty() {
            return Err(DomainError::MissingField("name"));
        }
        if self.description.is_empty() {
            return Err(DomainError::MissingField("description"));
        }
        Ok(())
    }
}
