// src/application/form.rs
use crate::domain::NoteDraft;

/// The note being composed
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormState {
    draft: NoteDraft,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &NoteDraft {
        &self.draft
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft = std::mem::take(&mut self.draft).with_name(name);
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft = std::mem::take(&mut self.draft).with_description(description);
    }

    /// Only the upload handler sets the image
    pub(crate) fn set_image(&mut self, key: Option<String>) {
        self.draft = std::mem::take(&mut self.draft).with_image(key);
    }

    pub fn reset(&mut self) {
        self.draft = NoteDraft::default();
    }
}
