// src/application/store.rs
use crate::application::uploader::{self, ImageFile, KeyStrategy};
use crate::application::{
    BlobStore, CreateOutcome, FormState, LoadReport, NoteGateway, NoteList,
};
use crate::domain::{DomainError, Note, NoteDraft};
use tracing::{debug, warn};

/// Read-only snapshot handed to the view layer
#[derive(Debug, Clone, Copy)]
pub struct BoardView<'a> {
    pub notes: &'a [Note],
    pub flagged: &'a [Note],
    pub draft: &'a NoteDraft,
    pub last_error: Option<&'a str>,
}

/// State container owned by the view root.
///
/// Every command handler returns its result and, on failure, also records
/// the message in `last_error` so the view can show it.
pub struct NoteStore<G: NoteGateway, B: BlobStore> {
    gateway: G,
    blobs: B,
    list: NoteList,
    form: FormState,
    key_strategy: KeyStrategy,
    last_error: Option<String>,
}

impl<G: NoteGateway, B: BlobStore> NoteStore<G, B> {
    pub fn new(gateway: G, blobs: B) -> Self {
        Self {
            gateway,
            blobs,
            list: NoteList::new(),
            form: FormState::new(),
            key_strategy: KeyStrategy::default(),
            last_error: None,
        }
    }

    pub fn with_key_strategy(mut self, key_strategy: KeyStrategy) -> Self {
        self.key_strategy = key_strategy;
        self
    }

    pub fn notes(&self) -> &[Note] {
        self.list.notes()
    }

    pub fn flagged(&self) -> &[Note] {
        self.list.flagged()
    }

    pub fn draft(&self) -> &NoteDraft {
        self.form.draft()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn view(&self) -> BoardView<'_> {
        BoardView {
            notes: self.list.notes(),
            flagged: self.list.flagged(),
            draft: self.form.draft(),
            last_error: self.last_error(),
        }
    }

    pub async fn load(&mut self) -> Result<LoadReport, DomainError> {
        let result = self.list.load(&self.gateway, &self.blobs).await;
        self.record(result)
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.form.set_name(name);
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.form.set_description(description);
    }

    /// Upload the selected file, then reload the whole list.
    ///
    /// A failed reload does not undo the upload: the key stays in the draft
    /// and the reload error is left in `last_error`.
    pub async fn upload_image(
        &mut self,
        file: Option<ImageFile>,
    ) -> Result<Option<String>, DomainError> {
        let uploaded =
            uploader::upload_image(&mut self.form, &self.blobs, file, self.key_strategy).await;
        let key = self.record(uploaded)?;
        if key.is_some() {
            if let Err(error) = self.load().await {
                warn!(%error, "Image stored but the note list could not be reloaded");
            }
        }
        Ok(key)
    }

    /// Create a note from the current draft and reset the form on success
    pub async fn submit(&mut self) -> Result<CreateOutcome, DomainError> {
        let draft = self.form.draft().clone();
        let created = self.list.create(&draft, &self.gateway, &self.blobs).await;
        let outcome = self.record(created)?;
        self.form.reset();
        debug!(id = %outcome.id, "Form reset after create");
        Ok(outcome)
    }

    /// Optimistic delete; a rejected delete leaves the note flagged
    pub async fn delete(&mut self, id: &str) -> Result<(), DomainError> {
        let result = self.list.remove(id, &self.gateway).await;
        self.record(result)
    }

    fn record<T>(&mut self, result: Result<T, DomainError>) -> Result<T, DomainError> {
        match &result {
            Ok(_) => self.last_error = None,
            Err(error) => {
                warn!(%error, "Command failed");
                self.last_error = Some(error.to_string());
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::{record, GatewayCall, MockBlobStore, MockNoteGateway};

    fn store(
        gateway: &MockNoteGateway,
        blobs: &MockBlobStore,
    ) -> NoteStore<MockNoteGateway, MockBlobStore> {
        NoteStore::new(gateway.clone(), blobs.clone())
    }

    #[tokio::test]
    async fn given_empty_name_when_submitting_then_surfaces_error_and_keeps_draft() {
        // Arrange
        let gateway = MockNoteGateway::builder().build();
        let blobs = MockBlobStore::builder().build();
        let mut store = store(&gateway, &blobs);
        store.set_description("x");

        // Act
        let result = store.submit().await;

        // Assert
        assert_eq!(result, Err(DomainError::MissingField("name")));
        assert_eq!(store.draft(), &NoteDraft::new("", "x"));
        assert!(store.notes().is_empty());
        assert!(gateway.calls().is_empty());
        assert_eq!(store.last_error(), Some("Missing required field: name"));
    }

    #[tokio::test]
    async fn given_valid_draft_when_submitting_then_resets_form_and_clears_error() {
        // Arrange
        let gateway = MockNoteGateway::builder().build();
        let blobs = MockBlobStore::builder().build();
        let mut store = store(&gateway, &blobs);
        let _ = store.submit().await;
        store.set_name("A");
        store.set_description("B");

        // Act
        store.submit().await.expect("Submit should succeed");

        // Assert
        assert_eq!(store.draft(), &NoteDraft::new("", ""));
        assert_eq!(store.notes().len(), 1);
        assert_eq!(store.last_error(), None);
    }

    #[tokio::test]
    async fn given_selected_file_when_uploading_then_reloads_list() {
        // Arrange
        let gateway = MockNoteGateway::builder()
            .with_record(record("1", "A", "a", None))
            .build();
        let blobs = MockBlobStore::builder().build();
        let mut store = store(&gateway, &blobs);

        // Act
        let key = store
            .upload_image(Some(ImageFile::new("cat.png", vec![1])))
            .await
            .expect("Upload should succeed");

        // Assert
        assert_eq!(key.as_deref(), Some("cat.png"));
        assert_eq!(store.draft().image.as_deref(), Some("cat.png"));
        assert_eq!(gateway.calls(), vec![GatewayCall::List]);
        assert_eq!(store.notes().len(), 1);
    }

    #[tokio::test]
    async fn given_reload_failure_when_uploading_then_upload_still_succeeds() {
        // Arrange
        let gateway = MockNoteGateway::builder()
            .with_list_failure("unreachable")
            .build();
        let blobs = MockBlobStore::builder().build();
        let mut store = store(&gateway, &blobs);

        // Act
        let key = store
            .upload_image(Some(ImageFile::new("cat.png", vec![1])))
            .await
            .expect("Upload should succeed");

        // Assert
        assert_eq!(key.as_deref(), Some("cat.png"));
        assert_eq!(store.draft().image.as_deref(), Some("cat.png"));
        assert_eq!(blobs.stored("cat.png"), Some(vec![1]));
        assert_eq!(gateway.calls(), vec![GatewayCall::List]);
        assert_eq!(store.last_error(), Some("Gateway error: unreachable"));
    }

    #[tokio::test]
    async fn given_no_file_when_uploading_then_does_not_reload() {
        let gateway = MockNoteGateway::builder().build();
        let blobs = MockBlobStore::builder().build();
        let mut store = store(&gateway, &blobs);

        let key = store.upload_image(None).await.expect("No-op should succeed");

        assert_eq!(key, None);
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn given_content_hash_strategy_when_uploading_then_draft_gets_hashed_key() {
        let gateway = MockNoteGateway::builder().build();
        let blobs = MockBlobStore::builder().build();
        let mut store = store(&gateway, &blobs).with_key_strategy(KeyStrategy::ContentHash);

        let key = store
            .upload_image(Some(ImageFile::new("cat.png", vec![1])))
            .await
            .expect("Upload should succeed")
            .expect("Key should be returned");

        assert_ne!(key, "cat.png");
        assert_eq!(store.draft().image.as_deref(), Some(key.as_str()));
    }

    #[tokio::test]
    async fn given_rejected_delete_when_deleting_then_view_shows_flag_and_error() {
        // Arrange
        let gateway = MockNoteGateway::builder()
            .with_record(record("1", "A", "a", None))
            .with_delete_failure("1")
            .build();
        let blobs = MockBlobStore::builder().build();
        let mut store = store(&gateway, &blobs);
        store.load().await.expect("Load should succeed");

        // Act
        let result = store.delete("1").await;

        // Assert
        assert!(result.is_err());
        let view = store.view();
        assert!(view.notes.is_empty());
        assert_eq!(view.flagged.len(), 1);
        assert!(view.last_error.is_some());
    }
}
