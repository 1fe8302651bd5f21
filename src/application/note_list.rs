// src/application/note_list.rs
use crate::application::{BlobStore, NoteGateway};
use crate::domain::{DomainError, Image, Note, NoteDraft, NoteRecord, SyncStatus};
use futures_util::future::join_all;
use tracing::{debug, info, instrument, warn};

/// An image key that could not be resolved during a load or create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedImage {
    pub note_id: Option<String>,
    pub key: String,
    pub error: DomainError,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub unresolved: Vec<UnresolvedImage>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOutcome {
    pub id: String,
    pub unresolved: Option<UnresolvedImage>,
}

/// In-memory mirror of the last known server state, mutated optimistically.
///
/// `notes` is what the view shows. Entries whose delete is in flight sit in
/// `pending`; entries whose delete was rejected sit in `flagged` until the
/// next successful load.
#[derive(Debug, Default)]
pub struct NoteList {
    notes: Vec<Note>,
    pending: Vec<Note>,
    flagged: Vec<Note>,
}

impl NoteList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn flagged(&self) -> &[Note] {
        &self.flagged
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Replace the list with a freshly fetched, fully resolved batch
    #[instrument(level = "debug", skip_all)]
    pub async fn load<G, B>(&mut self, gateway: &G, blobs: &B) -> Result<LoadReport, DomainError>
    where
        G: NoteGateway + ?Sized,
        B: BlobStore + ?Sized,
    {
        let records = gateway.list_notes().await?;
        debug!(count = records.len(), "Fetched notes");

        let resolved = join_all(
            records
                .into_iter()
                .map(|record| resolve_record(record, blobs)),
        )
        .await;

        let mut report = LoadReport {
            loaded: resolved.len(),
            unresolved: Vec::new(),
        };
        let mut notes = Vec::with_capacity(resolved.len());
        for (note, failure) in resolved {
            if let Some(failure) = failure {
                report.unresolved.push(failure);
            }
            notes.push(note);
        }

        self.notes = notes;
        self.flagged.clear();
        info!(
            loaded = report.loaded,
            unresolved = report.unresolved.len(),
            "Note list refreshed"
        );
        Ok(report)
    }

    /// Persist `draft` and append it to the local list.
    ///
    /// Empty name or description fails before any remote call.
    #[instrument(level = "debug", skip(self, gateway, blobs))]
    pub async fn create<G, B>(
        &mut self,
        draft: &NoteDraft,
        gateway: &G,
        blobs: &B,
    ) -> Result<CreateOutcome, DomainError>
    where
        G: NoteGateway + ?Sized,
        B: BlobStore + ?Sized,
    {
        draft.validate()?;

        let record = gateway.create_note(draft).await?;
        debug!(id = %record.id, "Gateway assigned id");

        // the record keeps the key; only the local entry sees the URL
        let mut unresolved = None;
        let image = match &draft.image {
            Some(key) => match blobs.get(key).await {
                Ok(url) => Some(Image::Url(url)),
                Err(error) => {
                    warn!(%key, %error, "Could not resolve image of new note");
                    unresolved = Some(UnresolvedImage {
                        note_id: Some(record.id.clone()),
                        key: key.clone(),
                        error,
                    });
                    None
                }
            },
            None => None,
        };

        self.notes.push(Note {
            id: Some(record.id.clone()),
            name: draft.name.clone(),
            description: draft.description.clone(),
            image,
            status: SyncStatus::Confirmed,
        });

        Ok(CreateOutcome {
            id: record.id,
            unresolved,
        })
    }

    /// Optimistically take every entry with `id` out of the visible list.
    ///
    /// Returns the first detached entry, `None` when nothing matched.
    pub fn detach(&mut self, id: &str) -> Option<Note> {
        let (mut detached, kept): (Vec<Note>, Vec<Note>) = std::mem::take(&mut self.notes)
            .into_iter()
            .partition(|note| note.has_id(id));
        self.notes = kept;
        if detached.len() > 1 {
            warn!(%id, count = detached.len(), "Several notes share one id");
        }

        for note in &mut detached {
            note.status = SyncStatus::Pending;
        }
        let first = detached.first().cloned();
        self.pending.extend(detached);
        first
    }

    /// Record the gateway's answer for a delete started with [`detach`](Self::detach)
    pub fn settle_removal(&mut self, id: &str, result: &Result<(), DomainError>) {
        let (settled, still_pending): (Vec<Note>, Vec<Note>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|note| note.has_id(id));
        self.pending = still_pending;

        if let Err(error) = result {
            if !settled.is_empty() {
                warn!(%id, %error, "Delete rejected, note flagged as out of sync");
            }
            self.flagged.extend(settled.into_iter().map(|mut note| {
                note.status = SyncStatus::Failed(error.to_string());
                note
            }));
        }
    }

    /// Remove locally, then ask the gateway to delete.
    ///
    /// The local removal stands whatever the gateway answers.
    #[instrument(level = "debug", skip(self, gateway))]
    pub async fn remove<G>(&mut self, id: &str, gateway: &G) -> Result<(), DomainError>
    where
        G: NoteGateway + ?Sized,
    {
        if self.detach(id).is_none() {
            debug!(%id, "Note not in local list, deleting remotely only");
        }
        let result = gateway.delete_note(id).await;
        self.settle_removal(id, &result);
        if result.is_ok() {
            info!(%id, "Note deleted");
        }
        result
    }
}

async fn resolve_record<B>(record: NoteRecord, blobs: &B) -> (Note, Option<UnresolvedImage>)
where
    B: BlobStore + ?Sized,
{
    let mut note = Note::from_record(record);
    let Some(Image::Key(key)) = note.image.take() else {
        return (note, None);
    };

    match blobs.get(&key).await {
        Ok(url) => {
            note.image = Some(Image::Url(url));
            (note, None)
        }
        Err(error) => {
            warn!(id = ?note.id, %key, %error, "Image resolution failed");
            let failure = UnresolvedImage {
                note_id: note.id.clone(),
                key,
                error,
            };
            (note, Some(failure))
        }
    }
}
