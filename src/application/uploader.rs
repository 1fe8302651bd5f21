// src/application/uploader.rs
use crate::application::{BlobStore, FormState};
use crate::domain::{validate_storage_key, DomainError};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Hex characters of the content digest used as key prefix
const CONTENT_HASH_PREFIX_LEN: usize = 16;

/// How a selected file is turned into a storage key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyStrategy {
    /// The file name itself. Same-named uploads overwrite each other.
    #[default]
    FileName,
    /// `<digest prefix>-<file name>`
    ContentHash,
}

impl KeyStrategy {
    pub fn key_for(&self, file: &ImageFile) -> String {
        match self {
            KeyStrategy::FileName => file.file_name.clone(),
            KeyStrategy::ContentHash => {
                let digest = format!("{:x}", Sha256::digest(&file.bytes));
                format!("{}-{}", &digest[..CONTENT_HASH_PREFIX_LEN], file.file_name)
            }
        }
    }
}

/// A file selected for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = guess_content_type(&file_name).to_string();
        Self {
            file_name,
            bytes,
            content_type,
        }
    }

    pub async fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .with_context(|| format!("Not a file name: {}", path.display()))?
            .to_string();
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read image {}", path.display()))?;
        Ok(Self::new(file_name, bytes))
    }
}

pub fn guess_content_type(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Upload the selected file and point the draft at it.
///
/// No file is a no-op. On a failed upload the draft keeps its previous image.
/// Returns the storage key used.
#[instrument(level = "debug", skip_all)]
pub async fn upload_image<B>(
    form: &mut FormState,
    blobs: &B,
    file: Option<ImageFile>,
    strategy: KeyStrategy,
) -> Result<Option<String>, DomainError>
where
    B: BlobStore + ?Sized,
{
    let Some(file) = file else {
        debug!("No file selected");
        return Ok(None);
    };

    let key = strategy.key_for(&file);
    validate_storage_key(&key)?;

    let previous = form.draft().image.clone();
    form.set_image(Some(key.clone()));

    let size = file.bytes.len();
    if let Err(error) = blobs.put(&key, file.bytes, &file.content_type).await {
        form.set_image(previous);
        return Err(error);
    }

    info!(%key, size, "Image uploaded");
    Ok(Some(key))
}
