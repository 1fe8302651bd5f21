// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use crate::cli::args::{Args, Command};
use anyhow::{Context, Result};
use application::{BlobStore, ImageFile, NoteGateway, NoteStore};
use infrastructure::config::{default_config_path, Config};
use infrastructure::{ContentRenderer, GraphQlGateway, HttpBlobStore};
use ports::HtmlPresenter;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};

pub async fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting notegrid with arguments");

    if let Command::InitConfig { path } = &args.command {
        return init_config(path.as_deref());
    }

    // Initialize infrastructure
    let config = Config::resolve(args.config.as_deref())?;
    config.validate()?;
    debug!(api = %config.api.endpoint, storage = %config.storage.endpoint, "Using backend");

    let gateway = GraphQlGateway::from_config(&config.api)?;
    let blobs = HttpBlobStore::from_config(&config.storage, config.api.connect_timeout_secs)?;

    // Initialize application
    let mut store = NoteStore::new(gateway, blobs).with_key_strategy(config.storage.key_strategy);

    let stdout = std::io::stdout();
    execute(&mut store, args.command, &mut stdout.lock()).await
}

/// Run one command against the store, writing user-facing output to `out`
pub async fn execute<G, B, W>(
    store: &mut NoteStore<G, B>,
    command: Command,
    out: &mut W,
) -> Result<()>
where
    G: NoteGateway,
    B: BlobStore,
    W: Write,
{
    match command {
        Command::List { json } => {
            store.load().await.context("Failed to load notes")?;
            if json {
                let rendered = serde_json::to_string_pretty(store.notes())
                    .context("Failed to serialize notes")?;
                writeln!(out, "{rendered}")?;
            } else {
                write!(out, "{}", ports::text::format_listing(store.notes()))?;
            }
        }
        Command::Create {
            name,
            description,
            image,
        } => {
            store.load().await.context("Failed to load notes")?;
            store.set_name(name);
            store.set_description(description);
            if let Some(path) = image {
                let file = ImageFile::read(&path).await?;
                store
                    .upload_image(Some(file))
                    .await
                    .with_context(|| format!("Failed to upload {}", path.display()))?;
            }
            let outcome = store.submit().await.context("Failed to create note")?;
            if let Some(unresolved) = &outcome.unresolved {
                warn!(
                    key = %unresolved.key,
                    error = %unresolved.error,
                    "Created note has no displayable image"
                );
            }
            info!(id = %outcome.id, "Note created");
            writeln!(out, "Created note {}", outcome.id)?;
        }
        Command::Delete { note_id } => {
            store.load().await.context("Failed to load notes")?;
            store.delete(&note_id).await.with_context(|| {
                format!(
                    "Note {note_id} was removed locally but the server did not confirm the delete"
                )
            })?;
            writeln!(out, "Deleted note {note_id}")?;
        }
        Command::Upload { path } => {
            let file = ImageFile::read(&path).await?;
            let key = store
                .upload_image(Some(file))
                .await
                .with_context(|| format!("Failed to upload {}", path.display()))?;
            if let Some(key) = key {
                writeln!(out, "{key}")?;
            }
        }
        Command::View { output } => {
            // a failed load still renders, with the error banner
            if let Err(error) = store.load().await {
                warn!(%error, "Rendering board without fresh data");
            }
            let html = HtmlPresenter::new().render(&store.view());
            let mut renderer = ContentRenderer::new();
            match output {
                Some(path) => {
                    ContentRenderer::write_file(&path, &html).await?;
                    writeln!(out, "Board written to {}", path.display())?;
                }
                None => {
                    let temp_path = renderer.create_temp_file(&html).await?;
                    renderer.open_in_browser(&temp_path).await?;
                }
            }
        }
        Command::InitConfig { path } => init_config(path.as_deref())?,
    }
    Ok(())
}

fn init_config(path: Option<&Path>) -> Result<()> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_config_path().context("Could not find config directory")?,
    };
    if path.exists() {
        anyhow::bail!("Config file already exists: {}", path.display());
    }
    Config::create_default(&path)?;
    info!(path = %path.display(), "Wrote default configuration");
    println!("Wrote {}", path.display());
    Ok(())
}
