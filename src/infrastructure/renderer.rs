// src/infrastructure/renderer.rs
use crate::constants::BROWSER_LAUNCH_DELAY_MS;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::Builder;
use tracing::{debug, instrument};

/// Writes the rendered board to disk and hands it to the browser
#[derive(Debug, Default)]
pub struct ContentRenderer {
    // Keep last temp dir alive to prevent deletion
    _temp_dir: Option<Arc<tempfile::TempDir>>,
}

impl ContentRenderer {
    pub fn new() -> Self {
        Self { _temp_dir: None }
    }

    pub async fn create_temp_file(&mut self, content: &str) -> Result<PathBuf> {
        let temp_dir = Builder::new()
            .prefix("notegrid-")
            .rand_bytes(5)
            .tempdir()
            .context("Failed to create temporary directory")?;

        let file_path = temp_dir.path().join("board.html");
        Self::write_file(&file_path, content).await?;

        // Store temp_dir to keep it alive
        self._temp_dir = Some(Arc::new(temp_dir));

        Ok(file_path)
    }

    pub async fn write_file(path: &Path, content: &str) -> Result<()> {
        tokio::fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write board HTML to {}", path.display()))?;
        debug!(path = %path.display(), bytes = content.len(), "Board written");
        Ok(())
    }

    #[instrument(level = "debug")]
    pub async fn open_in_browser(&mut self, path: &Path) -> Result<()> {
        let path_str = path.to_str().context("Failed to convert path to string")?;

        #[cfg(target_os = "macos")]
        {
            std::process::Command::new("open")
                .arg(path_str)
                .spawn()
                .context("Failed to open browser")?;
        }
        #[cfg(target_os = "windows")]
        {
            std::process::Command::new("cmd")
                .args(["/C", "start", path_str])
                .spawn()
                .context("Failed to open browser")?;
        }
        #[cfg(target_os = "linux")]
        {
            std::process::Command::new("xdg-open")
                .arg(path_str)
                .spawn()
                .context("Failed to open browser")?;
        }

        // Keep the temp directory alive while the browser picks the file up
        tokio::time::sleep(Duration::from_millis(BROWSER_LAUNCH_DELAY_MS)).await;

        Ok(())
    }
}
