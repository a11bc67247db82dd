//! A single export run: snapshot the store to the export file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::io::AsyncWriteExt;

use glossa_core::export::{render_snapshot, temp_path_for, ExportError, Result};
use glossa_core::storage::TranslationStore;

/// Writes every translation to `target` as a pretty JSON array.
///
/// The document is written to a unique sibling temp file, synced, then
/// renamed over `target`, so readers see either the previous snapshot or
/// the new one.
#[derive(Clone)]
pub struct ExportJob {
    store: Arc<dyn TranslationStore>,
    target: PathBuf,
}

impl ExportJob {
    pub fn new(store: Arc<dyn TranslationStore>, target: impl Into<PathBuf>) -> Self {
        Self {
            store,
            target: target.into(),
        }
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Runs one export, returning the number of translations written.
    pub async fn run(&self) -> Result<usize> {
        let translations = self.store.all_translations().await?;
        let document = render_snapshot(&translations)?;

        if let Some(parent) = self.target.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
            }
        }

        let temp = temp_path_for(&self.target, &uuid::Uuid::new_v4().simple().to_string());
        if let Err(err) = write_synced(&temp, &document).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(err);
        }
        if let Err(err) = tokio::fs::rename(&temp, &self.target).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(io_error(err));
        }

        tracing::debug!(
            count = translations.len(),
            path = %self.target.display(),
            "Export snapshot written"
        );
        Ok(translations.len())
    }
}

async fn write_synced(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = tokio::fs::File::create(path).await.map_err(io_error)?;
    file.write_all(bytes).await.map_err(io_error)?;
    file.sync_all().await.map_err(io_error)?;
    Ok(())
}

/// Write-side I/O failures are never "not found" from the caller's view.
fn io_error(err: std::io::Error) -> ExportError {
    ExportError::Io(err.to_string())
}
