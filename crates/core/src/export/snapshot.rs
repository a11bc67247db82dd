//! Pure helpers for the export snapshot file.

use std::path::{Path, PathBuf};

use crate::translation::Translation;

use super::{ExportError, Result};

/// File name of the export snapshot inside the export directory.
pub const EXPORT_FILE_NAME: &str = "translations.json";

/// Read buffer size used when streaming the export to clients.
pub const EXPORT_CHUNK_SIZE: usize = 8 * 1024;

/// Returns the snapshot path inside `dir`.
pub fn export_file_path(dir: &Path) -> PathBuf {
    dir.join(EXPORT_FILE_NAME)
}

/// Returns a sibling temp path for an in-progress write of `target`.
///
/// The temp file lives in the same directory so the final rename stays on
/// one filesystem and is atomic.
pub fn temp_path_for(target: &Path, suffix: &str) -> PathBuf {
    let file_name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| EXPORT_FILE_NAME.to_string());
    target.with_file_name(format!(".{file_name}.{suffix}.tmp"))
}

/// Renders the snapshot document: a JSON array of translation records.
pub fn render_snapshot(translations: &[Translation]) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(translations).map_err(|e| ExportError::Serialization(e.to_string()))
}
