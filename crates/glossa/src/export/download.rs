//! Streaming reads of the export file.

use std::io;
use std::path::Path;
use std::pin::Pin;

use futures_util::Stream;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

use glossa_core::export::{ExportError, Result, EXPORT_CHUNK_SIZE};

/// Byte chunks of the export file.
pub type ExportStream = Pin<Box<dyn Stream<Item = io::Result<Vec<u8>>> + Send>>;

/// Opens the export file for streaming.
///
/// Fails with [`ExportError::NotFound`] if no export has been written yet.
/// The returned stream owns the file handle and yields chunks of at most
/// [`EXPORT_CHUNK_SIZE`] bytes.
pub async fn open_export(path: &Path) -> Result<ExportStream> {
    let file = tokio::fs::File::open(path).await.map_err(ExportError::from)?;
    Ok(Box::pin(read_chunks(file)))
}

fn read_chunks(mut file: File) -> impl Stream<Item = io::Result<Vec<u8>>> + Send {
    async_stream::try_stream! {
        let mut buf = vec![0u8; EXPORT_CHUNK_SIZE];
        loop {
            let n = file.read(&mut buf).await?;
            if n == 0 {
                break;
            }
            yield buf[..n].to_vec();
        }
    }
}
