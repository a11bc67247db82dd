//! Background export worker.
//!
//! A detached tokio task drains a bounded channel and runs the export job
//! once per message. Requests arriving while the channel is full are
//! coalesced into the run already queued.

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use glossa_core::export::ExportQueue;

use super::ExportJob;

/// Handle to the background export task.
///
/// Dropping every handle closes the channel and lets the task exit after
/// its current run.
#[derive(Clone)]
pub struct ExportWorker {
    request_tx: mpsc::Sender<()>,
}

impl ExportWorker {
    /// Spawns the worker task on the current tokio runtime.
    ///
    /// `capacity` bounds how many runs may be pending at once; it is
    /// raised to 1 if zero.
    pub fn spawn(job: ExportJob, capacity: usize) -> Self {
        let (request_tx, mut request_rx) = mpsc::channel::<()>(capacity.max(1));

        tokio::spawn(async move {
            tracing::debug!(path = %job.target().display(), "Export worker started");

            while request_rx.recv().await.is_some() {
                if let Err(err) = job.run().await {
                    tracing::error!(error = %err, path = %job.target().display(), "Export failed");
                }
            }

            tracing::debug!("Export worker shutting down");
        });

        Self { request_tx }
    }
}

impl ExportQueue for ExportWorker {
    fn enqueue(&self) {
        match self.request_tx.try_send(()) {
            Ok(()) => tracing::debug!("Export queued"),
            Err(TrySendError::Full(())) => {
                tracing::trace!("Export already pending, coalescing request")
            }
            Err(TrySendError::Closed(())) => {
                tracing::error!("Export worker is not running, request dropped")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::storage::SqliteStore;
    use glossa_core::export::export_file_path;
    use glossa_core::storage::TranslationStore;
    use glossa_core::translation::NewTranslation;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("glossa-worker-{}", uuid::Uuid::new_v4().simple()))
    }

    /// Polls until the export file holds `expected` translations.
    async fn wait_for_count(path: &Path, expected: usize) -> bool {
        for _ in 0..100 {
            if let Ok(bytes) = tokio::fs::read(path).await {
                if let Ok(serde_json::Value::Array(items)) = serde_json::from_slice(&bytes) {
                    if items.len() == expected {
                        return true;
                    }
                }
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        false
    }

    #[tokio::test]
    async fn test_enqueue_runs_export_in_background() {
        let dir = scratch_dir();
        let target = export_file_path(&dir);
        let store = Arc::new(SqliteStore::new_in_memory().await.unwrap());
        store
            .create_translation(&NewTranslation::new("eng", "hello", "Hi"))
            .await
            .unwrap();

        let worker = ExportWorker::spawn(ExportJob::new(store, &target), 1);
        worker.enqueue();

        assert!(wait_for_count(&target, 1).await);

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_burst_of_requests_ends_with_latest_snapshot() {
        let dir = scratch_dir();
        let target = export_file_path(&dir);
        let store = Arc::new(SqliteStore::new_in_memory().await.unwrap());
        let worker = ExportWorker::spawn(ExportJob::new(store.clone(), &target), 1);

        for i in 0..10 {
            store
                .create_translation(&NewTranslation::new("eng", format!("k{i}"), "x"))
                .await
                .unwrap();
            worker.enqueue();
        }

        assert!(wait_for_count(&target, 10).await);

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_zero_capacity_is_usable() {
        let dir = scratch_dir();
        let target = export_file_path(&dir);
        let store = Arc::new(SqliteStore::new_in_memory().await.unwrap());

        let worker = ExportWorker::spawn(ExportJob::new(store, &target), 0);
        worker.enqueue();

        assert!(wait_for_count(&target, 0).await);

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
