//! Shared application state.
//!
//! Wires the SQLite store, the in-memory cache and the export worker into
//! the translation repository handed to every request handler.

use std::sync::Arc;

use glossa_core::storage::TranslationStore;

use crate::cache::MemoryCache;
use crate::config::Config;
use crate::export::{ExportJob, ExportWorker};
use crate::repository::TranslationRepository;
use crate::storage::SqliteStore;

/// Shared application state.
///
/// Cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    pub translations: Arc<TranslationRepository>,
}

impl AppState {
    /// Creates AppState with SQLite storage at `config.sqlite_path`.
    ///
    /// Must be called from within a tokio runtime; the export worker is
    /// spawned here.
    pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
        let store = Arc::new(SqliteStore::new(&config.sqlite_path).await?);
        tracing::info!(path = %config.sqlite_path, "SQLite store opened");
        Ok(Self::with_store(store, config))
    }

    /// Creates AppState around an already opened store.
    pub fn with_store(store: Arc<dyn TranslationStore>, config: &Config) -> Self {
        let cache = Arc::new(MemoryCache::new(config.cache_max_entries));
        let export_path = config.export_path();
        let exports = Arc::new(ExportWorker::spawn(
            ExportJob::new(store.clone(), export_path.clone()),
            config.export_queue_capacity,
        ));

        let translations = Arc::new(TranslationRepository::new(
            store,
            cache,
            exports,
            export_path,
            config.cache_ttl(),
        ));

        Self { translations }
    }
}
