//! The translation repository facade.
//!
//! Composes the store, the cache, the tag normalizer and the export queue
//! behind the operations the HTTP layer needs. Reads go through the cache
//! (cache-aside); every write invalidates the affected key.
//!
//! A read that misses the cache only stores its result if no invalidation
//! happened while it was reading, so a write is never shadowed by an
//! older copy fetched concurrently.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use glossa_core::cache::{deserialize_translation, serialize_translation, translation_key, Cache};
use glossa_core::export::ExportQueue;
use glossa_core::storage::{PageRequest, RepositoryError, Result, TranslationStore};
use glossa_core::tags::TagNormalizer;
use glossa_core::translation::{
    normalize_tag_name, validate_changes, validate_new_translation, validate_search_query,
    AssignTagsRequest, CreateTranslationRequest, Translation, TranslationPage,
    UpdateTranslationRequest,
};

use crate::export::{open_export, ExportStream};

pub struct TranslationRepository {
    store: Arc<dyn TranslationStore>,
    cache: Arc<dyn Cache>,
    tags: TagNormalizer,
    exports: Arc<dyn ExportQueue>,
    export_path: PathBuf,
    cache_ttl: Duration,
    /// Bumped by every invalidation.
    cache_generation: Mutex<u64>,
}

impl TranslationRepository {
    /// Creates the facade.
    ///
    /// # Arguments
    ///
    /// * `store` - Durable storage for translations and tags
    /// * `cache` - Read-through cache for single translations
    /// * `exports` - Queue notified after every successful create
    /// * `export_path` - File served by [`export_stream`](Self::export_stream)
    /// * `cache_ttl` - Time-to-live for cached translations
    pub fn new(
        store: Arc<dyn TranslationStore>,
        cache: Arc<dyn Cache>,
        exports: Arc<dyn ExportQueue>,
        export_path: impl Into<PathBuf>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            tags: TagNormalizer::new(store.clone()),
            store,
            cache,
            exports,
            export_path: export_path.into(),
            cache_ttl,
            cache_generation: Mutex::new(0),
        }
    }

    /// One page of translations.
    pub async fn list(&self, page: PageRequest) -> Result<TranslationPage> {
        let (items, total) = self.store.list_translations(page).await?;
        Ok(TranslationPage::new(page, total, items))
    }

    /// Creates a translation with its tags and schedules an export.
    ///
    /// If the tags cannot be stored, the new row is deleted again and the
    /// tag error is returned.
    pub async fn create(&self, request: CreateTranslationRequest) -> Result<Translation> {
        let (new, tag_names) = request.into_parts();
        validate_new_translation(&new)?;
        validate_tag_names(&tag_names)?;

        let created = self.store.create_translation(&new).await?;
        if let Err(err) = self.replace_tags(created.id, &tag_names).await {
            if let Err(cleanup) = self.store.delete_translation(created.id).await {
                tracing::error!(
                    translation_id = created.id,
                    error = %cleanup,
                    "Failed to remove translation after tag error"
                );
            }
            return Err(err);
        }
        self.invalidate(created.id).await;
        self.exports.enqueue();

        tracing::info!(translation_id = created.id, key = %created.key, "Translation created");
        self.reload(created.id).await
    }

    /// Gets a translation by ID, serving from the cache when possible.
    pub async fn find(&self, id: i64) -> Result<Translation> {
        let cache_key = translation_key(id);

        match self.cache.get(&cache_key).await {
            Ok(Some(bytes)) => match deserialize_translation(&bytes) {
                Ok(translation) => {
                    tracing::trace!(translation_id = id, "Cache hit for translation");
                    return Ok(translation);
                }
                Err(err) => {
                    tracing::warn!(translation_id = id, error = %err, "Cached translation is corrupt");
                }
            },
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(translation_id = id, error = %err, "Cache read failed");
            }
        }

        tracing::trace!(translation_id = id, "Cache miss for translation");
        let generation = *self.cache_generation.lock().await;
        let translation = self
            .store
            .find_translation(id)
            .await?
            .ok_or_else(|| RepositoryError::translation_not_found(id))?;

        self.populate(&cache_key, &translation, generation).await;
        Ok(translation)
    }

    /// Caches `translation` unless an invalidation happened since `generation`
    /// was read. The lock is held through the write so a concurrent
    /// invalidation cannot slip between the check and the `set`.
    async fn populate(&self, cache_key: &str, translation: &Translation, generation: u64) {
        let current = self.cache_generation.lock().await;
        if *current != generation {
            tracing::trace!(translation_id = translation.id, "Skipping cache fill after invalidation");
            return;
        }

        let id = translation.id;
        match serialize_translation(translation) {
            Ok(bytes) => {
                if let Err(err) = self.cache.set(cache_key, &bytes, Some(self.cache_ttl)).await {
                    tracing::warn!(translation_id = id, error = %err, "Failed to cache translation");
                }
            }
            Err(err) => {
                tracing::warn!(translation_id = id, error = %err, "Failed to serialize translation");
            }
        }
    }

    /// Applies a partial update. Tags, when present, replace the current set.
    pub async fn update(&self, id: i64, request: UpdateTranslationRequest) -> Result<Translation> {
        let (changes, tag_names) = request.into_parts();
        validate_changes(&changes)?;
        if let Some(names) = &tag_names {
            validate_tag_names(names)?;
        }

        self.store.update_translation(id, &changes).await?;
        if let Some(names) = &tag_names {
            self.replace_tags(id, names).await?;
        }
        self.invalidate(id).await;

        tracing::debug!(translation_id = id, "Translation updated");
        self.reload(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.store.delete_translation(id).await?;
        self.invalidate(id).await;

        tracing::info!(translation_id = id, "Translation deleted");
        Ok(())
    }

    /// Substring search. A missing or blank query is rejected.
    pub async fn search(&self, query: Option<&str>) -> Result<Vec<Translation>> {
        let term = validate_search_query(query)?;
        self.store.search_translations(term).await
    }

    /// Translations carrying the tag with exactly this name.
    pub async fn by_tag(&self, tag_name: &str) -> Result<Vec<Translation>> {
        self.store.find_translations_by_tag_name(tag_name).await
    }

    /// Adds tags to a translation, keeping the ones it already has.
    pub async fn assign_tags(&self, id: i64, request: AssignTagsRequest) -> Result<Translation> {
        validate_tag_names(&request.tags)?;
        if self.store.find_translation(id).await?.is_none() {
            return Err(RepositoryError::translation_not_found(id));
        }

        let tag_ids = self.tags.resolve(&request.tags).await?;
        self.store.attach_tags(id, &tag_ids).await?;
        self.invalidate(id).await;

        tracing::debug!(translation_id = id, count = tag_ids.len(), "Tags assigned");
        self.reload(id).await
    }

    /// Opens the latest export snapshot for streaming.
    pub async fn export_stream(&self) -> Result<ExportStream> {
        open_export(&self.export_path).await.map_err(Into::into)
    }

    async fn reload(&self, id: i64) -> Result<Translation> {
        self.store
            .find_translation(id)
            .await?
            .ok_or_else(|| RepositoryError::translation_not_found(id))
    }

    async fn replace_tags(&self, id: i64, names: &[String]) -> Result<()> {
        let tag_ids = self.tags.resolve(names).await?;
        self.store.sync_tags(id, &tag_ids).await
    }

    async fn invalidate(&self, id: i64) {
        *self.cache_generation.lock().await += 1;
        if let Err(err) = self.cache.delete(&translation_key(id)).await {
            tracing::warn!(translation_id = id, error = %err, "Failed to invalidate cached translation");
        }
    }
}

/// Rejects blank or oversized names before any write happens.
fn validate_tag_names(names: &[String]) -> Result<()> {
    for name in names {
        normalize_tag_name(name)?;
    }
    Ok(())
}
