//! Find-or-create resolution of tag names to tag IDs.

use std::collections::HashMap;
use std::sync::Arc;

use crate::storage::{RepositoryError, Result, TranslationStore};
use crate::translation::{distinct_tag_names, normalize_tag_name, Tag};

/// Maps raw tag names to existing or newly created tag IDs.
///
/// Names are trimmed and matched exactly (case-sensitive). Each distinct
/// name hits the store once per call, so duplicates in the input share an ID
/// and never produce duplicate rows.
#[derive(Clone)]
pub struct TagNormalizer {
    store: Arc<dyn TranslationStore>,
}

impl TagNormalizer {
    pub fn new(store: Arc<dyn TranslationStore>) -> Self {
        Self { store }
    }

    /// Resolves `names` to tag IDs, one per input name, in input order.
    pub async fn resolve(&self, names: &[String]) -> Result<Vec<i64>> {
        let normalized = names
            .iter()
            .map(|name| normalize_tag_name(name))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut resolved: HashMap<&str, i64> = HashMap::new();
        for name in distinct_tag_names(&normalized) {
            let tag = self.find_or_create(name).await?;
            resolved.insert(name, tag.id);
        }

        Ok(normalized
            .iter()
            .filter_map(|name| resolved.get(name.as_str()).copied())
            .collect())
    }

    async fn find_or_create(&self, name: &str) -> Result<Tag> {
        match self.store.find_or_create_tag(name).await {
            Ok(tag) => Ok(tag),
            Err(RepositoryError::AlreadyExists { .. }) => {
                // Lost a race with a concurrent insert of the same name
                tracing::debug!(tag = %name, "Tag insert conflicted, re-fetching");
                self.store
                    .find_tag_by_name(name)
                    .await?
                    .ok_or_else(|| RepositoryError::NotFound {
                        entity_type: "Tag",
                        id: name.to_string(),
                    })
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use async_trait::async_trait;
    use tokio::sync::RwLock;

    use crate::storage::PageRequest;
    use crate::translation::{NewTranslation, Translation, TranslationChanges};

    /// Tag-only store that counts calls and can simulate a lost insert race.
    #[derive(Default)]
    struct MockTagStore {
        tags: RwLock<HashMap<String, Tag>>,
        find_or_create_calls: AtomicUsize,
        conflict_next: AtomicBool,
    }

    impl MockTagStore {
        async fn tag_count(&self) -> usize {
            self.tags.read().await.len()
        }
    }

    #[async_trait]
    impl TranslationStore for MockTagStore {
        async fn create_translation(&self, _new: &NewTranslation) -> Result<Translation> {
            unimplemented!()
        }

        async fn find_translation(&self, _id: i64) -> Result<Option<Translation>> {
            unimplemented!()
        }

        async fn update_translation(
            &self,
            _id: i64,
            _changes: &TranslationChanges,
        ) -> Result<Translation> {
            unimplemented!()
        }

        async fn delete_translation(&self, _id: i64) -> Result<()> {
            unimplemented!()
        }

        async fn search_translations(&self, _term: &str) -> Result<Vec<Translation>> {
            unimplemented!()
        }

        async fn find_translations_by_tag_name(&self, _name: &str) -> Result<Vec<Translation>> {
            unimplemented!()
        }

        async fn list_translations(&self, _page: PageRequest) -> Result<(Vec<Translation>, u64)> {
            unimplemented!()
        }

        async fn all_translations(&self) -> Result<Vec<Translation>> {
            unimplemented!()
        }

        async fn find_or_create_tag(&self, name: &str) -> Result<Tag> {
            self.find_or_create_calls.fetch_add(1, Ordering::SeqCst);
            let mut tags = self.tags.write().await;
            let next_id = tags.len() as i64 + 1;
            let tag = tags
                .entry(name.to_string())
                .or_insert_with(|| Tag::new(next_id, name))
                .clone();

            if self.conflict_next.swap(false, Ordering::SeqCst) {
                // Row is in place but this caller saw the unique violation
                return Err(RepositoryError::AlreadyExists {
                    entity_type: "Tag",
                    id: name.to_string(),
                });
            }
            Ok(tag)
        }

        async fn find_tag_by_name(&self, name: &str) -> Result<Option<Tag>> {
            Ok(self.tags.read().await.get(name).cloned())
        }

        async fn sync_tags(&self, _translation_id: i64, _tag_ids: &[i64]) -> Result<()> {
            unimplemented!()
        }

        async fn attach_tags(&self, _translation_id: i64, _tag_ids: &[i64]) -> Result<()> {
            unimplemented!()
        }
    }

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[tokio::test]
    async fn test_duplicate_names_share_an_id() {
        let store = Arc::new(MockTagStore::default());
        let normalizer = TagNormalizer::new(store.clone());

        let ids = normalizer.resolve(&names(&["x", "x", "y"])).await.unwrap();

        assert_eq!(ids.len(), 3);
        assert_eq!(ids[0], ids[1]);
        assert_ne!(ids[0], ids[2]);
        assert_eq!(store.find_or_create_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_resolution_is_idempotent_across_calls() {
        let store = Arc::new(MockTagStore::default());
        let normalizer = TagNormalizer::new(store.clone());

        let first = normalizer.resolve(&names(&["x", "x", "y"])).await.unwrap();
        let second = normalizer.resolve(&names(&["x", "x", "y"])).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.tag_count().await, 2);
    }

    #[tokio::test]
    async fn test_names_are_trimmed_but_case_sensitive() {
        let store = Arc::new(MockTagStore::default());
        let normalizer = TagNormalizer::new(store.clone());

        let ids = normalizer
            .resolve(&names(&[" greeting ", "greeting", "Greeting"]))
            .await
            .unwrap();

        assert_eq!(ids[0], ids[1]);
        assert_ne!(ids[0], ids[2]);
        assert_eq!(store.tag_count().await, 2);
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected_before_any_insert() {
        let store = Arc::new(MockTagStore::default());
        let normalizer = TagNormalizer::new(store.clone());

        let result = normalizer.resolve(&names(&["ok", "  "])).await;

        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
        assert_eq!(store.find_or_create_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_conflict_is_recovered_by_refetch() {
        let store = Arc::new(MockTagStore::default());
        store.conflict_next.store(true, Ordering::SeqCst);
        let normalizer = TagNormalizer::new(store.clone());

        let ids = normalizer.resolve(&names(&["racy"])).await.unwrap();

        let stored = store.find_tag_by_name("racy").await.unwrap().unwrap();
        assert_eq!(ids, vec![stored.id]);
        assert_eq!(store.tag_count().await, 1);
    }

    #[tokio::test]
    async fn test_empty_input() {
        let store = Arc::new(MockTagStore::default());
        let normalizer = TagNormalizer::new(store);

        assert!(normalizer.resolve(&[]).await.unwrap().is_empty());
    }
}
