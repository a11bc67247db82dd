use async_trait::async_trait;

use crate::translation::{NewTranslation, Tag, Translation, TranslationChanges};

use super::{PageRequest, Result};

/// Persistence for translations, tags and their association.
///
/// Every method returning a [`Translation`] includes its tags.
#[async_trait]
pub trait TranslationStore: Send + Sync {
    /// Inserts a translation and returns it with its store-assigned ID.
    async fn create_translation(&self, new: &NewTranslation) -> Result<Translation>;

    /// Gets a translation by ID.
    async fn find_translation(&self, id: i64) -> Result<Option<Translation>>;

    /// Applies a partial update, returning the updated row.
    ///
    /// Fails with `NotFound` if no row has this ID.
    async fn update_translation(&self, id: i64, changes: &TranslationChanges)
        -> Result<Translation>;

    /// Hard-deletes a translation and its association rows.
    ///
    /// Fails with `NotFound` if no row has this ID.
    async fn delete_translation(&self, id: i64) -> Result<()>;

    /// Case-insensitive substring match on key, content or locale, ordered by ID.
    async fn search_translations(&self, term: &str) -> Result<Vec<Translation>>;

    /// Translations carrying a tag with exactly this name, ordered by ID.
    async fn find_translations_by_tag_name(&self, name: &str) -> Result<Vec<Translation>>;

    /// One page of translations ordered by ID, plus the total row count.
    async fn list_translations(&self, page: PageRequest) -> Result<(Vec<Translation>, u64)>;

    /// Every translation, ordered by ID.
    async fn all_translations(&self) -> Result<Vec<Translation>>;

    /// Returns the tag with this name, creating it if absent.
    ///
    /// Implementations must be atomic with respect to concurrent callers.
    /// A backend that detects a conflicting insert instead may return
    /// `AlreadyExists`, and callers re-fetch with [`find_tag_by_name`].
    ///
    /// [`find_tag_by_name`]: TranslationStore::find_tag_by_name
    async fn find_or_create_tag(&self, name: &str) -> Result<Tag>;

    /// Gets a tag by exact name.
    async fn find_tag_by_name(&self, name: &str) -> Result<Option<Tag>>;

    /// Replaces the translation's tag set with exactly `tag_ids`.
    async fn sync_tags(&self, translation_id: i64, tag_ids: &[i64]) -> Result<()>;

    /// Adds `tag_ids` to the translation's tag set, keeping existing members.
    async fn attach_tags(&self, translation_id: i64, tag_ids: &[i64]) -> Result<()>;
}
