use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named label attached to translations. `name` is the natural key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

impl Tag {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A localized text entry identified by locale and key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    /// Store-assigned, immutable identifier.
    pub id: i64,
    /// Short language code (e.g. "eng").
    pub locale: String,
    /// Lookup identifier. Not unique across translations.
    pub key: String,
    /// Free-form content, often serialized per-language variants.
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Associated tags in insertion order.
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Translation {
    /// Returns the tag names in association order.
    pub fn tag_names(&self) -> Vec<&str> {
        self.tags.iter().map(|t| t.name.as_str()).collect()
    }

    /// Returns true if a tag with exactly this name is attached.
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name == name)
    }

    /// Replaces the tag set.
    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }
}

/// Fields required to insert a translation row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTranslation {
    pub locale: String,
    pub key: String,
    pub content: String,
}

impl NewTranslation {
    pub fn new(
        locale: impl Into<String>,
        key: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            locale: locale.into(),
            key: key.into(),
            content: content.into(),
        }
    }
}

/// Partial update of a translation row. `None` leaves the column untouched.
///
/// The key is fixed at creation and cannot be changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationChanges {
    pub locale: Option<String>,
    pub content: Option<String>,
}

impl TranslationChanges {
    /// Returns true if no column would change.
    pub fn is_empty(&self) -> bool {
        self.locale.is_none() && self.content.is_none()
    }
}
