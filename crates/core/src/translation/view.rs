//! Request-agnostic response DTOs.
//!
//! These are what crosses the HTTP boundary; timestamps stay internal.

use serde::{Deserialize, Serialize};

use super::types::{Tag, Translation};
use crate::storage::PageRequest;

/// A tag as exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagView {
    pub id: i64,
    pub name: String,
}

impl From<&Tag> for TagView {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name.clone(),
        }
    }
}

/// A translation as exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationView {
    pub id: i64,
    pub key: String,
    pub content: String,
    pub locale: String,
    pub tags: Vec<TagView>,
}

impl From<&Translation> for TranslationView {
    fn from(translation: &Translation) -> Self {
        Self {
            id: translation.id,
            key: translation.key.clone(),
            content: translation.content.clone(),
            locale: translation.locale.clone(),
            tags: translation.tags.iter().map(TagView::from).collect(),
        }
    }
}

impl From<Translation> for TranslationView {
    fn from(translation: Translation) -> Self {
        Self {
            id: translation.id,
            key: translation.key,
            content: translation.content,
            locale: translation.locale,
            tags: translation.tags.iter().map(TagView::from).collect(),
        }
    }
}

/// Maps a list of translations to views.
pub fn to_views(translations: Vec<Translation>) -> Vec<TranslationView> {
    translations.into_iter().map(TranslationView::from).collect()
}

/// One page of translations with pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationPage {
    pub current_page: u32,
    pub per_page: u32,
    pub total: u64,
    pub last_page: u32,
    pub data: Vec<TranslationView>,
}

impl TranslationPage {
    pub fn new(request: PageRequest, total: u64, items: Vec<Translation>) -> Self {
        Self {
            current_page: request.page(),
            per_page: request.per_page(),
            total,
            last_page: request.last_page(total),
            data: to_views(items),
        }
    }
}
