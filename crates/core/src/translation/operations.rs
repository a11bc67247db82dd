//! Pure validation and normalization functions for translations.

use std::collections::HashSet;

use super::error::TranslationError;
use super::types::{NewTranslation, TranslationChanges};

pub const MAX_LOCALE_LEN: usize = 16;
pub const MAX_KEY_LEN: usize = 255;
pub const MAX_TAG_NAME_LEN: usize = 100;

fn validate_locale(locale: &str) -> Result<(), TranslationError> {
    if locale.trim().is_empty() {
        return Err(TranslationError::EmptyLocale);
    }
    if locale.chars().count() > MAX_LOCALE_LEN {
        return Err(TranslationError::LocaleTooLong);
    }
    Ok(())
}

/// Validates a translation before insertion.
pub fn validate_new_translation(new: &NewTranslation) -> Result<(), TranslationError> {
    validate_locale(&new.locale)?;
    if new.key.trim().is_empty() {
        return Err(TranslationError::EmptyKey);
    }
    if new.key.chars().count() > MAX_KEY_LEN {
        return Err(TranslationError::KeyTooLong);
    }
    if new.content.trim().is_empty() {
        return Err(TranslationError::EmptyContent);
    }
    Ok(())
}

/// Validates a partial update. Absent fields are not checked.
pub fn validate_changes(changes: &TranslationChanges) -> Result<(), TranslationError> {
    if let Some(locale) = &changes.locale {
        validate_locale(locale)?;
    }
    if let Some(content) = &changes.content {
        if content.trim().is_empty() {
            return Err(TranslationError::EmptyContent);
        }
    }
    Ok(())
}

/// Validates and trims a single tag name.
pub fn normalize_tag_name(name: &str) -> Result<String, TranslationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TranslationError::EmptyTagName);
    }
    if trimmed.chars().count() > MAX_TAG_NAME_LEN {
        return Err(TranslationError::TagNameTooLong(trimmed.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Returns the distinct names in first-seen order. Matching is exact.
pub fn distinct_tag_names(names: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    names
        .iter()
        .map(String::as_str)
        .filter(|name| seen.insert(*name))
        .collect()
}

/// Validates a search term, returning it trimmed.
pub fn validate_search_query(query: Option<&str>) -> Result<&str, TranslationError> {
    match query.map(str::trim) {
        Some(q) if !q.is_empty() => Ok(q),
        _ => Err(TranslationError::EmptyQuery),
    }
}
