//! API request types for translation operations.
//!
//! Pure data types deserialized by the HTTP layer and handed to the repository.

use serde::{Deserialize, Serialize};

use super::types::{NewTranslation, TranslationChanges};

/// Request payload for creating a translation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTranslationRequest {
    pub locale: String,
    pub key: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl CreateTranslationRequest {
    pub fn new(
        locale: impl Into<String>,
        key: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            locale: locale.into(),
            key: key.into(),
            content: content.into(),
            tags: None,
        }
    }

    /// Set the tag names.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Splits the request into the row to insert and the tag names to sync.
    pub fn into_parts(self) -> (NewTranslation, Vec<String>) {
        let new = NewTranslation {
            locale: self.locale.trim().to_string(),
            key: self.key.trim().to_string(),
            content: self.content,
        };
        (new, self.tags.unwrap_or_default())
    }
}

/// Request payload for updating a translation.
///
/// `tags: None` leaves the association untouched; `Some(vec![])` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTranslationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl UpdateTranslationRequest {
    /// Set the new locale.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Set the new content.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set the replacement tag names.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Splits the request into column changes and optional replacement tags.
    pub fn into_parts(self) -> (TranslationChanges, Option<Vec<String>>) {
        let changes = TranslationChanges {
            locale: self.locale.map(|l| l.trim().to_string()),
            content: self.content,
        };
        (changes, self.tags)
    }
}

/// Request payload for additively assigning tags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignTagsRequest {
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Query string for the search endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: Option<String>,
}

/// Query string for the list endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListTranslationsQuery {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_tags_optional() {
        let json = r#"{"locale":"eng","key":"hello","content":"Hi"}"#;
        let request: CreateTranslationRequest = serde_json::from_str(json).unwrap();
        let (new, tags) = request.into_parts();

        assert_eq!(new, NewTranslation::new("eng", "hello", "Hi"));
        assert!(tags.is_empty());
    }

    #[test]
    fn test_create_request_trims_locale_and_key() {
        let request = CreateTranslationRequest::new(" eng ", " hello\n", " Hi ");
        let (new, _) = request.into_parts();

        assert_eq!(new.locale, "eng");
        assert_eq!(new.key, "hello");
        // Content is free-form and kept verbatim
        assert_eq!(new.content, " Hi ");
    }

    #[test]
    fn test_update_request_distinguishes_missing_and_empty_tags() {
        let missing: UpdateTranslationRequest = serde_json::from_str(r#"{"content":"x"}"#).unwrap();
        let (_, tags) = missing.into_parts();
        assert!(tags.is_none());

        let empty: UpdateTranslationRequest = serde_json::from_str(r#"{"tags":[]}"#).unwrap();
        let (changes, tags) = empty.into_parts();
        assert!(changes.is_empty());
        assert_eq!(tags, Some(vec![]));
    }

    #[test]
    fn test_assign_tags_defaults_to_empty() {
        let request: AssignTagsRequest = serde_json::from_str("{}").unwrap();
        assert!(request.tags.is_empty());
    }

    #[test]
    fn test_update_builder() {
        let request = UpdateTranslationRequest::default()
            .with_locale("spa")
            .with_content("Hola")
            .with_tags(["a"]);
        let (changes, tags) = request.into_parts();

        assert_eq!(changes.locale.as_deref(), Some("spa"));
        assert_eq!(changes.content.as_deref(), Some("Hola"));
        assert_eq!(tags, Some(vec!["a".to_string()]));
    }
}
