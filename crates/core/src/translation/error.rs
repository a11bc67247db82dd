use thiserror::Error;

/// Errors that can occur when validating translation input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TranslationError {
    #[error("Locale cannot be empty")]
    EmptyLocale,
    #[error("Locale too long (max 16 characters)")]
    LocaleTooLong,
    #[error("Key cannot be empty")]
    EmptyKey,
    #[error("Key too long (max 255 characters)")]
    KeyTooLong,
    #[error("Content cannot be empty")]
    EmptyContent,
    #[error("Tag name cannot be empty")]
    EmptyTagName,
    #[error("Tag name too long (max 100 characters): {0}")]
    TagNameTooLong(String),
    #[error("Query parameter is required.")]
    EmptyQuery,
}
