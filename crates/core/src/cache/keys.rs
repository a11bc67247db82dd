/// Prefix shared by all single-translation cache keys.
pub const TRANSLATION_KEY_PREFIX: &str = "translations.";

/// Returns the cache key for a single translation.
///
/// # Examples
///
/// ```
/// use glossa_core::cache::translation_key;
///
/// assert_eq!(translation_key(42), "translations.42");
/// ```
pub fn translation_key(id: i64) -> String {
    format!("{TRANSLATION_KEY_PREFIX}{id}")
}

/// Extracts the translation ID from a cache key, if present.
///
/// Returns `None` for keys outside the translation namespace.
pub fn extract_translation_id(key: &str) -> Option<i64> {
    key.strip_prefix(TRANSLATION_KEY_PREFIX)?.parse().ok()
}
