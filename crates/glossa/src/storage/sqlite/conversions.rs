//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.
//! These are testable in isolation without database access.

use chrono::{DateTime, Utc};
use glossa_core::translation::{Tag, Translation};
use rusqlite::Row;

/// Convert a SQLite row to a Translation with no tags loaded.
///
/// Expected columns: id, locale, key, content, created_at, updated_at
pub fn row_to_translation(row: &Row) -> rusqlite::Result<Translation> {
    let id: i64 = row.get(0)?;
    let locale: String = row.get(1)?;
    let key: String = row.get(2)?;
    let content: String = row.get(3)?;
    let created_at: String = row.get(4)?;
    let updated_at: String = row.get(5)?;

    Ok(Translation {
        id,
        locale,
        key,
        content,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
        tags: Vec::new(),
    })
}

/// Convert a SQLite row to a Tag.
///
/// Expected columns: id, name
pub fn row_to_tag(row: &Row) -> rusqlite::Result<Tag> {
    Ok(Tag {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

/// Parse an RFC3339 timestamp.
pub fn parse_datetime(s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
}

/// Format a DateTime for SQLite storage (RFC3339).
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// Build a `LIKE` pattern matching `term` as a literal substring.
///
/// `%`, `_` and the escape character itself are escaped with `\`.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
