//! SQLite schema definitions and SQL query constants.
//!
//! This module contains all SQL statements used by the SQLite store,
//! following the Functional Core pattern - pure data, no I/O.

/// SQL statement to enable foreign keys and create all tables.
pub const CREATE_TABLES: &str = r#"
PRAGMA foreign_keys = ON;

-- Translations table
CREATE TABLE IF NOT EXISTS translations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    locale TEXT NOT NULL,
    "key" TEXT NOT NULL,
    content TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Tags table (name is the natural key)
CREATE TABLE IF NOT EXISTS tags (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Translation/tag association table
CREATE TABLE IF NOT EXISTS translation_tag (
    translation_id INTEGER NOT NULL,
    tag_id INTEGER NOT NULL,
    PRIMARY KEY (translation_id, tag_id),
    FOREIGN KEY (translation_id) REFERENCES translations(id) ON DELETE CASCADE,
    FOREIGN KEY (tag_id) REFERENCES tags(id) ON DELETE CASCADE
);

-- Indexes for efficient queries
CREATE INDEX IF NOT EXISTS idx_translations_locale ON translations(locale);
CREATE INDEX IF NOT EXISTS idx_translations_key ON translations("key");
CREATE INDEX IF NOT EXISTS idx_translation_tag_tag_id ON translation_tag(tag_id);
"#;

/// Name of the scalar function that lowercases text with full Unicode folding.
///
/// SQLite's `LIKE` only folds ASCII letters, so search compares folded
/// columns against a folded term.
pub const FOLD_FUNCTION: &str = "fold";

// Translation queries
pub const INSERT_TRANSLATION: &str = r#"
INSERT INTO translations (locale, "key", content, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

pub const SELECT_TRANSLATION_BY_ID: &str = r#"
SELECT id, locale, "key", content, created_at, updated_at
FROM translations
WHERE id = ?1
"#;

pub const TRANSLATION_EXISTS: &str = r#"
SELECT 1
FROM translations
WHERE id = ?1
"#;

pub const UPDATE_TRANSLATION: &str = r#"
UPDATE translations
SET locale = COALESCE(?2, locale), content = COALESCE(?3, content), updated_at = ?4
WHERE id = ?1
"#;

pub const DELETE_TRANSLATION: &str = r#"
DELETE FROM translations
WHERE id = ?1
"#;

pub const SEARCH_TRANSLATIONS: &str = r#"
SELECT id, locale, "key", content, created_at, updated_at
FROM translations
WHERE fold("key") LIKE ?1 ESCAPE '\'
   OR fold(content) LIKE ?1 ESCAPE '\'
   OR fold(locale) LIKE ?1 ESCAPE '\'
ORDER BY id ASC
"#;

pub const SELECT_TRANSLATIONS_BY_TAG_NAME: &str = r#"
SELECT t.id, t.locale, t."key", t.content, t.created_at, t.updated_at
FROM translations t
WHERE EXISTS (
    SELECT 1
    FROM translation_tag tt
    INNER JOIN tags g ON g.id = tt.tag_id
    WHERE tt.translation_id = t.id AND g.name = ?1
)
ORDER BY t.id ASC
"#;

pub const SELECT_TRANSLATIONS_PAGE: &str = r#"
SELECT id, locale, "key", content, created_at, updated_at
FROM translations
ORDER BY id ASC
LIMIT ?1 OFFSET ?2
"#;

pub const COUNT_TRANSLATIONS: &str = r#"
SELECT COUNT(*)
FROM translations
"#;

pub const SELECT_ALL_TRANSLATIONS: &str = r#"
SELECT id, locale, "key", content, created_at, updated_at
FROM translations
ORDER BY id ASC
"#;

// Tag queries
pub const UPSERT_TAG: &str = r#"
INSERT INTO tags (name, created_at, updated_at)
VALUES (?1, ?2, ?2)
ON CONFLICT(name) DO NOTHING
"#;

pub const SELECT_TAG_BY_NAME: &str = r#"
SELECT id, name
FROM tags
WHERE name = ?1
"#;

pub const SELECT_TAGS_FOR_TRANSLATION: &str = r#"
SELECT g.id, g.name
FROM translation_tag tt
INNER JOIN tags g ON g.id = tt.tag_id
WHERE tt.translation_id = ?1
ORDER BY tt.rowid ASC
"#;

// Association queries
pub const DELETE_TRANSLATION_TAGS: &str = r#"
DELETE FROM translation_tag
WHERE translation_id = ?1
"#;

pub const INSERT_TRANSLATION_TAG: &str = r#"
INSERT OR IGNORE INTO translation_tag (translation_id, tag_id)
VALUES (?1, ?2)
"#;
