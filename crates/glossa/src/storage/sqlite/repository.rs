//! SQLite store implementation.
//!
//! Implements [`TranslationStore`] from `glossa_core::storage` using SQLite.

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::functions::FunctionFlags;
use tokio_rusqlite::Connection;

use glossa_core::storage::{PageRequest, RepositoryError, Result, TranslationStore};
use glossa_core::translation::{NewTranslation, Tag, Translation, TranslationChanges};

use super::conversions::{format_datetime, like_pattern, row_to_tag, row_to_translation};
use super::error::{map_tokio_rusqlite_error, map_tokio_rusqlite_error_with_id};
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// Loads a translation's tags in association order.
fn load_tags(conn: &rusqlite::Connection, translation_id: i64) -> rusqlite::Result<Vec<Tag>> {
    let mut stmt = conn.prepare_cached(schema::SELECT_TAGS_FOR_TRANSLATION)?;
    let rows = stmt.query_map([translation_id], row_to_tag)?;
    rows.collect()
}

/// Loads a single translation with its tags.
fn load_translation(
    conn: &rusqlite::Connection,
    id: i64,
) -> rusqlite::Result<Option<Translation>> {
    let mut stmt = conn.prepare_cached(schema::SELECT_TRANSLATION_BY_ID)?;
    let translation = match stmt.query_row([id], row_to_translation) {
        Ok(translation) => translation,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
        Err(e) => return Err(e),
    };
    let tags = load_tags(conn, id)?;
    Ok(Some(translation.with_tags(tags)))
}

/// Runs a multi-row translation query and attaches tags to each row.
fn query_translations<P: rusqlite::Params>(
    conn: &rusqlite::Connection,
    sql: &str,
    params: P,
) -> rusqlite::Result<Vec<Translation>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, row_to_translation)?;

    let mut translations = Vec::new();
    for row_result in rows {
        let translation = row_result?;
        let tags = load_tags(conn, translation.id)?;
        translations.push(translation.with_tags(tags));
    }
    Ok(translations)
}

/// Fails with `QueryReturnedNoRows` unless the translation exists.
fn ensure_translation_exists(conn: &rusqlite::Connection, id: i64) -> rusqlite::Result<()> {
    conn.query_row(schema::TRANSLATION_EXISTS, [id], |_| Ok(()))
}

/// Registers the Unicode lowercasing function used by search.
fn register_fold_function(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        schema::FOLD_FUNCTION,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text: Option<String> = ctx.get(0)?;
            Ok(text.map(|text| text.to_lowercase()))
        },
    )
}

/// SQLite-backed translation store.
///
/// A single connection serializes all statements, so `find_or_create_tag`
/// is atomic without further locking.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Creates a new store with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new store with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            register_fold_function(conn).map_err(wrap_err)?;
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

#[async_trait]
impl TranslationStore for SqliteStore {
    async fn create_translation(&self, new: &NewTranslation) -> Result<Translation> {
        let locale = new.locale.clone();
        let key = new.key.clone();
        let content = new.content.clone();
        let now = format_datetime(&Utc::now());
        let entity_key = new.key.clone();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_TRANSLATION,
                    rusqlite::params![locale, key, content, now, now],
                )
                .map_err(wrap_err)?;
                let id = conn.last_insert_rowid();
                load_translation(conn, id)
                    .map_err(wrap_err)?
                    .ok_or_else(|| wrap_err(rusqlite::Error::QueryReturnedNoRows))
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Translation", entity_key))
    }

    async fn find_translation(&self, id: i64) -> Result<Option<Translation>> {
        self.conn
            .call(move |conn| load_translation(conn, id).map_err(wrap_err))
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Translation", id.to_string()))
    }

    async fn update_translation(
        &self,
        id: i64,
        changes: &TranslationChanges,
    ) -> Result<Translation> {
        let locale = changes.locale.clone();
        let content = changes.content.clone();
        let updated_at = format_datetime(&Utc::now());

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_TRANSLATION,
                        rusqlite::params![id, locale, content, updated_at],
                    )
                    .map_err(wrap_err)?;
                if rows == 0 {
                    return Err(wrap_err(rusqlite::Error::QueryReturnedNoRows));
                }
                load_translation(conn, id)
                    .map_err(wrap_err)?
                    .ok_or_else(|| wrap_err(rusqlite::Error::QueryReturnedNoRows))
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Translation", id.to_string()))
    }

    async fn delete_translation(&self, id: i64) -> Result<()> {
        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_TRANSLATION, [id])
                    .map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Translation", id.to_string()))
    }

    async fn search_translations(&self, term: &str) -> Result<Vec<Translation>> {
        let pattern = like_pattern(&term.to_lowercase());

        self.conn
            .call(move |conn| {
                query_translations(conn, schema::SEARCH_TRANSLATIONS, [&pattern]).map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Translation"))
    }

    async fn find_translations_by_tag_name(&self, name: &str) -> Result<Vec<Translation>> {
        let name = name.to_string();

        self.conn
            .call(move |conn| {
                query_translations(conn, schema::SELECT_TRANSLATIONS_BY_TAG_NAME, [&name])
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Translation"))
    }

    async fn list_translations(&self, page: PageRequest) -> Result<(Vec<Translation>, u64)> {
        let limit = i64::try_from(page.limit()).unwrap_or(i64::MAX);
        let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);

        self.conn
            .call(move |conn| {
                let total: i64 = conn
                    .query_row(schema::COUNT_TRANSLATIONS, [], |row| row.get(0))
                    .map_err(wrap_err)?;
                let translations = query_translations(
                    conn,
                    schema::SELECT_TRANSLATIONS_PAGE,
                    rusqlite::params![limit, offset],
                )
                .map_err(wrap_err)?;
                Ok((translations, u64::try_from(total).unwrap_or(0)))
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Translation"))
    }

    async fn all_translations(&self) -> Result<Vec<Translation>> {
        self.conn
            .call(move |conn| {
                query_translations(conn, schema::SELECT_ALL_TRANSLATIONS, []).map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Translation"))
    }

    async fn find_or_create_tag(&self, name: &str) -> Result<Tag> {
        let name = name.to_string();
        let tag_name = name.clone();
        let now = format_datetime(&Utc::now());

        self.conn
            .call(move |conn| {
                conn.execute(schema::UPSERT_TAG, rusqlite::params![name, now])
                    .map_err(wrap_err)?;
                conn.query_row(schema::SELECT_TAG_BY_NAME, [&name], row_to_tag)
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Tag", tag_name))
    }

    async fn find_tag_by_name(&self, name: &str) -> Result<Option<Tag>> {
        let name = name.to_string();
        let tag_name = name.clone();

        self.conn
            .call(move |conn| {
                match conn.query_row(schema::SELECT_TAG_BY_NAME, [&name], row_to_tag) {
                    Ok(tag) => Ok(Some(tag)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Tag", tag_name))
    }

    async fn sync_tags(&self, translation_id: i64, tag_ids: &[i64]) -> Result<()> {
        let tag_ids = tag_ids.to_vec();

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                ensure_translation_exists(&tx, translation_id).map_err(wrap_err)?;
                tx.execute(schema::DELETE_TRANSLATION_TAGS, [translation_id])
                    .map_err(wrap_err)?;
                {
                    let mut stmt = tx
                        .prepare(schema::INSERT_TRANSLATION_TAG)
                        .map_err(wrap_err)?;
                    for tag_id in &tag_ids {
                        stmt.execute([translation_id, *tag_id]).map_err(wrap_err)?;
                    }
                }
                tx.commit().map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| {
                map_tokio_rusqlite_error_with_id(e, "Translation", translation_id.to_string())
            })
    }

    async fn attach_tags(&self, translation_id: i64, tag_ids: &[i64]) -> Result<()> {
        let tag_ids = tag_ids.to_vec();

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                ensure_translation_exists(&tx, translation_id).map_err(wrap_err)?;
                {
                    let mut stmt = tx
                        .prepare(schema::INSERT_TRANSLATION_TAG)
                        .map_err(wrap_err)?;
                    for tag_id in &tag_ids {
                        stmt.execute([translation_id, *tag_id]).map_err(wrap_err)?;
                    }
                }
                tx.commit().map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| {
                map_tokio_rusqlite_error_with_id(e, "Translation", translation_id.to_string())
            })
    }
}
