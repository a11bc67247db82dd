//! SQLite storage backend implementation.
//!
//! This module provides a SQLite-based implementation of [`TranslationStore`]
//! using `rusqlite` for synchronous operations and `tokio-rusqlite` for async wrapping.
//!
//! [`TranslationStore`]: glossa_core::storage::TranslationStore

mod conversions;
mod error;
mod repository;
mod schema;

pub use repository::SqliteStore;
