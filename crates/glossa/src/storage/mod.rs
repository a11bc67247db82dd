//! Storage backend implementations.
//!
//! Concrete implementations of the store trait defined in
//! `glossa_core::storage`.

pub mod sqlite;

pub use sqlite::SqliteStore;
