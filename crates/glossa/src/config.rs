use std::{env, path::PathBuf, time::Duration};

use glossa_core::export::export_file_path;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache TTL in seconds (default: 60)
    pub cache_ttl_seconds: u64,
    /// Maximum number of cache entries (default: 10,000)
    pub cache_max_entries: usize,
    /// Path to SQLite database file (default: "glossa.db")
    pub sqlite_path: String,
    /// Directory holding the export snapshot (default: "storage")
    pub export_dir: PathBuf,
    /// Pending export runs before requests coalesce (default: 1)
    pub export_queue_capacity: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CACHE_TTL_SECONDS` - Cache TTL in seconds (default: 60)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 10,000)
    /// - `SQLITE_PATH` - SQLite database path (default: "glossa.db")
    /// - `EXPORT_DIR` - Export snapshot directory (default: "storage")
    /// - `EXPORT_QUEUE_CAPACITY` - Pending export runs (default: 1)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable source.
    ///
    /// Unparseable or zero-sized numeric values fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            cache_ttl_seconds: lookup("CACHE_TTL_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            cache_max_entries: lookup("CACHE_MAX_ENTRIES")
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(10_000),
            sqlite_path: lookup("SQLITE_PATH").unwrap_or_else(|| "glossa.db".to_string()),
            export_dir: lookup("EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("storage")),
            export_queue_capacity: lookup("EXPORT_QUEUE_CAPACITY")
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(1),
        }
    }

    /// Get cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    /// Full path of the export snapshot file.
    pub fn export_path(&self) -> PathBuf {
        export_file_path(&self.export_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
