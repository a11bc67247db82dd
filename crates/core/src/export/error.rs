use thiserror::Error;

use crate::storage::RepositoryError;

/// Errors that can occur while writing or reading the export file.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExportError {
    #[error("Translations file not found.")]
    NotFound,
    #[error("Export I/O failed: {0}")]
    Io(String),
    #[error("Export serialization failed: {0}")]
    Serialization(String),
    #[error("Export snapshot failed: {0}")]
    Snapshot(#[from] RepositoryError),
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound
        } else {
            Self::Io(err.to_string())
        }
    }
}

impl From<ExportError> for RepositoryError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::NotFound => RepositoryError::NotFound {
                entity_type: "Export",
                id: super::EXPORT_FILE_NAME.to_string(),
            },
            ExportError::Io(msg) => RepositoryError::Io(msg),
            ExportError::Serialization(msg) => RepositoryError::Serialization(msg),
            ExportError::Snapshot(inner) => inner,
        }
    }
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_not_found_maps_to_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert_eq!(ExportError::from(io), ExportError::NotFound);
    }

    #[test]
    fn test_other_io_maps_to_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(ExportError::from(io), ExportError::Io(_)));
    }

    #[test]
    fn test_not_found_converts_to_repository_not_found() {
        let error: RepositoryError = ExportError::NotFound.into();
        assert!(error.is_not_found());
    }

    #[test]
    fn test_io_converts_to_repository_io() {
        let error: RepositoryError = ExportError::Io("disk full".to_string()).into();
        assert_eq!(error, RepositoryError::Io("disk full".to_string()));
    }
}
