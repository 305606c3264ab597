//! Error handling for the greenhouse temperature log
//!
//! Storage failures never take the in-memory log down with them: read
//! failures fall back to an empty log and write failures are logged.

use std::path::PathBuf;

use shared::SchemaError;
use thiserror::Error;

/// Persistence gateway errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("No saved log at {}", .0.display())]
    NotFound(PathBuf),

    #[error("Unable to read saved log: {0}")]
    Read(#[source] std::io::Error),

    #[error("Unable to write log: {0}")]
    Write(#[source] std::io::Error),

    #[error("Saved log is unusable: {0}")]
    Schema(#[from] SchemaError),

    #[error("Unable to encode log: {0}")]
    Encode(#[source] SchemaError),

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

impl StorageError {
    pub fn code(&self) -> &'static str {
        match self {
            StorageError::NotFound(_) => "LOG_NOT_FOUND",
            StorageError::Read(_) => "READ_FAILURE",
            StorageError::Write(_) => "WRITE_FAILURE",
            StorageError::Schema(_) => "UNSUPPORTED_SCHEMA",
            StorageError::Encode(_) => "ENCODE_FAILURE",
            StorageError::LockPoisoned => "LOCK_POISONED",
        }
    }
}

/// Result type alias for the persistence gateway
pub type StorageResult<T> = Result<T, StorageError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV writer error: {0}")]
    CsvWriter(String),

    #[error("UTF-8 conversion error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Export write failed: {0}")]
    ExportIo(#[from] std::io::Error),

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),
}

impl AppError {
    /// Stable code used in log events
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Storage(err) => err.code(),
            AppError::Csv(_) | AppError::CsvWriter(_) | AppError::Utf8(_) => "CSV_ERROR",
            AppError::ExportIo(_) => "EXPORT_WRITE_FAILURE",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }
}

/// Result type alias for services
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_codes_surface_through_app_error() {
        let err = AppError::from(StorageError::Schema(SchemaError::UnsupportedVersion(9)));
        assert_eq!(err.code(), "UNSUPPORTED_SCHEMA");
        assert_eq!(
            err.to_string(),
            "Storage error: Saved log is unusable: unsupported schema version 9"
        );
    }

    #[test]
    fn test_not_found_mentions_path() {
        let err = StorageError::NotFound(PathBuf::from("data/SavedObservations.json"));
        assert!(err.to_string().contains("data/SavedObservations.json"));
    }

    #[test]
    fn test_encode_failure_has_its_own_code() {
        let err = StorageError::Encode(SchemaError::NonFiniteReading {
            id: "abc".to_string(),
            field: "greenhouse",
        });
        assert_eq!(err.code(), "ENCODE_FAILURE");
        assert_eq!(
            err.to_string(),
            "Unable to encode log: observation abc has a non-finite greenhouse temperature"
        );
    }
}
