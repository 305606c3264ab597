//! JSON file store

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use shared::{decode_log, encode_log, WeatherLog};

use super::{write_atomically, ObservationStore};
use crate::error::{StorageError, StorageResult};

/// Stores the log as a single versioned JSON document.
///
/// Writes are atomic so an interrupted save leaves the previous file intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ObservationStore for JsonFileStore {
    fn load(&self) -> StorageResult<WeatherLog> {
        let bytes = std::fs::read(&self.path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => StorageError::NotFound(self.path.clone()),
            _ => StorageError::Read(err),
        })?;
        Ok(decode_log(&bytes)?)
    }

    fn save(&self, log: &WeatherLog) -> StorageResult<()> {
        let bytes = encode_log(log).map_err(StorageError::Encode)?;
        write_atomically(&self.path, &bytes).map_err(StorageError::Write)?;
        tracing::debug!(
            path = %self.path.display(),
            observations = log.total_observation_number(),
            "Saved weather log"
        );
        Ok(())
    }
}
