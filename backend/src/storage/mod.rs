//! Persistence gateway for the weather log
//!
//! A store only knows how to read the whole log and write the whole log.
//! Falling back to an empty log when nothing usable is stored is handled
//! here, not by the store implementations.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use shared::WeatherLog;

use crate::error::{StorageError, StorageResult};

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Durable home of a weather log
pub trait ObservationStore {
    /// Read the full log
    fn load(&self) -> StorageResult<WeatherLog>;

    /// Replace the stored log with `log`
    fn save(&self, log: &WeatherLog) -> StorageResult<()>;
}

/// How a log was obtained from its store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    /// Nothing stored yet
    Missing,
    /// Stored data exists but could not be used; the empty log replaces it
    /// only in memory
    Unreadable,
}

/// Load the stored log, or start an empty one if it cannot be read
pub fn load_or_empty<S: ObservationStore>(store: &S) -> WeatherLog {
    load_with_outcome(store).0
}

/// Like [`load_or_empty`], also reporting whether a fallback happened
pub fn load_with_outcome<S: ObservationStore>(store: &S) -> (WeatherLog, LoadOutcome) {
    match store.load() {
        Ok(log) => {
            tracing::debug!(
                observations = log.total_observation_number(),
                rolling_period = %log.rolling_period(),
                "Loaded weather log"
            );
            (log, LoadOutcome::Loaded)
        }
        Err(StorageError::NotFound(path)) => {
            tracing::info!("No saved log at {}, starting empty", path.display());
            (WeatherLog::new(), LoadOutcome::Missing)
        }
        Err(err) => {
            tracing::warn!(code = err.code(), "Falling back to an empty log: {}", err);
            (WeatherLog::new(), LoadOutcome::Unreadable)
        }
    }
}

/// Sibling path used while a replacement file is written
fn temporary_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Atomic write: write to `.tmp`, sync, then rename over the target
pub(crate) fn write_atomically(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = temporary_path(path);
    let written = File::create(&tmp_path).and_then(|mut file| {
        file.write_all(bytes)?;
        file.sync_all()
    });

    match written.and_then(|_| fs::rename(&tmp_path, path)) {
        Ok(()) => sync_parent(path),
        Err(err) => {
            let _ = fs::remove_file(&tmp_path);
            Err(err)
        }
    }
}

/// Flush the directory entry so the rename itself survives a crash
#[cfg(unix)]
fn sync_parent(path: &Path) -> std::io::Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    File::open(parent)?.sync_all()
}

#[cfg(not(unix))]
fn sync_parent(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
