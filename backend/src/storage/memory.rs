//! In-memory store (for testing and demos)

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use shared::{decode_log, encode_log, WeatherLog};

use super::ObservationStore;
use crate::error::{StorageError, StorageResult};

/// Keeps the encoded log in memory, exactly as a file store would write it
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<Option<Vec<u8>>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with arbitrary stored bytes, valid or not
    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            data: Mutex::new(Some(bytes.into())),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Make every following save fail, as a full disk would
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// The last successfully saved bytes
    pub fn bytes(&self) -> StorageResult<Option<Vec<u8>>> {
        let data = self.data.lock().map_err(|_| StorageError::LockPoisoned)?;
        Ok(data.clone())
    }
}

impl ObservationStore for MemoryStore {
    fn load(&self) -> StorageResult<WeatherLog> {
        let data = self.data.lock().map_err(|_| StorageError::LockPoisoned)?;
        match data.as_deref() {
            Some(bytes) => Ok(decode_log(bytes)?),
            None => Err(StorageError::NotFound("memory".into())),
        }
    }

    fn save(&self, log: &WeatherLog) -> StorageResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Write(std::io::Error::new(
                std::io::ErrorKind::Other,
                "simulated write failure",
            )));
        }
        let bytes = encode_log(log).map_err(StorageError::Encode)?;
        let mut data = self.data.lock().map_err(|_| StorageError::LockPoisoned)?;
        *data = Some(bytes);
        Ok(())
    }
}
