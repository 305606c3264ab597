//! Versioned on-disk representation of a weather log

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{ObservationRecord, WeatherData, WeatherLog};
use crate::types::RollingPeriod;

/// Current layout of the saved log
pub const SCHEMA_VERSION: u32 = 1;

/// Reasons stored log bytes cannot be turned back into a log
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("malformed log data: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("log data carries no schema version")]
    MissingVersion,

    #[error("unsupported schema version {0}")]
    UnsupportedVersion(u32),

    /// JSON has no NaN or infinity; serde_json would write `null` and the
    /// file could never be read back
    #[error("observation {id} has a non-finite {field} temperature")]
    NonFiniteReading { id: String, field: &'static str },
}

/// The saved form: tagged observation records plus the rolling period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedLog {
    pub version: u32,
    pub rolling_period: RollingPeriod,
    pub observations: Vec<ObservationRecord>,
}

#[derive(Deserialize)]
struct VersionProbe {
    version: Option<u32>,
}

impl PersistedLog {
    pub fn from_log(log: &WeatherLog) -> Self {
        Self {
            version: SCHEMA_VERSION,
            rolling_period: log.rolling_period(),
            observations: log.observations().to_vec(),
        }
    }

    pub fn into_log(self) -> WeatherLog {
        WeatherLog::from_parts(self.observations, self.rolling_period)
    }
}

fn check_finite<T: WeatherData>(record: &T) -> Result<(), SchemaError> {
    let readings = [
        ("greenhouse", record.greenhouse_temp()),
        ("garden", record.garden_temp()),
    ];
    match readings.iter().find(|(_, temp)| !temp.is_finite()) {
        Some((field, _)) => Err(SchemaError::NonFiniteReading {
            id: record.id().to_string(),
            field: *field,
        }),
        None => Ok(()),
    }
}

/// Serialize a log into the current schema.
///
/// Refuses logs holding NaN or infinite temperatures rather than writing
/// bytes that `decode_log` would reject.
pub fn encode_log(log: &WeatherLog) -> Result<Vec<u8>, SchemaError> {
    for record in log.observations() {
        check_finite(record)?;
    }
    Ok(serde_json::to_vec_pretty(&PersistedLog::from_log(log))?)
}

/// Parse saved bytes, checking the schema version before the body
pub fn decode_log(bytes: &[u8]) -> Result<WeatherLog, SchemaError> {
    let probe: VersionProbe = serde_json::from_slice(bytes)?;
    match probe.version {
        None => Err(SchemaError::MissingVersion),
        Some(1) => {
            let persisted: PersistedLog = serde_json::from_slice(bytes)?;
            Ok(persisted.into_log())
        }
        Some(other) => Err(SchemaError::UnsupportedVersion(other)),
    }
}
