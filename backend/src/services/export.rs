//! CSV export of the weather log

use std::path::Path;

use chrono::SecondsFormat;
use serde::Serialize;
use shared::WeatherData;

use crate::error::{AppError, AppResult};
use crate::storage::write_atomically;

/// Suggested name for the exported file
pub const DEFAULT_CSV_FILE_NAME: &str = "observations.csv";

/// One exported row; field order is the column order
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Greenhouse")]
    greenhouse: f64,
    #[serde(rename = "Garden")]
    garden: f64,
    #[serde(rename = "Min")]
    min: i32,
    #[serde(rename = "Max")]
    max: i32,
    #[serde(rename = "Note")]
    note: &'a str,
}

impl<'a> CsvRow<'a> {
    fn from_record<T: WeatherData>(record: &'a T) -> Self {
        Self {
            date: record
                .date_observed()
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            greenhouse: record.greenhouse_temp(),
            garden: record.garden_temp(),
            min: record.min_temp(),
            max: record.max_temp(),
            note: record.note(),
        }
    }
}

/// Render readings as CSV text, one row each in the given order.
///
/// An empty slice renders as an empty string, without a header line.
pub fn render_csv<T: WeatherData>(records: &[T]) -> AppResult<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for record in records {
        wtr.serialize(CsvRow::from_record(record))?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| AppError::CsvWriter(e.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Render and atomically write the export file
pub fn write_csv<T: WeatherData>(path: &Path, records: &[T]) -> AppResult<()> {
    let csv_data = render_csv(records)?;
    write_atomically(path, csv_data.as_bytes())?;
    tracing::debug!(path = %path.display(), rows = records.len(), "Wrote CSV export");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shared::{Observation, ObservationRecord};

    #[test]
    fn test_empty_log_renders_nothing() {
        let records: Vec<ObservationRecord> = Vec::new();
        assert_eq!(render_csv(&records).unwrap(), "");
    }

    #[test]
    fn test_columns_and_iso_dates() {
        let date = Utc.with_ymd_and_hms(2025, 7, 2, 9, 30, 0).unwrap();
        let records = vec![Observation::new(27.4, 24.8, 34, 17, date).with_note("Sunny, vents open")];

        let csv_data = render_csv(&records).unwrap();
        let mut lines = csv_data.lines();
        assert_eq!(lines.next(), Some("Date,Greenhouse,Garden,Min,Max,Note"));
        assert_eq!(lines.next(), Some("2025-07-02T09:30:00Z,27.4,24.8,17,34,\"Sunny, vents open\""));
        assert_eq!(lines.next(), None);
    }
}
