//! WebAssembly module for the greenhouse temperature log
//!
//! Provides client-side computation for:
//! - Entry form validation
//! - Display formatting of readings and rolling figures
//! - Rolling statistics over a saved log

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

const NO_PREVIOUS_OBSERVATION: &str = "No previous observation";
const NO_OBSERVATIONS: &str = "No observations";

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Round to one decimal place, dropping a trailing ".0"
fn format_tenths(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    let text = format!("{:.1}", rounded);
    match text.strip_suffix(".0") {
        Some(whole) if whole == "-0" => "0".to_string(),
        Some(whole) => whole.to_string(),
        None => text,
    }
}

/// Whether the entry form may be submitted
#[wasm_bindgen]
pub fn is_observation_input_valid(
    greenhouse_temp: Option<f64>,
    garden_temp: Option<f64>,
    max_temp: Option<i32>,
    min_temp: Option<i32>,
    note: &str,
) -> bool {
    ObservationInput {
        greenhouse_temp,
        garden_temp,
        max_temp,
        min_temp,
        note: note.to_string(),
    }
    .is_valid()
}

/// Format a greenhouse or garden temperature, e.g. "27.4 ℃"
#[wasm_bindgen]
pub fn format_temperature(temp: f64) -> String {
    format!("{} ℃", format_tenths(temp))
}

/// Format the min-max range, e.g. "Range: 17  to  34  ℃"
#[wasm_bindgen]
pub fn format_temp_range(min_temp: i32, max_temp: i32) -> String {
    format!("Range: {}  to  {}  ℃", min_temp, max_temp)
}

/// Format the rolling mean, or the "no data" placeholder
#[wasm_bindgen]
pub fn format_mean(mean: Option<f64>) -> String {
    match mean {
        Some(mean) => format_temperature(mean),
        None => NO_OBSERVATIONS.to_string(),
    }
}

/// Format a variation with its sign always shown, e.g. "+1.2 ℃"
#[wasm_bindgen]
pub fn format_variation(variation: Option<f64>) -> String {
    match variation {
        Some(variation) => {
            let text = format_tenths(variation);
            if text.starts_with('-') {
                format!("{} ℃", text)
            } else {
                format!("+{} ℃", text)
            }
        }
        None => NO_OBSERVATIONS.to_string(),
    }
}

/// Format an observation date in the viewer's offset, e.g. "2 Jul 2025 at 09:30"
pub fn format_observation_date(date: DateTime<Utc>, utc_offset_minutes: i32) -> String {
    if date == distant_past() {
        return NO_PREVIOUS_OBSERVATION.to_string();
    }
    let offset = FixedOffset::east_opt(utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix());
    date.with_timezone(&offset)
        .format("%-d %b %Y at %H:%M")
        .to_string()
}

/// Display strings for the latest reading
#[derive(Debug, Serialize, PartialEq)]
pub struct LastObservationView {
    pub date: String,
    pub greenhouse: String,
    pub garden: String,
    pub range: String,
    pub note: String,
}

impl LastObservationView {
    pub fn from_record<T: WeatherData>(record: &T, utc_offset_minutes: i32) -> Self {
        if record.is_sentinel() {
            return Self {
                date: NO_PREVIOUS_OBSERVATION.to_string(),
                greenhouse: String::new(),
                garden: String::new(),
                range: String::new(),
                note: record.note().to_string(),
            };
        }
        Self {
            date: format_observation_date(record.date_observed(), utc_offset_minutes),
            greenhouse: format_temperature(record.greenhouse_temp()),
            garden: format_temperature(record.garden_temp()),
            range: format_temp_range(record.min_temp(), record.max_temp()),
            note: record.note().to_string(),
        }
    }
}

/// One line of the history list: date and greenhouse temperature
#[derive(Debug, Serialize, PartialEq)]
pub struct HistoryRow {
    pub id: String,
    pub date: String,
    pub greenhouse: String,
}

impl HistoryRow {
    pub fn from_record<T: WeatherData>(record: &T, utc_offset_minutes: i32) -> Self {
        Self {
            id: record.id().to_string(),
            date: format_observation_date(record.date_observed(), utc_offset_minutes),
            greenhouse: format_temperature(record.greenhouse_temp()),
        }
    }
}

/// Rolling figures and history for a saved log
#[derive(Debug, Serialize, PartialEq)]
pub struct RollingSummary {
    pub rolling_days: u32,
    /// e.g. "7 day rolling mean"
    pub rolling_label: String,
    /// Text for the button that switches period
    pub toggle_command: String,
    pub total_observations: usize,
    pub mean: Option<f64>,
    pub variation: Option<f64>,
    pub mean_text: String,
    pub variation_text: String,
    pub last_observation: LastObservationView,
    pub history_title: String,
    pub recent_observations: Vec<HistoryRow>,
}

/// Decode a saved log, treating anything unreadable as an empty log
fn decode_or_empty(log_json: &str) -> WeatherLog {
    match decode_log(log_json.as_bytes()) {
        Ok(log) => log,
        Err(err) => {
            #[cfg(target_arch = "wasm32")]
            web_sys::console::warn_1(&JsValue::from_str(&format!(
                "Falling back to an empty log: {}",
                err
            )));
            #[cfg(not(target_arch = "wasm32"))]
            let _ = err;
            WeatherLog::new()
        }
    }
}

/// Summarize a saved log as of `now`
pub fn rolling_summary_at(log_json: &str, now: DateTime<Utc>, utc_offset_minutes: i32) -> RollingSummary {
    let log = decode_or_empty(log_json);
    let mean = log.mean_greenhouse_temp_over_rolling_period_at(now);
    let variation = log.variation_in_greenhouse_temp_in_rolling_period_at(now);

    let period = log.rolling_period();

    RollingSummary {
        rolling_days: period.days(),
        rolling_label: format!("{} rolling mean", period.label()),
        toggle_command: period.toggle_command(),
        total_observations: log.total_observation_number(),
        mean,
        variation,
        mean_text: format_mean(mean),
        variation_text: format_variation(variation),
        last_observation: LastObservationView::from_record(
            &log.last_observation_or_sentinel(),
            utc_offset_minutes,
        ),
        history_title: format!("Observations in the last {} days", HISTORY_WINDOW_DAYS),
        recent_observations: log
            .observations_in_last_at(HISTORY_WINDOW_DAYS, now)
            .into_iter()
            .map(|record| HistoryRow::from_record(record, utc_offset_minutes))
            .collect(),
    }
}

/// Summarize a saved log as of the browser's current time, returned as JSON
#[wasm_bindgen]
pub fn rolling_summary(log_json: &str, utc_offset_minutes: i32) -> Result<String, JsValue> {
    let now = DateTime::from_timestamp_millis(js_sys::Date::now() as i64)
        .ok_or_else(|| JsValue::from_str("Browser clock out of range"))?;
    let summary = rolling_summary_at(log_json, now, utc_offset_minutes);
    serde_json::to_string(&summary)
        .map_err(|e| JsValue::from_str(&format!("Unable to encode summary: {}", e)))
}
