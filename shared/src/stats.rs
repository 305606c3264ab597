//! Rolling-window statistics over a newest-first list of readings
//!
//! Every function takes the reference instant explicitly so callers can pin
//! the clock; the weather log passes `Utc::now()`.

use chrono::{DateTime, Duration, Utc};

use crate::models::WeatherData;
use crate::types::SECONDS_PER_DAY;

/// Length of a trailing window of `days` days
pub fn window_length(days: u32) -> Duration {
    Duration::seconds(i64::from(days) * SECONDS_PER_DAY)
}

/// True when the reading is strictly younger than the window.
///
/// Readings dated after `now` have a negative age and always qualify.
pub fn is_within<T: WeatherData>(record: &T, days: u32, now: DateTime<Utc>) -> bool {
    now.signed_duration_since(record.date_observed()) < window_length(days)
}

/// Readings inside the trailing window, in their original order
pub fn observations_within<T: WeatherData>(
    records: &[T],
    days: u32,
    now: DateTime<Utc>,
) -> Vec<&T> {
    records
        .iter()
        .filter(|record| is_within(*record, days, now))
        .collect()
}

/// Mean greenhouse temperature over the trailing window.
///
/// `None` only when `records` is empty. A non-empty list with nothing inside
/// the window yields `Some(0.0)`.
pub fn mean_greenhouse_temp<T: WeatherData>(
    records: &[T],
    days: u32,
    now: DateTime<Utc>,
) -> Option<f64> {
    if records.is_empty() {
        return None;
    }
    let windowed = observations_within(records, days, now);
    if windowed.is_empty() {
        return Some(0.0);
    }
    let total: f64 = windowed.iter().map(|record| record.greenhouse_temp()).sum();
    Some(total / windowed.len() as f64)
}

/// Latest greenhouse reading minus the windowed mean
pub fn greenhouse_variation<T: WeatherData>(
    records: &[T],
    days: u32,
    now: DateTime<Utc>,
) -> Option<f64> {
    let latest = records.first()?;
    let mean = mean_greenhouse_temp(records, days, now)?;
    Some(latest.greenhouse_temp() - mean)
}
