//! The weather log: time-ordered observations plus rolling-window settings

use chrono::{DateTime, Utc};

use super::{Observation, ObservationRecord};
use crate::stats;
use crate::types::RollingPeriod;

/// A collection of time-stamped min-max thermometer observations.
///
/// Observations are kept newest first: `add` always inserts at the front.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherLog {
    observations: Vec<ObservationRecord>,
    rolling_period: RollingPeriod,
}

impl WeatherLog {
    /// An empty log using the seven day rolling period
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a log from a caller-supplied list, already ordered newest first
    pub fn from_observations<I, R>(observations: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<ObservationRecord>,
    {
        Self {
            observations: observations.into_iter().map(Into::into).collect(),
            rolling_period: RollingPeriod::default(),
        }
    }

    /// Rebuild a log from previously persisted parts
    pub fn from_parts(observations: Vec<ObservationRecord>, rolling_period: RollingPeriod) -> Self {
        Self {
            observations,
            rolling_period,
        }
    }

    /// Prepend a new observation. No validation happens here.
    pub fn add(&mut self, observation: impl Into<ObservationRecord>) {
        self.observations.insert(0, observation.into());
    }

    pub fn has_observations(&self) -> bool {
        !self.observations.is_empty()
    }

    pub fn total_observation_number(&self) -> usize {
        self.observations.len()
    }

    pub fn clear_observations(&mut self) {
        self.observations.clear();
    }

    /// All observations, newest first
    pub fn observations(&self) -> &[ObservationRecord] {
        &self.observations
    }

    /// The most recently added observation, if any
    pub fn last_observation(&self) -> Option<&ObservationRecord> {
        self.observations.first()
    }

    /// The most recent observation, or the zeroed distant-past sentinel
    pub fn last_observation_or_sentinel(&self) -> ObservationRecord {
        self.last_observation()
            .cloned()
            .unwrap_or_else(|| Observation::sentinel().into())
    }

    pub fn rolling_period(&self) -> RollingPeriod {
        self.rolling_period
    }

    /// Switch between the seven and twenty-eight day periods
    pub fn toggle_rolling_period(&mut self) {
        self.rolling_period = self.rolling_period.toggled();
    }

    /// Observations taken less than `days` days ago, newest first
    pub fn observations_in_last(&self, days: u32) -> Vec<&ObservationRecord> {
        self.observations_in_last_at(days, Utc::now())
    }

    pub fn observations_in_last_at(&self, days: u32, now: DateTime<Utc>) -> Vec<&ObservationRecord> {
        stats::observations_within(&self.observations, days, now)
    }

    /// Mean greenhouse temperature over the last `days` days.
    ///
    /// `None` when the log is empty; `Some(0.0)` when the log has readings
    /// but none fall inside the window.
    pub fn mean_greenhouse_temp_over_last(&self, days: u32) -> Option<f64> {
        self.mean_greenhouse_temp_over_last_at(days, Utc::now())
    }

    pub fn mean_greenhouse_temp_over_last_at(&self, days: u32, now: DateTime<Utc>) -> Option<f64> {
        stats::mean_greenhouse_temp(&self.observations, days, now)
    }

    pub fn mean_greenhouse_temp_over_rolling_period(&self) -> Option<f64> {
        self.mean_greenhouse_temp_over_rolling_period_at(Utc::now())
    }

    pub fn mean_greenhouse_temp_over_rolling_period_at(&self, now: DateTime<Utc>) -> Option<f64> {
        self.mean_greenhouse_temp_over_last_at(self.rolling_period.days(), now)
    }

    /// Latest greenhouse reading minus the mean over the last `days` days
    pub fn variation_in_greenhouse_temp_over_last(&self, days: u32) -> Option<f64> {
        self.variation_in_greenhouse_temp_over_last_at(days, Utc::now())
    }

    pub fn variation_in_greenhouse_temp_over_last_at(
        &self,
        days: u32,
        now: DateTime<Utc>,
    ) -> Option<f64> {
        stats::greenhouse_variation(&self.observations, days, now)
    }

    pub fn variation_in_greenhouse_temp_in_rolling_period(&self) -> Option<f64> {
        self.variation_in_greenhouse_temp_in_rolling_period_at(Utc::now())
    }

    pub fn variation_in_greenhouse_temp_in_rolling_period_at(
        &self,
        now: DateTime<Utc>,
    ) -> Option<f64> {
        self.variation_in_greenhouse_temp_over_last_at(self.rolling_period.days(), now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MockObservation, WeatherData};
    use crate::types::distant_past;
    use chrono::Duration;

    /// Readings spaced a little over a day apart, newest first
    fn spaced_readings(temps: &[f64], now: DateTime<Utc>) -> Vec<MockObservation> {
        temps
            .iter()
            .enumerate()
            .map(|(index, temp)| MockObservation {
                greenhouse_temp: *temp,
                date_observed: now - Duration::seconds((86_400 + 10) * index as i64),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_created_without_any_weather_data() {
        let log = WeatherLog::new();
        assert!(!log.has_observations());
        assert_eq!(log.total_observation_number(), 0);
        assert_eq!(log.rolling_period(), RollingPeriod::SevenDays);
    }

    #[test]
    fn test_created_with_data_has_correct_count() {
        let now = Utc::now();
        let log = WeatherLog::from_observations(spaced_readings(&[1.0; 12], now));
        assert!(log.has_observations());
        assert_eq!(log.total_observation_number(), 12);
    }

    #[test]
    fn test_add_prepends() {
        let now = Utc::now();
        let mut log = WeatherLog::from_observations(spaced_readings(&[1.0, 2.0], now));
        let newest = Observation::new(30.0, 25.0, 33, 18, now).with_note("door left open");
        log.add(newest.clone());

        assert_eq!(log.total_observation_number(), 3);
        assert_eq!(log.observations()[0].id(), newest.id());
        assert_eq!(log.last_observation().map(|ob| ob.note()), Some("door left open"));
    }

    #[test]
    fn test_clear_observations() {
        let mut log = WeatherLog::from_observations(spaced_readings(&[1.0; 5], Utc::now()));
        log.clear_observations();
        assert!(!log.has_observations());
        assert_eq!(log.total_observation_number(), 0);
    }

    #[test]
    fn test_empty_log_returns_sentinel() {
        let log = WeatherLog::new();
        assert!(log.last_observation().is_none());

        let sentinel = log.last_observation_or_sentinel();
        assert!(sentinel.is_sentinel());
        assert_eq!(sentinel.date_observed(), distant_past());
        assert_eq!(sentinel.greenhouse_temp(), 0.0);
    }

    #[test]
    fn test_toggle_rolling_period() {
        let mut log = WeatherLog::new();
        log.toggle_rolling_period();
        assert_eq!(log.rolling_period(), RollingPeriod::TwentyEightDays);
        log.toggle_rolling_period();
        assert_eq!(log.rolling_period(), RollingPeriod::SevenDays);
    }

    #[test]
    fn test_observations_in_last_seven_days() {
        let now = Utc::now();
        let readings = spaced_readings(&[1.0; 12], now);
        let log = WeatherLog::from_observations(readings.clone());

        let recent = log.observations_in_last_at(7, now);
        let ids: Vec<&str> = recent.iter().map(|ob| ob.id()).collect();
        let expected: Vec<&str> = readings[..7].iter().map(|ob| ob.id.as_str()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_mean_over_rolling_periods() {
        let now = Utc::now();
        let temps: Vec<f64> = (0..40).map(|i| i as f64).collect();
        let mut log = WeatherLog::from_observations(spaced_readings(&temps, now));

        // 0..=6
        assert_eq!(log.mean_greenhouse_temp_over_rolling_period_at(now), Some(3.0));
        log.toggle_rolling_period();
        // 0..=27
        assert_eq!(log.mean_greenhouse_temp_over_rolling_period_at(now), Some(13.5));
    }

    #[test]
    fn test_variation_with_fewer_readings_than_days() {
        let now = Utc::now();
        let log = WeatherLog::from_observations(spaced_readings(&[10.0, 20.0, 30.0, 40.0, 50.0], now));
        assert_eq!(log.variation_in_greenhouse_temp_over_last_at(7, now), Some(-20.0));
    }

    #[test]
    fn test_variation_uses_rolling_period() {
        let now = Utc::now();
        let temps: Vec<f64> = (0..35).map(|i| i as f64).collect();
        let mut log = WeatherLog::from_observations(spaced_readings(&temps, now));
        log.toggle_rolling_period();
        assert_eq!(log.variation_in_greenhouse_temp_in_rolling_period_at(now), Some(-13.5));
    }

    #[test]
    fn test_statistics_absent_on_empty_log() {
        let log = WeatherLog::new();
        assert_eq!(log.mean_greenhouse_temp_over_last(7), None);
        assert_eq!(log.variation_in_greenhouse_temp_over_last(7), None);
        assert_eq!(log.mean_greenhouse_temp_over_rolling_period(), None);
        assert_eq!(log.variation_in_greenhouse_temp_in_rolling_period(), None);
    }

    #[test]
    fn test_mean_is_zero_when_window_is_empty() {
        let log = WeatherLog::from_observations(vec![MockObservation::default()]);
        assert_eq!(log.mean_greenhouse_temp_over_last(7), Some(0.0));
        assert_eq!(log.variation_in_greenhouse_temp_over_last(7), Some(20.0));
    }
}
