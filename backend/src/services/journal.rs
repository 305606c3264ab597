//! Weather journal: the log, its store, and save-after-mutation

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use shared::{
    ObservationInput, ObservationRecord, RollingPeriod, WeatherData, WeatherLog, HISTORY_WINDOW_DAYS,
};

use super::export;
use crate::error::AppResult;
use crate::storage::{load_with_outcome, LoadOutcome, ObservationStore};

/// Result of persisting after a change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// The in-memory log is still authoritative; the next change retries
    Failed,
}

/// Figures shown on the main and history screens
#[derive(Debug, Clone)]
pub struct LogSummary {
    pub total_observations: usize,
    pub last_observation: Option<ObservationRecord>,
    pub rolling_period: RollingPeriod,
    pub rolling_mean: Option<f64>,
    pub rolling_variation: Option<f64>,
    /// Readings from the last `HISTORY_WINDOW_DAYS` days, newest first
    pub recent_observations: Vec<ObservationRecord>,
}

/// Owns the weather log for a session and persists it after every change.
///
/// Mutations take `&mut self`, so a change and the write that follows it
/// cannot interleave with another caller's.
#[derive(Debug)]
pub struct WeatherJournal<S: ObservationStore> {
    log: WeatherLog,
    store: S,
    csv_path: Option<PathBuf>,
    load_outcome: LoadOutcome,
}

impl<S: ObservationStore> WeatherJournal<S> {
    /// Load the stored log, starting empty if it cannot be read
    pub fn open(store: S) -> Self {
        let (log, load_outcome) = load_with_outcome(&store);
        Self {
            log,
            store,
            csv_path: None,
            load_outcome,
        }
    }

    /// Also re-write a CSV export at `path` on every save
    pub fn with_csv_export(mut self, path: impl Into<PathBuf>) -> Self {
        self.csv_path = Some(path.into());
        self
    }

    pub fn log(&self) -> &WeatherLog {
        &self.log
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn csv_path(&self) -> Option<&Path> {
        self.csv_path.as_deref()
    }

    /// How the log was obtained when the journal was opened
    pub fn load_outcome(&self) -> LoadOutcome {
        self.load_outcome
    }

    /// Add an already-validated observation and save
    pub fn record(&mut self, observation: impl Into<ObservationRecord>) -> SaveOutcome {
        let record = observation.into();
        tracing::info!(id = record.id(), greenhouse_temp = record.greenhouse_temp(), "Recording observation");
        self.log.add(record);
        self.save()
    }

    /// Validate form input, stamp it with the current time, record it
    pub fn submit(&mut self, input: ObservationInput) -> AppResult<SaveOutcome> {
        let observation = input.into_observation(Utc::now())?;
        Ok(self.record(observation))
    }

    /// Remove every observation and save
    pub fn clear(&mut self) -> SaveOutcome {
        tracing::info!(removed = self.log.total_observation_number(), "Clearing weather log");
        self.log.clear_observations();
        self.save()
    }

    /// Switch between the 7 and 28 day periods and save
    pub fn toggle_rolling_period(&mut self) -> SaveOutcome {
        self.log.toggle_rolling_period();
        tracing::debug!(rolling_period = %self.log.rolling_period(), "Rolling period changed");
        self.save()
    }

    /// Persist the log, then the CSV export when one is configured.
    ///
    /// Failures are logged and reported, never propagated; nothing in memory
    /// is touched.
    pub fn save(&self) -> SaveOutcome {
        let mut outcome = SaveOutcome::Saved;

        if let Err(err) = self.store.save(&self.log) {
            tracing::error!(code = err.code(), "Unable to write data: {}", err);
            outcome = SaveOutcome::Failed;
        }

        if let Err(err) = self.write_csv_export() {
            tracing::error!(code = err.code(), "Unable to write csv data: {}", err);
            outcome = SaveOutcome::Failed;
        }

        outcome
    }

    /// Write the CSV export if a path is configured
    pub fn write_csv_export(&self) -> AppResult<()> {
        match &self.csv_path {
            Some(path) => export::write_csv(path, self.log.observations()),
            None => Ok(()),
        }
    }

    /// Re-write the CSV export at start-up.
    ///
    /// Skipped while the log is only an in-memory fallback for unreadable
    /// stored data, so the last good export survives until a real change is
    /// saved. Returns whether the file was written.
    pub fn refresh_csv_export(&self) -> AppResult<bool> {
        if self.csv_path.is_none() {
            return Ok(false);
        }
        if self.load_outcome == LoadOutcome::Unreadable && !self.log.has_observations() {
            tracing::warn!("Stored log was unreadable, leaving the CSV export untouched");
            return Ok(false);
        }
        self.write_csv_export()?;
        Ok(true)
    }

    /// The CSV export as text
    pub fn render_csv(&self) -> AppResult<String> {
        export::render_csv(self.log.observations())
    }

    pub fn summary(&self) -> LogSummary {
        self.summary_at(Utc::now())
    }

    /// Summary with every windowed figure taken against the same instant
    pub fn summary_at(&self, now: DateTime<Utc>) -> LogSummary {
        LogSummary {
            total_observations: self.log.total_observation_number(),
            last_observation: self.log.last_observation().cloned(),
            rolling_period: self.log.rolling_period(),
            rolling_mean: self.log.mean_greenhouse_temp_over_rolling_period_at(now),
            rolling_variation: self.log.variation_in_greenhouse_temp_in_rolling_period_at(now),
            recent_observations: self
                .log
                .observations_in_last_at(HISTORY_WINDOW_DAYS, now)
                .into_iter()
                .cloned()
                .collect(),
        }
    }

    pub fn into_parts(self) -> (WeatherLog, S) {
        (self.log, self.store)
    }
}
