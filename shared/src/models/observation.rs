//! Min-max thermometer observation models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::distant_past;

/// A single set of temperature readings taken at one time.
///
/// Values are fixed at construction; the record is never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    id: String,
    greenhouse_temp: f64,
    garden_temp: f64,
    max_temp: i32,
    min_temp: i32,
    date_observed: DateTime<Utc>,
    #[serde(default)]
    note: String,
}

impl Observation {
    /// Create a new observation with a freshly generated id and an empty note
    pub fn new(
        greenhouse_temp: f64,
        garden_temp: f64,
        max_temp: i32,
        min_temp: i32,
        date_observed: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            greenhouse_temp,
            garden_temp,
            max_temp,
            min_temp,
            date_observed,
            note: String::new(),
        }
    }

    /// Attach a free-text note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// The "no previous observation" record: zero readings at the distant past
    pub fn sentinel() -> Self {
        Self::new(0.0, 0.0, 0, 0, distant_past())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn greenhouse_temp(&self) -> f64 {
        self.greenhouse_temp
    }

    pub fn garden_temp(&self) -> f64 {
        self.garden_temp
    }

    pub fn max_temp(&self) -> i32 {
        self.max_temp
    }

    pub fn min_temp(&self) -> i32 {
        self.min_temp
    }

    pub fn date_observed(&self) -> DateTime<Utc> {
        self.date_observed
    }

    pub fn note(&self) -> &str {
        &self.note
    }
}

impl PartialEq for Observation {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Observation {}

/// Demo/test-shaped reading that shares the persisted log with real ones
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockObservation {
    pub id: String,
    pub greenhouse_temp: f64,
    pub garden_temp: f64,
    pub max_temp: i32,
    pub min_temp: i32,
    pub date_observed: DateTime<Utc>,
    pub note: String,
}

impl Default for MockObservation {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            greenhouse_temp: 20.0,
            garden_temp: 17.3,
            max_temp: 30,
            min_temp: 21,
            date_observed: distant_past(),
            note: "An example note".to_string(),
        }
    }
}

impl PartialEq for MockObservation {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for MockObservation {}
