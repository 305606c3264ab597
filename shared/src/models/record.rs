//! Tagged record wrapper for the persisted observation list

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MockObservation, Observation};
use crate::types::distant_past;

/// Read-only view shared by every kind of stored reading
pub trait WeatherData {
    fn id(&self) -> &str;
    fn greenhouse_temp(&self) -> f64;
    fn garden_temp(&self) -> f64;
    fn max_temp(&self) -> i32;
    fn min_temp(&self) -> i32;
    fn date_observed(&self) -> DateTime<Utc>;
    fn note(&self) -> &str;

    /// True for the synthetic "no data" record
    fn is_sentinel(&self) -> bool {
        self.date_observed() == distant_past()
    }
}

impl WeatherData for Observation {
    fn id(&self) -> &str {
        Observation::id(self)
    }

    fn greenhouse_temp(&self) -> f64 {
        Observation::greenhouse_temp(self)
    }

    fn garden_temp(&self) -> f64 {
        Observation::garden_temp(self)
    }

    fn max_temp(&self) -> i32 {
        Observation::max_temp(self)
    }

    fn min_temp(&self) -> i32 {
        Observation::min_temp(self)
    }

    fn date_observed(&self) -> DateTime<Utc> {
        Observation::date_observed(self)
    }

    fn note(&self) -> &str {
        Observation::note(self)
    }
}

impl WeatherData for MockObservation {
    fn id(&self) -> &str {
        &self.id
    }

    fn greenhouse_temp(&self) -> f64 {
        self.greenhouse_temp
    }

    fn garden_temp(&self) -> f64 {
        self.garden_temp
    }

    fn max_temp(&self) -> i32 {
        self.max_temp
    }

    fn min_temp(&self) -> i32 {
        self.min_temp
    }

    fn date_observed(&self) -> DateTime<Utc> {
        self.date_observed
    }

    fn note(&self) -> &str {
        &self.note
    }
}

/// One entry of the weather log, tagged with its record shape
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "contents", rename_all = "snake_case")]
pub enum ObservationRecord {
    Observation(Observation),
    Mock(MockObservation),
}

impl ObservationRecord {
    pub fn is_mock(&self) -> bool {
        matches!(self, ObservationRecord::Mock(_))
    }
}

macro_rules! delegate {
    ($record:expr, $method:ident) => {
        match $record {
            ObservationRecord::Observation(ob) => WeatherData::$method(ob),
            ObservationRecord::Mock(mock) => WeatherData::$method(mock),
        }
    };
}

impl WeatherData for ObservationRecord {
    fn id(&self) -> &str {
        delegate!(self, id)
    }

    fn greenhouse_temp(&self) -> f64 {
        delegate!(self, greenhouse_temp)
    }

    fn garden_temp(&self) -> f64 {
        delegate!(self, garden_temp)
    }

    fn max_temp(&self) -> i32 {
        delegate!(self, max_temp)
    }

    fn min_temp(&self) -> i32 {
        delegate!(self, min_temp)
    }

    fn date_observed(&self) -> DateTime<Utc> {
        delegate!(self, date_observed)
    }

    fn note(&self) -> &str {
        delegate!(self, note)
    }
}

impl From<Observation> for ObservationRecord {
    fn from(ob: Observation) -> Self {
        ObservationRecord::Observation(ob)
    }
}

impl From<MockObservation> for ObservationRecord {
    fn from(mock: MockObservation) -> Self {
        ObservationRecord::Mock(mock)
    }
}
