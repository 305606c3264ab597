//! Common types used across the platform

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Seconds in one day, used to turn a day count into a window length
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Trailing days listed in the observation history, whatever the rolling period
pub const HISTORY_WINDOW_DAYS: u32 = 7;

/// Seconds from the Unix epoch back to 0001-01-01T00:00:00Z
const DISTANT_PAST_SECONDS: i64 = -62_135_596_800;

/// Marker timestamp that no real reading can carry.
///
/// Used by the sentinel observation so display code can detect
/// "no previous observation" without a nullable value.
pub fn distant_past() -> DateTime<Utc> {
    DateTime::from_timestamp(DISTANT_PAST_SECONDS, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Number of trailing days used for rolling statistics
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(try_from = "u32", into = "u32")]
pub enum RollingPeriod {
    #[default]
    SevenDays,
    TwentyEightDays,
}

impl RollingPeriod {
    pub fn days(&self) -> u32 {
        match self {
            RollingPeriod::SevenDays => 7,
            RollingPeriod::TwentyEightDays => 28,
        }
    }

    /// The other allowed period
    pub fn toggled(&self) -> Self {
        match self {
            RollingPeriod::SevenDays => RollingPeriod::TwentyEightDays,
            RollingPeriod::TwentyEightDays => RollingPeriod::SevenDays,
        }
    }

    /// Adjective form for headings, e.g. "7 day rolling mean"
    pub fn label(&self) -> &'static str {
        match self {
            RollingPeriod::SevenDays => "7 day",
            RollingPeriod::TwentyEightDays => "28 day",
        }
    }

    /// Label of the toggle that switches to the other period
    pub fn toggle_command(&self) -> String {
        format!("Select {} rolling mean", self.toggled().label())
    }
}

impl std::fmt::Display for RollingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} days", self.days())
    }
}

/// Rejected rolling period length
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("rolling period must be 7 or 28 days, got {0}")]
pub struct InvalidRollingPeriod(pub u32);

impl TryFrom<u32> for RollingPeriod {
    type Error = InvalidRollingPeriod;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        match days {
            7 => Ok(RollingPeriod::SevenDays),
            28 => Ok(RollingPeriod::TwentyEightDays),
            other => Err(InvalidRollingPeriod(other)),
        }
    }
}

impl From<RollingPeriod> for u32 {
    fn from(period: RollingPeriod) -> Self {
        period.days()
    }
}
