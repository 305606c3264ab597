//! Validation utilities for thermometer readings
//!
//! The weather log trusts every observation it is given, so readings are
//! checked here before an `Observation` is ever constructed.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::Observation;

/// Exclusive lower bound for any temperature, in °C
pub const LOWER_TEMP_LIMIT: f64 = -20.0;

/// Exclusive upper bound for any temperature, in °C
pub const UPPER_TEMP_LIMIT: f64 = 80.0;

/// Longest note accepted, in characters
pub const MAX_NOTE_LENGTH: usize = 80;

// ============================================================================
// Reading Validations
// ============================================================================

/// Validate a greenhouse or garden temperature lies strictly within (-20, 80)
pub fn validate_temperature(temp: f64) -> Result<(), &'static str> {
    if temp > LOWER_TEMP_LIMIT && temp < UPPER_TEMP_LIMIT {
        Ok(())
    } else {
        Err("Temperature must be above -20 and below 80 ℃")
    }
}

/// Validate a whole-degree min or max reading lies strictly within (-20, 80)
pub fn validate_extreme_temperature(temp: i32) -> Result<(), &'static str> {
    if temp > LOWER_TEMP_LIMIT as i32 && temp < UPPER_TEMP_LIMIT as i32 {
        Ok(())
    } else {
        Err("Min and max temperatures must be above -20 and below 80 ℃")
    }
}

/// Validate the minimum does not exceed the maximum
pub fn validate_min_max(min_temp: i32, max_temp: i32) -> Result<(), &'static str> {
    if min_temp > max_temp {
        return Err("Minimum temperature cannot be above the maximum");
    }
    Ok(())
}

/// Validate note length, counted in characters rather than bytes
pub fn validate_note(note: &str) -> Result<(), &'static str> {
    if note.chars().count() > MAX_NOTE_LENGTH {
        return Err("Note must be at most 80 characters");
    }
    Ok(())
}

// ============================================================================
// Form Input
// ============================================================================

/// A reading as typed into the entry form; numbers stay optional until submitted
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_reading_ranges", skip_on_field_errors = false))]
pub struct ObservationInput {
    #[validate(required)]
    pub greenhouse_temp: Option<f64>,
    #[validate(required)]
    pub garden_temp: Option<f64>,
    #[validate(required)]
    pub max_temp: Option<i32>,
    #[validate(required)]
    pub min_temp: Option<i32>,
    #[serde(default)]
    pub note: String,
}

fn reading_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

fn validate_reading_ranges(input: &ObservationInput) -> Result<(), ValidationError> {
    if let Some(temp) = input.greenhouse_temp {
        validate_temperature(temp).map_err(|msg| reading_error("greenhouse_temp_range", msg))?;
    }
    if let Some(temp) = input.garden_temp {
        validate_temperature(temp).map_err(|msg| reading_error("garden_temp_range", msg))?;
    }
    if let Some(temp) = input.max_temp {
        validate_extreme_temperature(temp).map_err(|msg| reading_error("max_temp_range", msg))?;
    }
    if let Some(temp) = input.min_temp {
        validate_extreme_temperature(temp).map_err(|msg| reading_error("min_temp_range", msg))?;
    }
    if let (Some(min), Some(max)) = (input.min_temp, input.max_temp) {
        validate_min_max(min, max).map_err(|msg| reading_error("min_above_max", msg))?;
    }
    validate_note(&input.note).map_err(|msg| reading_error("note_length", msg))?;
    Ok(())
}

impl ObservationInput {
    /// Whether the form may be submitted
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Validate and build the observation, stamped with `date_observed`
    pub fn into_observation(self, date_observed: DateTime<Utc>) -> Result<Observation, ValidationErrors> {
        self.validate()?;
        match (self.greenhouse_temp, self.garden_temp, self.max_temp, self.min_temp) {
            (Some(greenhouse), Some(garden), Some(max), Some(min)) => {
                Ok(Observation::new(greenhouse, garden, max, min, date_observed).with_note(self.note))
            }
            _ => {
                let mut errors = ValidationErrors::new();
                errors.add("observation", reading_error("required", "All readings are required"));
                Err(errors)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_input() -> ObservationInput {
        ObservationInput {
            greenhouse_temp: Some(27.4),
            garden_temp: Some(24.8),
            max_temp: Some(34),
            min_temp: Some(17),
            note: "Sunny".to_string(),
        }
    }

    // ========================================================================
    // Reading Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_temperature_open_interval() {
        assert!(validate_temperature(0.0).is_ok());
        assert!(validate_temperature(-19.9).is_ok());
        assert!(validate_temperature(79.9).is_ok());
        assert!(validate_temperature(-20.0).is_err());
        assert!(validate_temperature(80.0).is_err());
        assert!(validate_temperature(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_extreme_temperature() {
        assert!(validate_extreme_temperature(-19).is_ok());
        assert!(validate_extreme_temperature(79).is_ok());
        assert!(validate_extreme_temperature(-20).is_err());
        assert!(validate_extreme_temperature(80).is_err());
    }

    #[test]
    fn test_validate_min_max() {
        assert!(validate_min_max(10, 10).is_ok());
        assert!(validate_min_max(5, 30).is_ok());
        assert!(validate_min_max(31, 30).is_err());
    }

    #[test]
    fn test_validate_note_counts_characters() {
        assert!(validate_note("").is_ok());
        assert!(validate_note(&"a".repeat(80)).is_ok());
        assert!(validate_note(&"a".repeat(81)).is_err());
        // multi-byte characters count once each
        assert!(validate_note(&"℃".repeat(80)).is_ok());
    }

    // ========================================================================
    // Form Input Tests
    // ========================================================================

    #[test]
    fn test_complete_input_is_valid() {
        assert!(complete_input().is_valid());
    }

    #[test]
    fn test_missing_reading_is_invalid() {
        let input = ObservationInput {
            garden_temp: None,
            ..complete_input()
        };
        assert!(!input.is_valid());
        assert!(ObservationInput::default().into_observation(Utc::now()).is_err());
    }

    #[test]
    fn test_out_of_range_input_is_invalid() {
        let hot = ObservationInput {
            greenhouse_temp: Some(80.0),
            ..complete_input()
        };
        assert!(!hot.is_valid());

        let inverted = ObservationInput {
            min_temp: Some(35),
            max_temp: Some(20),
            ..complete_input()
        };
        assert!(!inverted.is_valid());
    }

    #[test]
    fn test_long_note_is_invalid() {
        let input = ObservationInput {
            note: "x".repeat(81),
            ..complete_input()
        };
        assert!(!input.is_valid());

        let errors = input.validate().unwrap_err();
        assert_eq!(errors.field_errors()["__all__"][0].code, "note_length");

        // Eighty multi-byte characters are still within the limit
        let symbols = ObservationInput {
            note: "℃".repeat(80),
            ..complete_input()
        };
        assert!(symbols.is_valid());
    }

    #[test]
    fn test_into_observation_copies_readings() {
        let now = Utc::now();
        let ob = complete_input().into_observation(now).unwrap();
        assert_eq!(ob.greenhouse_temp(), 27.4);
        assert_eq!(ob.garden_temp(), 24.8);
        assert_eq!(ob.max_temp(), 34);
        assert_eq!(ob.min_temp(), 17);
        assert_eq!(ob.date_observed(), now);
        assert_eq!(ob.note(), "Sunny");
    }
}
