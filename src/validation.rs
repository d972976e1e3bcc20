//! Input checks for the presentation layer
//!
//! The stores accept whatever they are given. Forms run these checks before
//! calling into the stores, and show the error message as-is.

use chrono::{DateTime, Local, NaiveDate, Utc};

use crate::models::NewWorkout;

pub const MAX_WEIGHT_LBS: f64 = 500.0;
pub const INTENSITY_RANGE: (u8, u8) = (1, 10);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
  #[error("Please enter a valid weight")]
  InvalidWeight,

  #[error("Please enter a realistic weight between 1-500 lbs")]
  WeightOutOfRange,

  #[error("Please enter a valid number of days")]
  InvalidDays,

  #[error("Please enter a valid date in MM/DD/YYYY format")]
  InvalidDate,

  #[error("Fight date must be in the future")]
  DateNotInFuture,

  #[error("Please enter a valid name")]
  InvalidName,

  #[error("Please enter rounds and duration")]
  MissingRounds,

  #[error("Intensity must be between 1 and 10")]
  IntensityOutOfRange,
}

pub fn parse_weight(input: &str) -> Result<f64, ValidationError> {
  let weight: f64 = input
    .trim()
    .parse()
    .map_err(|_| ValidationError::InvalidWeight)?;
  if !weight.is_finite() {
    return Err(ValidationError::InvalidWeight);
  }
  if weight <= 0.0 || weight > MAX_WEIGHT_LBS {
    return Err(ValidationError::WeightOutOfRange);
  }
  Ok(weight)
}

pub fn parse_days(input: &str) -> Result<i64, ValidationError> {
  match input.trim().parse::<i64>() {
    Ok(days) if days > 0 => Ok(days),
    _ => Err(ValidationError::InvalidDays),
  }
}

/// `MM/DD/YYYY` as local midnight, which must be after `now`
pub fn parse_fight_date(input: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, ValidationError> {
  let date = NaiveDate::parse_from_str(input.trim(), "%m/%d/%Y")
    .map_err(|_| ValidationError::InvalidDate)?;
  let midnight = date
    .and_hms_opt(0, 0, 0)
    .and_then(|dt| dt.and_local_timezone(Local).earliest())
    .ok_or(ValidationError::InvalidDate)?
    .with_timezone(&Utc);

  if midnight <= now {
    return Err(ValidationError::DateNotInFuture);
  }
  Ok(midnight)
}

pub fn validate_profile_name(input: &str) -> Result<String, ValidationError> {
  let name = input.trim();
  if name.is_empty() {
    return Err(ValidationError::InvalidName);
  }
  Ok(name.to_string())
}

pub fn validate_workout(workout: &NewWorkout) -> Result<(), ValidationError> {
  if let Some((rounds, duration)) = workout.session.rounds() {
    let has_duration = duration.map(|d| !d.trim().is_empty()).unwrap_or(false);
    if rounds.unwrap_or(0) == 0 || !has_duration {
      return Err(ValidationError::MissingRounds);
    }
  }

  if let Some(intensity) = workout.intensity {
    let (min, max) = INTENSITY_RANGE;
    if !(min..=max).contains(&intensity) {
      return Err(ValidationError::IntensityOutOfRange);
    }
  }

  Ok(())
}
