//! Fight date, target weight and fighter profile
//!
//! Each setting is an independent key with plain get/set semantics: getters
//! return `None` for never-set or unreadable values, setters overwrite.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::models::UserProfile;
use crate::store::{keys, read_json, read_raw, write_json, KeyValueStore, StorageError};

const MS_PER_DAY: i64 = 86_400_000;

/// Quick fight-date choices: (days from now, label)
pub const FIGHT_DATE_PRESETS: [(i64, &str); 4] = [
  (28, "4 weeks"),
  (42, "6 weeks"),
  (56, "8 weeks"),
  (84, "12 weeks"),
];

// ---------------------------------------------------------------------------
// Fight Date
// ---------------------------------------------------------------------------

pub async fn set_fight_date(store: &dyn KeyValueStore, date: DateTime<Utc>) -> Result<(), StorageError> {
  store.set(keys::FIGHT_DATE, &date.to_rfc3339()).await?;
  info!(fight_date = %date, "Fight date set");
  Ok(())
}

/// Set the fight `days` from now and return the stored date
pub async fn set_fight_date_in_days(
  store: &dyn KeyValueStore,
  days: i64,
) -> Result<DateTime<Utc>, StorageError> {
  let date = Utc::now() + Duration::days(days);
  set_fight_date(store, date).await?;
  Ok(date)
}

pub async fn get_fight_date(store: &dyn KeyValueStore) -> Option<DateTime<Utc>> {
  let raw = read_raw(store, keys::FIGHT_DATE).await?;
  let parsed = parse_fight_date(&raw);
  if parsed.is_none() {
    warn!(value = %raw, "Stored fight date is malformed");
  }
  parsed
}

/// RFC 3339 timestamp, or a bare `YYYY-MM-DD` read as UTC midnight
fn parse_fight_date(raw: &str) -> Option<DateTime<Utc>> {
  let raw = raw.trim();
  if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
    return Some(date.with_timezone(&Utc));
  }
  NaiveDate::parse_from_str(raw, "%Y-%m-%d")
    .ok()
    .and_then(|date| date.and_hms_opt(0, 0, 0))
    .map(|midnight| midnight.and_utc())
}

pub async fn get_days_until_fight(store: &dyn KeyValueStore) -> Option<i64> {
  let fight_date = get_fight_date(store).await?;
  Some(days_until(fight_date, Utc::now()))
}

/// Whole days until `fight_date`, rounded up. Negative once the date has passed.
pub fn days_until(fight_date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
  let ms = (fight_date - now).num_milliseconds();
  let days = ms / MS_PER_DAY;
  if ms % MS_PER_DAY > 0 {
    days + 1
  } else {
    days
  }
}

// ---------------------------------------------------------------------------
// Target Weight
// ---------------------------------------------------------------------------

pub async fn set_target_weight(store: &dyn KeyValueStore, weight: f64) -> Result<(), StorageError> {
  store.set(keys::TARGET_WEIGHT, &weight.to_string()).await?;
  info!(target_weight = weight, "Target weight set");
  Ok(())
}

pub async fn get_target_weight(store: &dyn KeyValueStore) -> Option<f64> {
  let raw = read_raw(store, keys::TARGET_WEIGHT).await?;
  match raw.trim().parse::<f64>() {
    Ok(weight) if weight.is_finite() => Some(weight),
    _ => {
      warn!(value = %raw, "Stored target weight is malformed");
      None
    }
  }
}

/// Stored target weight, persisting `default` first if none is stored
pub async fn target_weight_or_default(
  store: &dyn KeyValueStore,
  default: f64,
) -> Result<f64, StorageError> {
  match get_target_weight(store).await {
    Some(weight) => Ok(weight),
    None => {
      set_target_weight(store, default).await?;
      Ok(default)
    }
  }
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

pub async fn save_user_profile(
  store: &dyn KeyValueStore,
  profile: &UserProfile,
) -> Result<(), StorageError> {
  write_json(store, keys::USER_PROFILE, profile).await?;
  info!(name = %profile.name, "Profile saved");
  Ok(())
}

pub async fn get_user_profile(store: &dyn KeyValueStore) -> Option<UserProfile> {
  read_json(store, keys::USER_PROFILE).await
}

// ---------------------------------------------------------------------------
// Reset
// ---------------------------------------------------------------------------

/// Permanently drop workouts, weight entries and settings
pub async fn reset_all_data(store: &dyn KeyValueStore) -> Result<(), StorageError> {
  store.clear().await?;
  warn!("All fight camp data cleared");
  Ok(())
}

/// Everything the settings view shows, read in one call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsSnapshot {
  pub fight_date: Option<DateTime<Utc>>,
  pub days_until_fight: Option<i64>,
  pub target_weight: Option<f64>,
  pub profile: Option<UserProfile>,
}

impl SettingsSnapshot {
  pub async fn load(store: &dyn KeyValueStore) -> Self {
    let fight_date = get_fight_date(store).await;
    Self {
      fight_date,
      days_until_fight: fight_date.map(|date| days_until(date, Utc::now())),
      target_weight: get_target_weight(store).await,
      profile: get_user_profile(store).await,
    }
  }
}
