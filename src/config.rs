//! Environment-driven configuration
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file. Anything unset falls back to the defaults below; anything set but
//! unparseable is an error.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// ---------------------------------------------------------------------------
/// Defaults
/// ---------------------------------------------------------------------------

pub const DEFAULT_TARGET_WEIGHT_LBS: f64 = 165.0;
pub const DEFAULT_FIGHT_COUNTDOWN_DAYS: i64 = 23;
pub const DEFAULT_TREND_WINDOW_DAYS: u32 = 7;
pub const DEFAULT_RECENT_WORKOUTS: usize = 3;

const DB_FILE_NAME: &str = "fight-camp.db";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("Invalid value for {var}: {value:?}")]
  Invalid { var: String, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
  /// SQLite file holding the key-value table
  pub database_path: PathBuf,
  /// Target weight stored the first time it is read as absent
  pub default_target_weight: f64,
  /// Countdown seeded when the dashboard finds no fight date
  pub default_fight_countdown_days: i64,
  pub trend_window_days: u32,
  pub recent_workout_count: usize,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      database_path: default_db_path(),
      default_target_weight: DEFAULT_TARGET_WEIGHT_LBS,
      default_fight_countdown_days: DEFAULT_FIGHT_COUNTDOWN_DAYS,
      trend_window_days: DEFAULT_TREND_WINDOW_DAYS,
      recent_workout_count: DEFAULT_RECENT_WORKOUTS,
    }
  }
}

impl Config {
  /// Load `.env` (if any) and read the `FIGHT_CAMP_*` variables
  pub fn load() -> Result<Self, ConfigError> {
    dotenvy::dotenv().ok();
    Self::from_env()
  }

  pub fn from_env() -> Result<Self, ConfigError> {
    let defaults = Self::default();
    Ok(Self {
      database_path: env::var("FIGHT_CAMP_DB_PATH")
        .map(PathBuf::from)
        .unwrap_or(defaults.database_path),
      default_target_weight: parse_var("FIGHT_CAMP_TARGET_WEIGHT")?
        .unwrap_or(defaults.default_target_weight),
      default_fight_countdown_days: parse_var("FIGHT_CAMP_COUNTDOWN_DAYS")?
        .unwrap_or(defaults.default_fight_countdown_days),
      trend_window_days: parse_var("FIGHT_CAMP_TREND_DAYS")?
        .unwrap_or(defaults.trend_window_days),
      recent_workout_count: parse_var("FIGHT_CAMP_RECENT_WORKOUTS")?
        .unwrap_or(defaults.recent_workout_count),
    })
  }
}

/// `$HOME/.fight-camp/fight-camp.db`, or the working directory without a home
fn default_db_path() -> PathBuf {
  match env::var("HOME") {
    Ok(home) => PathBuf::from(home).join(".fight-camp").join(DB_FILE_NAME),
    Err(_) => PathBuf::from(DB_FILE_NAME),
  }
}

fn parse_var<T: FromStr>(var: &str) -> Result<Option<T>, ConfigError> {
  match env::var(var) {
    Ok(raw) => raw
      .trim()
      .parse()
      .map(Some)
      .map_err(|_| ConfigError::Invalid {
        var: var.to_string(),
        value: raw,
      }),
    Err(_) => Ok(None),
  }
}
