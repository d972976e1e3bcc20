use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A body-weight reading. At most one entry exists per calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
  pub id: String,
  /// Pounds
  pub weight: f64,
  /// The day the reading belongs to
  pub date: DateTime<Utc>,
  /// When the reading was recorded
  pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
  Down,
  Up,
  Stable,
}

impl TrendDirection {
  pub fn from_change(change: f64) -> Self {
    if change < 0.0 {
      Self::Down
    } else if change > 0.0 {
      Self::Up
    } else {
      Self::Stable
    }
  }

  pub fn arrow(&self) -> &'static str {
    match self {
      Self::Down => "↓",
      Self::Up => "↑",
      Self::Stable => "→",
    }
  }
}

/// Weight change across a trailing window of days
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightTrend {
  /// Newest minus oldest reading in the window, pounds
  pub change: f64,
  /// Window length in days
  pub period: u32,
  pub direction: TrendDirection,
}
