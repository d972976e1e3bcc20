//! Weight log and trend
//!
//! Entries are kept sorted newest day first with at most one entry per
//! calendar day. Day equality compares local (year, month, day) only.

use chrono::{DateTime, Datelike, Duration, Local, Utc};
use tracing::info;

use crate::models::{TrendDirection, WeightEntry, WeightTrend};
use crate::store::{keys, next_millis_id, read_json, write_json, KeyValueStore, StorageError};

/// True when both instants fall on the same local calendar day
pub fn same_calendar_day(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
  let a = a.with_timezone(&Local);
  let b = b.with_timezone(&Local);
  a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

// ---------------------------------------------------------------------------
// Store Operations
// ---------------------------------------------------------------------------

/// Record a reading for the day of `date`, replacing any reading already on that day
pub async fn save_weight_entry(
  store: &dyn KeyValueStore,
  weight: f64,
  date: DateTime<Utc>,
) -> Result<WeightEntry, StorageError> {
  let existing = get_weight_entries(store).await;
  let now = Utc::now();

  let entry = WeightEntry {
    id: next_millis_id(existing.iter().map(|e| e.id.as_str()), now),
    weight,
    date,
    timestamp: now,
  };

  let updated = upsert_day(existing, entry.clone());
  write_json(store, keys::WEIGHT_ENTRIES, &updated).await?;
  info!(weight, date = %date, "Saved weight entry");

  Ok(entry)
}

/// Record a reading for today
pub async fn save_weight_today(
  store: &dyn KeyValueStore,
  weight: f64,
) -> Result<WeightEntry, StorageError> {
  save_weight_entry(store, weight, Utc::now()).await
}

/// All readings, newest day first
pub async fn get_weight_entries(store: &dyn KeyValueStore) -> Vec<WeightEntry> {
  read_json(store, keys::WEIGHT_ENTRIES).await.unwrap_or_default()
}

/// Today's reading, if one was logged
pub async fn get_today_weight(store: &dyn KeyValueStore) -> Option<WeightEntry> {
  let entries = get_weight_entries(store).await;
  entry_for_day(&entries, Utc::now()).cloned()
}

/// Trend over the trailing `window_days`; `None` with fewer than two readings in the window
pub async fn get_weight_trend(store: &dyn KeyValueStore, window_days: u32) -> Option<WeightTrend> {
  let entries = get_weight_entries(store).await;
  compute_trend(&entries, window_days, Utc::now())
}

// ---------------------------------------------------------------------------
// Pure Computation
// ---------------------------------------------------------------------------

/// Drop any entry on the same day as `entry`, add it, and re-sort newest day first
fn upsert_day(existing: Vec<WeightEntry>, entry: WeightEntry) -> Vec<WeightEntry> {
  let mut entries: Vec<WeightEntry> = existing
    .into_iter()
    .filter(|e| !same_calendar_day(e.date, entry.date))
    .collect();
  entries.insert(0, entry);
  entries.sort_by(|a, b| b.date.cmp(&a.date));
  entries
}

pub fn entry_for_day(entries: &[WeightEntry], day: DateTime<Utc>) -> Option<&WeightEntry> {
  entries.iter().find(|e| same_calendar_day(e.date, day))
}

/// Newest minus oldest reading among entries dated on or after `now - window_days`
pub fn compute_trend(
  entries: &[WeightEntry],
  window_days: u32,
  now: DateTime<Utc>,
) -> Option<WeightTrend> {
  let cutoff = now - Duration::days(window_days as i64);
  let mut recent: Vec<&WeightEntry> = entries.iter().filter(|e| e.date >= cutoff).collect();

  if recent.len() < 2 {
    return None;
  }

  recent.sort_by(|a, b| b.date.cmp(&a.date));
  let newest = recent.first()?;
  let oldest = recent.last()?;
  let change = newest.weight - oldest.weight;

  Some(WeightTrend {
    change,
    period: window_days,
    direction: TrendDirection::from_change(change),
  })
}

/// "↓ 4.0 lbs this week"
pub fn format_trend(trend: &WeightTrend) -> String {
  format!(
    "{} {:.1} lbs this week",
    trend.direction.arrow(),
    trend.change.abs()
  )
}
