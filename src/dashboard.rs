//! Home screen snapshot
//!
//! One explicit query returning everything the home view renders. Callers
//! re-run `load` to refresh; nothing is cached between calls.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::db::AppState;
use crate::models::{WeightEntry, WeightTrend};
use crate::settings::{get_days_until_fight, set_fight_date, target_weight_or_default};
use crate::store::StorageError;
use crate::weight::{format_trend, get_today_weight, get_weight_trend};
use crate::workouts::{format_workout_for_display_at, get_workouts, WorkoutDisplay, WorkoutStats};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
  pub recent_workouts: Vec<WorkoutDisplay>,
  pub stats: WorkoutStats,
  pub today_weight: Option<WeightEntry>,
  pub weight_trend: Option<WeightTrend>,
  /// Empty when there is no trend yet
  pub trend_label: String,
  pub days_until_fight: i64,
  pub target_weight: f64,
}

impl Dashboard {
  /// Read the home view. A missing fight date or target weight is seeded from
  /// the configured defaults; failures of those writes are returned.
  pub async fn load(state: &AppState) -> Result<Self, StorageError> {
    let store = state.store();
    let config = &state.config;
    let now = Utc::now();

    let workouts = get_workouts(store).await;
    let stats = WorkoutStats::from_workouts(&workouts, now);
    let recent_workouts = workouts
      .iter()
      .take(config.recent_workout_count)
      .map(|w| format_workout_for_display_at(w, now))
      .collect();

    let today_weight = get_today_weight(store).await;
    let weight_trend = get_weight_trend(store, config.trend_window_days).await;
    let trend_label = weight_trend.as_ref().map(format_trend).unwrap_or_default();

    let days_until_fight = match get_days_until_fight(store).await {
      Some(days) => days,
      None => {
        let days = config.default_fight_countdown_days;
        set_fight_date(store, now + Duration::days(days)).await?;
        info!(days, "Seeded default fight date");
        days
      }
    };

    let target_weight = target_weight_or_default(store, config.default_target_weight).await?;

    Ok(Self {
      recent_workouts,
      stats,
      today_weight,
      weight_trend,
      trend_label,
      days_until_fight,
      target_weight,
    })
  }

  /// Pounds still to cut to reach the target; negative when under
  pub fn weight_to_cut(&self) -> Option<f64> {
    self.today_weight.as_ref().map(|e| e.weight - self.target_weight)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::Config;
  use crate::settings::{get_fight_date, get_target_weight, set_fight_date_in_days, set_target_weight};
  use crate::store::keys;
  use crate::test_utils::{bagwork, test_state, FailingStore};
  use crate::weight::{save_weight_entry, save_weight_today};
  use crate::workouts::save_workout;
  use std::sync::Arc;

  #[tokio::test]
  async fn test_first_load_seeds_defaults() {
    let state = test_state();
    let dashboard = Dashboard::load(&state).await.unwrap();

    assert!(dashboard.recent_workouts.is_empty());
    assert!(dashboard.today_weight.is_none());
    assert!(dashboard.weight_trend.is_none());
    assert_eq!(dashboard.trend_label, "");
    assert_eq!(dashboard.days_until_fight, 23);
    assert_eq!(dashboard.target_weight, 165.0);
    assert!(dashboard.weight_to_cut().is_none());

    // Seeds were written
    assert!(get_fight_date(state.store()).await.is_some());
    assert_eq!(get_target_weight(state.store()).await, Some(165.0));

    // Second load reads them back
    let again = Dashboard::load(&state).await.unwrap();
    assert_eq!(again.days_until_fight, 23);
  }

  #[tokio::test]
  async fn test_load_uses_stored_values() {
    let state = test_state();
    let store = state.store();
    for rounds in 1..=5 {
      save_workout(store, bagwork(rounds, "3:00")).await.unwrap();
    }
    save_weight_entry(store, 184.0, Utc::now() - Duration::days(3)).await.unwrap();
    save_weight_today(store, 180.0).await.unwrap();
    set_fight_date_in_days(store, 56).await.unwrap();
    set_target_weight(store, 170.0).await.unwrap();

    let dashboard = Dashboard::load(&state).await.unwrap();
    assert_eq!(dashboard.recent_workouts.len(), 3);
    assert_eq!(dashboard.recent_workouts[0].display_details, "5 rounds × 3:00");
    assert_eq!(dashboard.recent_workouts[0].time_ago, "Just now");
    assert_eq!(dashboard.stats.total, 5);
    assert_eq!(dashboard.stats.total_rounds, 15);
    assert_eq!(dashboard.today_weight.as_ref().map(|e| e.weight), Some(180.0));
    assert_eq!(dashboard.trend_label, "↓ 4.0 lbs this week");
    assert_eq!(dashboard.days_until_fight, 56);
    assert_eq!(dashboard.target_weight, 170.0);
    assert_eq!(dashboard.weight_to_cut(), Some(10.0));
  }

  #[tokio::test]
  async fn test_configured_defaults() {
    let config = Config {
      default_target_weight: 147.0,
      default_fight_countdown_days: 84,
      recent_workout_count: 1,
      ..Config::default()
    };
    let state = AppState::in_memory(config);
    save_workout(state.store(), bagwork(3, "2:00")).await.unwrap();
    save_workout(state.store(), bagwork(4, "2:00")).await.unwrap();

    let dashboard = Dashboard::load(&state).await.unwrap();
    assert_eq!(dashboard.days_until_fight, 84);
    assert_eq!(dashboard.target_weight, 147.0);
    assert_eq!(dashboard.recent_workouts.len(), 1);
  }

  #[tokio::test]
  async fn test_date_only_fight_date_is_not_reseeded() {
    let state = test_state();
    let fight = (Utc::now() + Duration::days(60)).date_naive();
    let stored = fight.format("%Y-%m-%d").to_string();
    state.store().set(keys::FIGHT_DATE, &stored).await.unwrap();

    let dashboard = Dashboard::load(&state).await.unwrap();
    assert!(dashboard.days_until_fight >= 59 && dashboard.days_until_fight <= 60);
    assert_eq!(state.store().get(keys::FIGHT_DATE).await.unwrap(), Some(stored));
  }

  #[tokio::test]
  async fn test_corrupt_data_does_not_break_load() {
    let state = test_state();
    state.store().set(keys::WORKOUTS, "oops").await.unwrap();
    state.store().set(keys::WEIGHT_ENTRIES, "[1, 2").await.unwrap();

    let dashboard = Dashboard::load(&state).await.unwrap();
    assert!(dashboard.recent_workouts.is_empty());
    assert!(dashboard.today_weight.is_none());
  }

  #[tokio::test]
  async fn test_seed_failure_propagates() {
    let state = AppState::new(Arc::new(FailingStore::new()), Config::default());
    assert!(Dashboard::load(&state).await.is_err());
  }
}
