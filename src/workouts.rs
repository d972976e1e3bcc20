//! Workout log
//!
//! The log is one JSON list under a single key, newest first. Reads never
//! fail: a missing or corrupt list reads as empty. Writes propagate the
//! backend error to the caller.

use chrono::{DateTime, Duration, Local, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

use crate::models::{CardioType, NewWorkout, Session, Workout, WorkoutType};
use crate::store::{keys, next_millis_id, read_json, write_json, KeyValueStore, StorageError};

const EXERCISE_PREVIEW_CHARS: usize = 30;

// ---------------------------------------------------------------------------
// Store Operations
// ---------------------------------------------------------------------------

/// Record a workout and return it with its generated id and timestamp
pub async fn save_workout(
  store: &dyn KeyValueStore,
  workout: NewWorkout,
) -> Result<Workout, StorageError> {
  let existing = get_workouts(store).await;
  let now = Utc::now();

  let created = Workout {
    id: next_workout_id(&existing, now),
    timestamp: now,
    intensity: workout.intensity,
    notes: workout.notes,
    session: workout.session,
  };

  let mut updated = Vec::with_capacity(existing.len() + 1);
  updated.push(created.clone());
  updated.extend(existing);

  write_json(store, keys::WORKOUTS, &updated).await?;
  info!(id = %created.id, workout_type = %created.workout_type(), "Saved workout");

  Ok(created)
}

/// All workouts, newest first
pub async fn get_workouts(store: &dyn KeyValueStore) -> Vec<Workout> {
  read_json(store, keys::WORKOUTS).await.unwrap_or_default()
}

/// Remove the workout with `id`; unknown ids leave the log untouched
pub async fn delete_workout(store: &dyn KeyValueStore, id: &str) -> Result<(), StorageError> {
  let workouts = get_workouts(store).await;
  let before = workouts.len();
  let remaining: Vec<Workout> = workouts.into_iter().filter(|w| w.id != id).collect();

  write_json(store, keys::WORKOUTS, &remaining).await?;
  debug!(id, removed = before - remaining.len(), "Deleted workout");

  Ok(())
}

/// Creation time in epoch milliseconds, bumped past any id already in the log
fn next_workout_id(existing: &[Workout], now: DateTime<Utc>) -> String {
  next_millis_id(existing.iter().map(|w| w.id.as_str()), now)
}

// ---------------------------------------------------------------------------
// Display Formatting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutDisplay {
  #[serde(flatten)]
  pub workout: Workout,
  pub display_details: String,
  pub time_ago: String,
}

pub fn format_workout_for_display(workout: &Workout) -> WorkoutDisplay {
  format_workout_for_display_at(workout, Utc::now())
}

pub fn format_workout_for_display_at(workout: &Workout, now: DateTime<Utc>) -> WorkoutDisplay {
  WorkoutDisplay {
    workout: workout.clone(),
    display_details: display_details(&workout.session),
    time_ago: time_ago(workout.timestamp, now),
  }
}

/// One-line summary of the type-specific fields
pub fn display_details(session: &Session) -> String {
  match session {
    Session::Bagwork(_) | Session::Sparring(_) => match session.rounds() {
      Some((Some(rounds), Some(duration))) => format!("{} rounds × {}", rounds, duration),
      _ => "Boxing training".to_string(),
    },
    Session::Cardio(c) => match c.cardio_type {
      Some(CardioType::Sprints) => match (c.sprints, c.sprint_distance) {
        (Some(sprints), Some(meters)) => format!("{} × {}m sprints", sprints, meters),
        _ => "Sprint training".to_string(),
      },
      Some(CardioType::LongRun) => match (c.distance, c.time.as_deref()) {
        (Some(distance), Some(time)) => format!("{} miles in {}", distance, time),
        (Some(distance), None) => format!("{} mile run", distance),
        _ => "Long run".to_string(),
      },
      _ => match c.distance {
        Some(distance) => format!("{} miles", distance),
        None => "Cardio training".to_string(),
      },
    },
    Session::Strength(s) => match (s.exercises.as_deref(), s.sets, s.reps) {
      (Some(exercises), sets, reps) => {
        let short = preview(exercises, EXERCISE_PREVIEW_CHARS);
        match (sets, reps) {
          (Some(sets), Some(reps)) => format!("{} ({}×{})", short, sets, reps),
          _ => short,
        }
      }
      (None, Some(sets), Some(reps)) => format!("{} sets × {} reps", sets, reps),
      _ => "Strength training".to_string(),
    },
  }
}

fn preview(text: &str, max_chars: usize) -> String {
  if text.chars().count() > max_chars {
    let head: String = text.chars().take(max_chars).collect();
    format!("{}...", head)
  } else {
    text.to_string()
  }
}

/// Relative age label: "Just now", "5h ago", "Yesterday", "3 days ago", then a calendar date
pub fn time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
  let hours = (now - timestamp).num_hours();
  if hours < 1 {
    return "Just now".to_string();
  }
  if hours < 24 {
    return format!("{}h ago", hours);
  }

  let days = hours / 24;
  if days == 1 {
    return "Yesterday".to_string();
  }
  if days < 7 {
    return format!("{} days ago", days);
  }

  timestamp.with_timezone(&Local).format("%-m/%-d/%Y").to_string()
}

// ---------------------------------------------------------------------------
// History Statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutStats {
  pub total: usize,
  pub by_type: HashMap<WorkoutType, usize>,
  /// Rounds across bag work and sparring
  pub total_rounds: u32,
  pub average_intensity: Option<f64>,
  pub last_7_days: usize,
}

impl WorkoutStats {
  pub fn from_workouts(workouts: &[Workout], now: DateTime<Utc>) -> Self {
    let week_ago = now - Duration::days(7);
    let mut stats = Self {
      total: workouts.len(),
      ..Default::default()
    };

    let mut intensity_sum = 0u32;
    let mut intensity_count = 0u32;

    for workout in workouts {
      *stats.by_type.entry(workout.workout_type()).or_insert(0) += 1;

      if let Some((Some(rounds), _)) = workout.session.rounds() {
        stats.total_rounds = stats.total_rounds.saturating_add(rounds);
      }
      if let Some(intensity) = workout.intensity {
        intensity_sum += intensity as u32;
        intensity_count += 1;
      }
      if workout.timestamp >= week_ago {
        stats.last_7_days += 1;
      }
    }

    if intensity_count > 0 {
      stats.average_intensity = Some(intensity_sum as f64 / intensity_count as f64);
    }

    stats
  }

  pub fn count(&self, workout_type: WorkoutType) -> usize {
    self.by_type.get(&workout_type).copied().unwrap_or(0)
  }
}
