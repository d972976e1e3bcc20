use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A logged training session. Immutable once created; only deletion changes the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
  pub id: String,
  pub timestamp: DateTime<Utc>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub intensity: Option<u8>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub notes: Option<String>,
  #[serde(flatten)]
  pub session: Session,
}

impl Workout {
  pub fn workout_type(&self) -> WorkoutType {
    self.session.workout_type()
  }
}

/// For inserting new workouts (without id, timestamp)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWorkout {
  #[serde(flatten)]
  pub session: Session,
  #[serde(default)]
  pub intensity: Option<u8>,
  #[serde(default)]
  pub notes: Option<String>,
}

impl NewWorkout {
  pub fn new(session: Session) -> Self {
    Self {
      session,
      intensity: None,
      notes: None,
    }
  }

  pub fn with_intensity(mut self, intensity: u8) -> Self {
    self.intensity = Some(intensity);
    self
  }

  pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
    self.notes = Some(notes.into());
    self
  }
}

/// Type-specific fields, discriminated by the stored `type` tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Session {
  Bagwork(BagWork),
  Cardio(Cardio),
  Strength(Strength),
  Sparring(Sparring),
}

impl Session {
  pub fn workout_type(&self) -> WorkoutType {
    match self {
      Session::Bagwork(_) => WorkoutType::Bagwork,
      Session::Cardio(_) => WorkoutType::Cardio,
      Session::Strength(_) => WorkoutType::Strength,
      Session::Sparring(_) => WorkoutType::Sparring,
    }
  }

  /// Rounds and per-round duration for the boxing session types
  pub fn rounds(&self) -> Option<(Option<u32>, Option<&str>)> {
    match self {
      Session::Bagwork(b) => Some((b.rounds, b.duration.as_deref())),
      Session::Sparring(s) => Some((s.rounds, s.duration.as_deref())),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BagWork {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub rounds: Option<u32>,
  /// Per-round duration as entered, e.g. "3:00"
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub duration: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub rest: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub bag_type: Option<BagType>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub combinations: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sparring {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub rounds: Option<u32>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub duration: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub rest: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub opponent: Option<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub focus_areas: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cardio {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub cardio_type: Option<CardioType>,
  /// Miles
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub distance: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub time: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub pace: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub heart_rate: Option<u32>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub sprints: Option<u32>,
  /// Meters per sprint
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub sprint_distance: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strength {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub exercises: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub sets: Option<u32>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub reps: Option<u32>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub weight: Option<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub muscle_groups: Vec<String>,
}

/// ---------------------------------------------------------------------------
/// Enumerations
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutType {
  Bagwork,
  Cardio,
  Strength,
  Sparring,
}

impl WorkoutType {
  pub const ALL: [WorkoutType; 4] = [
    WorkoutType::Bagwork,
    WorkoutType::Cardio,
    WorkoutType::Strength,
    WorkoutType::Sparring,
  ];

  /// Short label used on pickers
  pub fn label(&self) -> &'static str {
    match self {
      Self::Bagwork => "Bag Work",
      Self::Cardio => "Cardio",
      Self::Strength => "Strength",
      Self::Sparring => "Sparring",
    }
  }

  /// Heading for the detail view
  pub fn title(&self) -> &'static str {
    match self {
      Self::Bagwork => "Bag Work Session",
      Self::Cardio => "Cardio Training",
      Self::Strength => "Strength Training",
      Self::Sparring => "Sparring Session",
    }
  }

  pub fn icon(&self) -> &'static str {
    match self {
      Self::Bagwork => "🥊",
      Self::Cardio => "🏃",
      Self::Strength => "💪",
      Self::Sparring => "🥋",
    }
  }

  pub fn is_boxing(&self) -> bool {
    matches!(self, Self::Bagwork | Self::Sparring)
  }
}

impl fmt::Display for WorkoutType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Bagwork => write!(f, "bagwork"),
      Self::Cardio => write!(f, "cardio"),
      Self::Strength => write!(f, "strength"),
      Self::Sparring => write!(f, "sparring"),
    }
  }
}

impl std::str::FromStr for WorkoutType {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "bagwork" => Ok(Self::Bagwork),
      "cardio" => Ok(Self::Cardio),
      "strength" => Ok(Self::Strength),
      "sparring" => Ok(Self::Sparring),
      _ => Err(format!("Unknown workout type: {}", s)),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BagType {
  Heavy,
  Speed,
  DoubleEnd,
  Maize,
}

impl BagType {
  pub fn display_name(&self) -> &'static str {
    match self {
      Self::Heavy => "Heavy Bag",
      Self::Speed => "Speed Bag",
      Self::DoubleEnd => "Double-End Bag",
      Self::Maize => "Maize Bag",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardioType {
  Running,
  Cycling,
  Rowing,
  JumpRope,
  Sprints,
  #[serde(rename = "longrun")]
  LongRun,
}

impl CardioType {
  pub fn display_name(&self) -> &'static str {
    match self {
      Self::Running => "Running",
      Self::Cycling => "Cycling",
      Self::Rowing => "Rowing",
      Self::JumpRope => "Jump Rope",
      Self::Sprints => "Sprints",
      Self::LongRun => "Long Run",
    }
  }
}
