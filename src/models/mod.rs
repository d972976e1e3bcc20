pub mod profile;
pub mod weight;
pub mod workout;

pub use profile::UserProfile;
pub use weight::{TrendDirection, WeightEntry, WeightTrend};
pub use workout::{
  BagType, BagWork, Cardio, CardioType, NewWorkout, Session, Sparring, Strength, Workout,
  WorkoutType,
};
