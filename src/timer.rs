//! Boxing round timer
//!
//! A one-second-tick state machine: work rounds separated by rest periods,
//! with no rest after the final round. The caller owns the clock and calls
//! `tick` once per elapsed second.

use serde::{Deserialize, Serialize};
use tracing::debug;

pub const ROUNDS_RANGE: (u32, u32) = (1, 20);
pub const ROUND_SECONDS_RANGE: (u32, u32) = (30, 600);
pub const REST_SECONDS_RANGE: (u32, u32) = (15, 300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
  pub rounds: u32,
  pub round_seconds: u32,
  pub rest_seconds: u32,
}

impl Default for TimerSettings {
  fn default() -> Self {
    Self {
      rounds: 3,
      round_seconds: 180,
      rest_seconds: 60,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerPreset {
  pub name: &'static str,
  pub settings: TimerSettings,
}

const fn preset(name: &'static str, rounds: u32, round_seconds: u32, rest_seconds: u32) -> TimerPreset {
  TimerPreset {
    name,
    settings: TimerSettings {
      rounds,
      round_seconds,
      rest_seconds,
    },
  }
}

pub const PRESETS: [TimerPreset; 6] = [
  preset("Boxing Training", 6, 180, 60),
  preset("Sparring", 8, 180, 60),
  preset("Heavy Bag", 5, 180, 90),
  preset("Speed Bag", 3, 120, 30),
  preset("HIIT Training", 10, 45, 15),
  preset("Pro Fight", 12, 180, 60),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
  Round,
  Rest,
  Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TimerEvent {
  /// A work round ended and rest begins
  RoundComplete { round: u32 },
  /// Rest ended and the next round begins
  RestComplete { next_round: u32 },
  /// The final round ended
  WorkoutComplete { rounds: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundTimer {
  settings: TimerSettings,
  current_round: u32,
  time_left: u32,
  phase: Phase,
  running: bool,
}

impl Default for RoundTimer {
  fn default() -> Self {
    Self::new(TimerSettings::default())
  }
}

impl RoundTimer {
  pub fn new(settings: TimerSettings) -> Self {
    Self {
      settings,
      current_round: 1,
      time_left: settings.round_seconds,
      phase: Phase::Round,
      running: false,
    }
  }

  pub fn settings(&self) -> TimerSettings {
    self.settings
  }

  pub fn current_round(&self) -> u32 {
    self.current_round
  }

  pub fn time_left(&self) -> u32 {
    self.time_left
  }

  pub fn phase(&self) -> Phase {
    self.phase
  }

  pub fn is_running(&self) -> bool {
    self.running
  }

  /// Start or resume. A finished timer starts over from round one.
  pub fn start(&mut self) {
    if self.phase == Phase::Finished {
      self.reset();
    }
    self.running = true;
  }

  pub fn pause(&mut self) {
    self.running = false;
  }

  pub fn reset(&mut self) {
    self.running = false;
    self.phase = Phase::Round;
    self.current_round = 1;
    self.time_left = self.settings.round_seconds;
  }

  /// Advance one second
  pub fn tick(&mut self) -> Option<TimerEvent> {
    if !self.running || self.phase == Phase::Finished {
      return None;
    }
    if self.time_left > 1 {
      self.time_left -= 1;
      return None;
    }

    let event = match self.phase {
      Phase::Round if self.current_round < self.settings.rounds => {
        self.phase = Phase::Rest;
        self.time_left = self.settings.rest_seconds;
        TimerEvent::RoundComplete {
          round: self.current_round,
        }
      }
      Phase::Rest if self.current_round < self.settings.rounds => {
        self.current_round += 1;
        self.phase = Phase::Round;
        self.time_left = self.settings.round_seconds;
        TimerEvent::RestComplete {
          next_round: self.current_round,
        }
      }
      // Final round, or rounds lowered while paused during rest
      Phase::Round | Phase::Rest => {
        self.phase = Phase::Finished;
        self.running = false;
        self.time_left = 0;
        TimerEvent::WorkoutComplete {
          rounds: self.settings.rounds,
        }
      }
      Phase::Finished => return None,
    };

    debug!(?event, "Timer phase complete");
    Some(event)
  }

  // -------------------------------------------------------------------------
  // Adjustments. Ignored while running; values are clamped to their range.
  // -------------------------------------------------------------------------

  pub fn adjust_rounds(&mut self, delta: i32) -> bool {
    if self.running {
      return false;
    }
    self.settings.rounds = clamp_add(self.settings.rounds, delta, ROUNDS_RANGE);
    true
  }

  pub fn adjust_round_seconds(&mut self, delta: i32) -> bool {
    if self.running {
      return false;
    }
    self.settings.round_seconds = clamp_add(self.settings.round_seconds, delta, ROUND_SECONDS_RANGE);
    if self.phase != Phase::Rest {
      self.time_left = self.settings.round_seconds;
    }
    true
  }

  pub fn adjust_rest_seconds(&mut self, delta: i32) -> bool {
    if self.running {
      return false;
    }
    self.settings.rest_seconds = clamp_add(self.settings.rest_seconds, delta, REST_SECONDS_RANGE);
    if self.phase == Phase::Rest {
      self.time_left = self.settings.rest_seconds;
    }
    true
  }

  pub fn load_preset(&mut self, preset: &TimerPreset) -> bool {
    if self.running {
      return false;
    }
    self.settings = preset.settings;
    self.reset();
    true
  }

  /// "ROUND 2", "REST" or "COMPLETE!"
  pub fn phase_label(&self) -> String {
    match self.phase {
      Phase::Round => format!("ROUND {}", self.current_round),
      Phase::Rest => "REST".to_string(),
      Phase::Finished => "COMPLETE!".to_string(),
    }
  }

  pub fn progress_label(&self) -> String {
    match self.phase {
      Phase::Round => format!("of {} rounds", self.settings.rounds),
      Phase::Rest => format!("Round {} of {}", self.current_round, self.settings.rounds),
      Phase::Finished => format!("{} rounds finished", self.settings.rounds),
    }
  }

  pub fn clock(&self) -> String {
    format_clock(self.time_left)
  }
}

fn clamp_add(value: u32, delta: i32, (min, max): (u32, u32)) -> u32 {
  (value as i64 + delta as i64).clamp(min as i64, max as i64) as u32
}

/// Seconds as `m:ss`
pub fn format_clock(seconds: u32) -> String {
  format!("{}:{:02}", seconds / 60, seconds % 60)
}
