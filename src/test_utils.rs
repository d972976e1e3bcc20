//! Test utilities and helpers for unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - A store whose every call fails
//! - Workout and state factories

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::config::Config;
use crate::db::AppState;
use crate::models::{BagWork, NewWorkout, Session};
use crate::store::{KeyValueStore, StorageError};

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// ---------------------------------------------------------------------------
/// Failing Store
/// ---------------------------------------------------------------------------

/// Store that rejects every call, standing in for an unavailable or full backend
#[derive(Default)]
pub struct FailingStore;

impl FailingStore {
  pub fn new() -> Self {
    Self
  }
}

#[async_trait]
impl KeyValueStore for FailingStore {
  async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
    Err(StorageError::Unavailable(format!("read {}", key)))
  }

  async fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
    Err(StorageError::Unavailable(format!("quota exceeded writing {}", key)))
  }

  async fn clear(&self) -> Result<(), StorageError> {
    Err(StorageError::Unavailable("clear".to_string()))
  }
}

/// ---------------------------------------------------------------------------
/// Factories
/// ---------------------------------------------------------------------------

pub fn bagwork(rounds: u32, duration: &str) -> NewWorkout {
  NewWorkout::new(Session::Bagwork(BagWork {
    rounds: Some(rounds),
    duration: Some(duration.to_string()),
    rest: Some("1:00".to_string()),
    ..Default::default()
  }))
  .with_intensity(7)
}

/// In-memory state with default configuration
pub fn test_state() -> AppState {
  AppState::in_memory(Config::default())
}
