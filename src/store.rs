//! Key-value persistence backing every fight camp record
//!
//! All records live under a handful of string keys. The trait is the only seam
//! the data access layer talks to; SQLite is the production backend and the
//! in-memory map backs tests and throwaway sessions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;
use std::collections::{HashMap, HashSet};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// ---------------------------------------------------------------------------
/// Storage Keys
/// ---------------------------------------------------------------------------

pub mod keys {
  pub const WORKOUTS: &str = "fight_camp_workouts";
  pub const WEIGHT_ENTRIES: &str = "fight_camp_weight";
  pub const FIGHT_DATE: &str = "fight_camp_fight_date";
  pub const TARGET_WEIGHT: &str = "fight_camp_target_weight";
  pub const USER_PROFILE: &str = "fight_camp_profile";
}

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Migration error: {0}")]
  Migration(#[from] sqlx::migrate::MigrateError),

  #[error("Serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[error("Store unavailable: {0}")]
  Unavailable(String),
}

/// ---------------------------------------------------------------------------
/// Store Trait
/// ---------------------------------------------------------------------------

/// Async string-keyed store. A single `set` is atomic; nothing else is.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
  /// Read the raw value stored under `key`
  async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

  /// Overwrite the value stored under `key`
  async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

  /// Drop every key
  async fn clear(&self) -> Result<(), StorageError>;
}

/// SQLite-backed store, one row per key
pub struct SqliteStore {
  pool: SqlitePool,
}

impl SqliteStore {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }

  pub fn pool(&self) -> &SqlitePool {
    &self.pool
  }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
  async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
    let value = sqlx::query_scalar::<_, String>("SELECT value FROM kv_store WHERE key = ?")
      .bind(key)
      .fetch_optional(&self.pool)
      .await?;
    Ok(value)
  }

  async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
    sqlx::query(
      r#"
      INSERT INTO kv_store (key, value, updated_at)
      VALUES (?1, ?2, datetime('now'))
      ON CONFLICT(key) DO UPDATE SET
        value = excluded.value,
        updated_at = excluded.updated_at
      "#,
    )
    .bind(key)
    .bind(value)
    .execute(&self.pool)
    .await?;
    Ok(())
  }

  async fn clear(&self) -> Result<(), StorageError> {
    sqlx::query("DELETE FROM kv_store").execute(&self.pool).await?;
    Ok(())
  }
}

/// Ephemeral store; contents die with the value
#[derive(Default)]
pub struct MemoryStore {
  entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
  async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
    Ok(self.entries.lock().await.get(key).cloned())
  }

  async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
    self.entries.lock().await.insert(key.to_string(), value.to_string());
    Ok(())
  }

  async fn clear(&self) -> Result<(), StorageError> {
    self.entries.lock().await.clear();
    Ok(())
  }
}

/// ---------------------------------------------------------------------------
/// Read / Write Policies
/// ---------------------------------------------------------------------------

/// Read a raw value, logging and swallowing backend failures
pub(crate) async fn read_raw(store: &dyn KeyValueStore, key: &str) -> Option<String> {
  match store.get(key).await {
    Ok(value) => value,
    Err(e) => {
      warn!(key, error = %e, "Failed to read key, using empty default");
      None
    }
  }
}

/// Read and decode a JSON value. Missing, unreadable and malformed values all come back as `None`.
pub(crate) async fn read_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
  let raw = read_raw(store, key).await?;
  match serde_json::from_str(&raw) {
    Ok(value) => Some(value),
    Err(e) => {
      warn!(key, error = %e, "Stored value is malformed, using empty default");
      None
    }
  }
}

/// Encode a value as JSON and store it, propagating any failure
pub(crate) async fn write_json<T: Serialize + ?Sized>(
  store: &dyn KeyValueStore,
  key: &str,
  value: &T,
) -> Result<(), StorageError> {
  let json = serde_json::to_string(value)?;
  store.set(key, &json).await?;
  debug!(key, bytes = json.len(), "Stored value");
  Ok(())
}

/// Epoch milliseconds of `now`, bumped past any id already taken
pub(crate) fn next_millis_id<'a>(taken: impl IntoIterator<Item = &'a str>, now: DateTime<Utc>) -> String {
  let taken: HashSet<&str> = taken.into_iter().collect();
  let mut candidate = now.timestamp_millis();
  while taken.contains(candidate.to_string().as_str()) {
    candidate += 1;
  }
  candidate.to_string()
}
