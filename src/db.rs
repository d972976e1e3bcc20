use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::store::{KeyValueStore, MemoryStore, SqliteStore, StorageError};

pub type DbPool = SqlitePool;

/// Application state handed to every data access call
#[derive(Clone)]
pub struct AppState {
  pub store: Arc<dyn KeyValueStore>,
  pub config: Config,
}

impl AppState {
  pub fn new(store: Arc<dyn KeyValueStore>, config: Config) -> Self {
    Self { store, config }
  }

  /// Throwaway state backed by an in-memory map
  pub fn in_memory(config: Config) -> Self {
    Self::new(Arc::new(MemoryStore::new()), config)
  }

  pub fn store(&self) -> &dyn KeyValueStore {
    self.store.as_ref()
  }
}

/// Initialize the database connection pool and run migrations
pub async fn initialize_db(db_path: &Path) -> Result<DbPool, StorageError> {
  // Create directory if it doesn't exist
  if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
    fs::create_dir_all(parent)?;
  }

  let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
  info!(path = %db_path.display(), "Initializing database");

  let pool = SqlitePoolOptions::new()
    .max_connections(5)
    .connect(&db_url)
    .await?;

  sqlx::migrate!("./migrations").run(&pool).await?;

  info!("Database initialized successfully");

  Ok(pool)
}

/// Open the SQLite-backed store described by `config`
pub async fn open(config: Config) -> Result<AppState, StorageError> {
  let pool = initialize_db(&config.database_path).await?;
  Ok(AppState::new(Arc::new(SqliteStore::new(pool)), config))
}
