pub mod config;
pub mod dashboard;
pub mod db;
pub mod logging;
pub mod models;
pub mod plan;
pub mod settings;
pub mod store;
pub mod timer;
pub mod validation;
pub mod weight;
pub mod workouts;

#[cfg(test)]
mod test_utils;

pub use config::{Config, ConfigError};
pub use dashboard::Dashboard;
pub use db::AppState;
pub use store::{KeyValueStore, MemoryStore, SqliteStore, StorageError};

use tracing::info;

/// Load `.env` and configuration, start logging and open the SQLite store
pub async fn bootstrap() -> Result<AppState, Box<dyn std::error::Error + Send + Sync>> {
  let config = Config::load()?;
  logging::init_logging();

  let state = db::open(config).await?;
  info!(path = %state.config.database_path.display(), "Fight camp data ready");

  Ok(state)
}
