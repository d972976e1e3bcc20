use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "fight_camp=info";

/// Install the fmt subscriber. `RUST_LOG` wins over the default filter.
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
  let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
