//! Logging initialization and configuration.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "termpaste=info";

/// Initialize the logging system.
///
/// The `RUST_LOG` environment variable takes precedence; otherwise `level`
/// (usually from the config file) is used, falling back to
/// `termpaste=info`.
///
/// # Panics
///
/// Panics if called more than once, or if another tracing subscriber has
/// already been set.
pub fn init(level: &str) {
    tracing_subscriber::registry()
        .with(filter(level))
        .with(tracing_subscriber::fmt::layer().compact())
        .init();
}

/// Try to initialize the logging system.
///
/// Returns `Ok(())` if successful, or `Err` if logging has already been
/// initialized.
pub fn try_init(level: &str) -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(filter(level))
        .with(tracing_subscriber::fmt::layer().compact())
        .try_init()
}

fn filter(level: &str) -> EnvFilter {
    let fallback = if level.is_empty() { DEFAULT_FILTER } else { level };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}
