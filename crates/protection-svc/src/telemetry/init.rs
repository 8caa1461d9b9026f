//! Tracing subscriber initialisation: JSON-formatted structured logs.

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialise the global tracing subscriber.
///
/// Configures an [`EnvFilter`] (honouring `RUST_LOG` when set, falling back
/// to the configured level) and a JSON-formatted output layer.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_telemetry(log_level: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().json())
        .try_init()
        .context("failed to initialise tracing subscriber")?;

    Ok(())
}
