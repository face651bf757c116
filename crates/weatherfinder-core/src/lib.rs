pub mod config;
pub mod error;

pub use config::{Config, ForecastConfig, LoggingConfig, Units, ValidationResult};
pub use error::{AppError, ConfigError};

use anyhow::Result;

/// Initialize logging
///
/// `RUST_LOG` wins over `default_filter` when set.
pub fn init(default_filter: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| tracing_subscriber::EnvFilter::try_new(default_filter))
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::debug!("weatherfinder core initialized");
    Ok(())
}
