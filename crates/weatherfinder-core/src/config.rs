use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use weatherfinder_forecast::{DayZone, ForecastError};

use crate::error::{AppError, ConfigError};

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    pub config_dir: PathBuf,

    /// Forecast settings
    #[serde(default)]
    pub forecast: ForecastConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Measurement units requested from the upstream provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Kelvin, m/s
    Standard,
    /// Celsius, m/s
    #[default]
    Metric,
    /// Fahrenheit, mph
    Imperial,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Zone for calendar-day boundaries: "local", "utc", an IANA name or "+HH:MM"
    #[serde(default = "default_time_zone")]
    pub time_zone: String,

    /// Units the forecast data is delivered in
    #[serde(default)]
    pub units: Units,
}

fn default_time_zone() -> String {
    "local".to_string()
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            time_zone: default_time_zone(),
            units: Units::default(),
        }
    }
}

impl ForecastConfig {
    /// Resolve the configured zone
    pub fn zone(&self) -> Result<DayZone, ForecastError> {
        self.time_zone.parse()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default tracing filter, overridden by RUST_LOG
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("weatherfinder");

        Self {
            config_dir,
            forecast: ForecastConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from an explicit path, creating default if it doesn't exist
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            let mut config = Self::default();
            if let Some(parent) = config_path.parent() {
                config.config_dir = parent.to_path_buf();
            }
            config.save_to(config_path)?;
            return Ok(config);
        }

        let contents = std::fs::read_to_string(config_path)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Load configuration from the default location and validate it
    ///
    /// A `time_zone` override replaces the configured zone before validation,
    /// so a broken zone in the file does not matter when one is given.
    /// Returns the config along with its warnings; errors fail the load.
    pub fn load_validated(time_zone: Option<&str>) -> Result<(Self, ValidationResult), AppError> {
        Self::load_validated_from(&Self::config_path()?, time_zone)
    }

    /// Same as [`Config::load_validated`] for an explicit path
    pub fn load_validated_from(
        config_path: &Path,
        time_zone: Option<&str>,
    ) -> Result<(Self, ValidationResult), AppError> {
        let mut config = Self::load_from(config_path).map_err(|e| {
            match e.downcast::<ConfigError>() {
                Ok(config_err) => AppError::Config(config_err),
                Err(other) => AppError::Other(other),
            }
        })?;

        if let Some(tz) = time_zone {
            config.forecast.time_zone = tz.to_string();
        }

        let validation = config.validate();
        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        match self.forecast.zone() {
            Ok(DayZone::Local) => result.add_warning(
                "forecast.time_zone",
                "Day boundaries follow the host time zone; set an explicit zone for stable results",
            ),
            Ok(_) => {}
            Err(e) => result.add_error("forecast.time_zone", e.to_string()),
        }

        if self.logging.filter.trim().is_empty() {
            result.add_error("logging.filter", "Log filter must not be empty");
        } else if let Err(e) = tracing_subscriber::EnvFilter::try_new(&self.logging.filter) {
            result.add_error("logging.filter", format!("Invalid log filter: {}", e));
        }

        result
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        std::fs::write(config_path, contents)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("weatherfinder");

        Ok(config_dir.join("config.toml"))
    }
}
