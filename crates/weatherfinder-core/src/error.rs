//! Centralized error types for weatherfinder.
//!
//! This module provides a typed error hierarchy that:
//! - Enables precise error handling at the application boundary
//! - Provides user-friendly messages suitable for display
//! - Preserves full error context for debugging/logging

use thiserror::Error;
use weatherfinder_forecast::ForecastError;

/// Top-level application error type.
///
/// Use `user_message()` to get a display-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Forecast error: {0}")]
    Forecast(#[from] ForecastError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display.
    ///
    /// These messages are designed to be actionable and non-technical.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Config(e) => e.user_message(),
            AppError::Forecast(e) => e.user_message(),
            AppError::Io(_) => "Could not read the forecast file. Check the path and permissions.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::ParseError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_non_empty() {
        let errors = vec![
            AppError::Config(ConfigError::Invalid("test".into())),
            AppError::Forecast(ForecastError::UnknownTimeZone("x".into())),
            AppError::Forecast(ForecastError::MissingCondition { timestamp: 0 }),
            AppError::Io(std::io::Error::other("disk")),
            AppError::Other(anyhow::anyhow!("boom")),
        ];

        for err in errors {
            assert!(!err.user_message().is_empty(), "{} has no message", err);
        }
    }

    #[test]
    fn test_app_error_conversion() {
        let forecast_err = ForecastError::UnknownTimeZone("Mars/Base".into());
        let app_err: AppError = forecast_err.into();
        assert!(matches!(app_err, AppError::Forecast(ForecastError::UnknownTimeZone(_))));
    }

    #[test]
    fn test_user_message_propagation() {
        let app_err = AppError::Config(ConfigError::ParseError("bad".into()));
        assert_eq!(
            app_err.user_message(),
            "Configuration file is malformed. Check your settings."
        );
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("= =").unwrap_err();
        let err: ConfigError = toml_err.into();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
