use serde::{Deserialize, Serialize};

/// Length of the per-day detail window, in seconds.
pub const WINDOW_SECONDS: i64 = 24 * 60 * 60;

/// One short-interval forecast observation (typically a 3-hour step)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyRecord {
    /// Unix epoch seconds, UTC
    pub timestamp: i64,
    pub temperature: f64,
    /// Upstream per-record lower bound; not used in aggregation
    pub temperature_min: f64,
    /// Upstream per-record upper bound; not used in aggregation
    pub temperature_max: f64,
    pub feels_like: f64,
    /// Percent, 0-100
    pub humidity: i32,
    pub description: String,
    pub icon_code: String,
    pub wind_speed: f64,
    /// Degrees, 0-359
    pub wind_direction: i32,
    /// 0.0-1.0
    pub probability_of_precipitation: f64,
    /// Meters
    pub visibility: i32,
    /// hPa
    pub pressure: i32,
}

/// Summary of one calendar day plus the 24 hours of detail starting at its
/// first observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAggregate {
    /// Epoch seconds at local midnight of the calendar day
    pub day_timestamp: i64,
    pub average_temperature: f64,
    pub min_temperature: f64,
    pub max_temperature: f64,
    pub average_feels_like: f64,
    pub average_humidity: i32,
    pub max_wind_speed: f64,
    pub modal_wind_direction: i32,
    pub modal_visibility: i32,
    pub description: String,
    pub icon_code: String,
    pub average_probability_of_precipitation: f64,
    /// Ascending by timestamp; may overlap with the next day's window
    pub hourly_records: Vec<HourlyRecord>,
}

/// Daily forecast series, ascending by day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherForecast {
    pub daily_forecasts: Vec<DailyAggregate>,
}

/// Current conditions at a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature: f64,
    pub feels_like: f64,
    pub description: String,
    pub icon_code: String,
    pub humidity: i32,
    pub wind_speed: f64,
    pub city_name: String,
    pub timestamp: i64,
    pub wind_direction: i32,
    pub visibility: i32,
    pub pressure: i32,
}

/// Forecast decoding errors
#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Forecast entry at {timestamp} has no weather condition")]
    MissingCondition { timestamp: i64 },
    #[error("Unknown time zone: {0}")]
    UnknownTimeZone(String),
}

impl ForecastError {
    /// Returns a user-friendly message suitable for display.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Parse(_) => "Received unreadable forecast data. Please try again.",
            Self::MissingCondition { .. } => "Forecast data is incomplete. Please try again.",
            Self::UnknownTimeZone(_) => "Unknown time zone. Check your settings.",
        }
    }
}
