//! OpenWeatherMap payloads (`/data/2.5/forecast` and `/data/2.5/weather`).
//!
//! Only decoding lives here; fetching is left to the caller.

use chrono::TimeZone;
use serde::{Deserialize, Serialize};

use crate::assemble::aggregate_daily;
use crate::types::{CurrentWeather, ForecastError, HourlyRecord, WeatherForecast};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Condition {
    pub id: i32,
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: i32,
    pub humidity: i32,
    #[serde(default)]
    pub sea_level: Option<i32>,
    #[serde(default)]
    pub grnd_level: Option<i32>,
    #[serde(default)]
    pub temp_kf: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clouds {
    pub all: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
    #[serde(rename = "deg")]
    pub direction: i32,
    #[serde(default)]
    pub gust: Option<f64>,
}

/// Rain or snow volume in mm
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Precipitation {
    #[serde(rename = "1h", default)]
    pub last_hour: Option<f64>,
    #[serde(rename = "3h", default)]
    pub last_three_hours: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartOfDay {
    pub pod: String,
}

/// One 3-hour step of the forecast list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastItem {
    pub dt: i64,
    pub main: MainReadings,
    pub weather: Vec<Condition>,
    #[serde(default)]
    pub clouds: Option<Clouds>,
    pub wind: Wind,
    // Missing when visibility is unlimited
    #[serde(default = "default_visibility")]
    pub visibility: i32,
    #[serde(default)]
    pub pop: f64,
    #[serde(default)]
    pub rain: Option<Precipitation>,
    #[serde(default)]
    pub snow: Option<Precipitation>,
    #[serde(default)]
    pub sys: Option<PartOfDay>,
    #[serde(default)]
    pub dt_txt: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub id: i64,
    pub name: String,
    #[serde(rename = "coord")]
    pub coordinates: Coordinates,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub population: i64,
    /// Shift from UTC in seconds
    #[serde(default)]
    pub timezone: i32,
    #[serde(default)]
    pub sunrise: i64,
    #[serde(default)]
    pub sunset: i64,
}

/// 5-day / 3-hour forecast response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub cod: String,
    #[serde(default)]
    pub message: i64,
    pub cnt: i32,
    pub list: Vec<ForecastItem>,
    pub city: City,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentSys {
    #[serde(rename = "type", default)]
    pub kind: Option<i32>,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub country: Option<String>,
    pub sunrise: i64,
    pub sunset: i64,
}

/// Current weather response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeatherResponse {
    pub coord: Coordinates,
    pub weather: Vec<Condition>,
    #[serde(default)]
    pub base: String,
    pub main: MainReadings,
    #[serde(default = "default_visibility")]
    pub visibility: i32,
    pub wind: Wind,
    #[serde(default)]
    pub clouds: Option<Clouds>,
    pub dt: i64,
    pub sys: CurrentSys,
    pub timezone: i32,
    pub id: i64,
    pub name: String,
    pub cod: i32,
}

// The API's cap, reported when the field is absent
fn default_visibility() -> i32 {
    10_000
}

impl ForecastItem {
    /// Map this step into an hourly record, using its first condition.
    pub fn to_hourly_record(&self) -> Result<HourlyRecord, ForecastError> {
        let condition = self
            .weather
            .first()
            .ok_or(ForecastError::MissingCondition { timestamp: self.dt })?;

        Ok(HourlyRecord {
            timestamp: self.dt,
            temperature: self.main.temp,
            temperature_min: self.main.temp_min,
            temperature_max: self.main.temp_max,
            feels_like: self.main.feels_like,
            humidity: self.main.humidity,
            description: condition.description.clone(),
            icon_code: condition.icon.clone(),
            wind_speed: self.wind.speed,
            wind_direction: self.wind.direction,
            probability_of_precipitation: self.pop,
            visibility: self.visibility,
            pressure: self.main.pressure,
        })
    }
}

impl ForecastResponse {
    /// All forecast steps as hourly records, in payload order.
    pub fn hourly_records(&self) -> Result<Vec<HourlyRecord>, ForecastError> {
        self.list.iter().map(ForecastItem::to_hourly_record).collect()
    }
}

impl CurrentWeatherResponse {
    /// Map into current conditions, using the first condition.
    pub fn to_current_weather(&self) -> Result<CurrentWeather, ForecastError> {
        let condition = self
            .weather
            .first()
            .ok_or(ForecastError::MissingCondition { timestamp: self.dt })?;

        Ok(CurrentWeather {
            temperature: self.main.temp,
            feels_like: self.main.feels_like,
            description: condition.description.clone(),
            icon_code: condition.icon.clone(),
            humidity: self.main.humidity,
            wind_speed: self.wind.speed,
            city_name: self.name.clone(),
            timestamp: self.dt,
            wind_direction: self.wind.direction,
            visibility: self.visibility,
            pressure: self.main.pressure,
        })
    }
}

/// Decode a forecast response body.
pub fn parse_forecast(json: &str) -> Result<ForecastResponse, ForecastError> {
    Ok(serde_json::from_str(json)?)
}

/// Decode a current weather response body.
pub fn parse_current(json: &str) -> Result<CurrentWeatherResponse, ForecastError> {
    Ok(serde_json::from_str(json)?)
}

/// Decode every step of `response` and summarize it per calendar day in `tz`.
pub fn map_forecast<Tz: TimeZone>(
    response: &ForecastResponse,
    tz: &Tz,
) -> Result<WeatherForecast, ForecastError> {
    let records = response.hourly_records()?;
    tracing::debug!(
        "Mapping {} forecast steps for {}",
        records.len(),
        response.city.name
    );

    Ok(WeatherForecast {
        daily_forecasts: aggregate_daily(&records, tz),
    })
}
