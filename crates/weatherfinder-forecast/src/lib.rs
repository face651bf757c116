//! Forecast aggregation for weatherfinder
//!
//! Turns a series of short-interval forecast records into calendar-day
//! summaries, each carrying the 24 hours of detail that follow the day's
//! first record. Also decodes OpenWeatherMap payloads into that series.

pub mod assemble;
pub mod bucket;
pub mod openweather;
pub mod stats;
pub mod types;
pub mod window;
pub mod zone;

pub use assemble::aggregate_daily;
pub use openweather::{map_forecast, parse_current, parse_forecast};
pub use types::*;
pub use zone::DayZone;
