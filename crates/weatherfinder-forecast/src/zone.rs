//! Time zone used to draw calendar-day boundaries.

use std::fmt;
use std::str::FromStr;

use chrono::{FixedOffset, Local, Utc};
use chrono_tz::Tz;

use crate::assemble::aggregate_daily;
use crate::types::{DailyAggregate, ForecastError, HourlyRecord};

/// Zone selected at runtime (from configuration or the command line)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayZone {
    /// Host zone, resolved per timestamp
    #[default]
    Local,
    Utc,
    /// IANA zone such as `Europe/Vienna`
    Named(Tz),
    /// Fixed offset such as `+02:00`
    Fixed(FixedOffset),
}

impl DayZone {
    /// Run the daily aggregation with this zone's day boundaries.
    pub fn aggregate(&self, records: &[HourlyRecord]) -> Vec<DailyAggregate> {
        match self {
            Self::Local => aggregate_daily(records, &Local),
            Self::Utc => aggregate_daily(records, &Utc),
            Self::Named(tz) => aggregate_daily(records, tz),
            Self::Fixed(offset) => aggregate_daily(records, offset),
        }
    }
}

impl FromStr for DayZone {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("local") {
            return Ok(Self::Local);
        }
        if trimmed.eq_ignore_ascii_case("utc") {
            return Ok(Self::Utc);
        }
        if trimmed.starts_with('+') || trimmed.starts_with('-') {
            return trimmed
                .parse::<FixedOffset>()
                .map(Self::Fixed)
                .map_err(|_| ForecastError::UnknownTimeZone(s.to_string()));
        }
        trimmed
            .parse::<Tz>()
            .map(Self::Named)
            .map_err(|_| ForecastError::UnknownTimeZone(s.to_string()))
    }
}

impl fmt::Display for DayZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Utc => write!(f, "utc"),
            Self::Named(tz) => write!(f, "{}", tz.name()),
            Self::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}
