//! Daily forecast assembly: bucket, summarize, attach detail window.

use chrono::TimeZone;

use crate::bucket::bucket_by_day;
use crate::stats::day_statistics;
use crate::types::{DailyAggregate, HourlyRecord};
use crate::window::select_window;

/// Summarize `records` into one entry per local calendar day in `tz`.
///
/// Statistics cover only the day's own records; `hourly_records` holds the
/// 24 hours starting at the day's first record, taken from the whole series.
/// The result is ascending by `day_timestamp` whatever the input order.
pub fn aggregate_daily<Tz: TimeZone>(records: &[HourlyRecord], tz: &Tz) -> Vec<DailyAggregate> {
    let buckets = bucket_by_day(records, tz);

    let mut days: Vec<DailyAggregate> = buckets
        .iter()
        .filter_map(|bucket| {
            let stats = day_statistics(&bucket.records)?;
            let anchor = bucket.anchor()?;

            Some(DailyAggregate {
                day_timestamp: bucket.midnight,
                average_temperature: stats.average_temperature,
                min_temperature: stats.min_temperature,
                max_temperature: stats.max_temperature,
                average_feels_like: stats.average_feels_like,
                average_humidity: stats.average_humidity,
                max_wind_speed: stats.max_wind_speed,
                modal_wind_direction: stats.modal_wind_direction,
                modal_visibility: stats.modal_visibility,
                description: stats.description,
                icon_code: stats.icon_code,
                average_probability_of_precipitation: stats.average_probability_of_precipitation,
                hourly_records: select_window(records, anchor),
            })
        })
        .collect();

    days.sort_by_key(|d| d.day_timestamp);

    tracing::debug!(
        "Aggregated {} forecast records into {} days",
        records.len(),
        days.len()
    );

    days
}
