//! Calendar-day bucketing of forecast records.
//!
//! The time zone is always passed in; nothing here reads the host zone.

use std::collections::HashMap;

use chrono::{DateTime, LocalResult, NaiveDate, NaiveTime, Offset, TimeDelta, TimeZone};

use crate::types::HourlyRecord;

// DST transitions land on quarter-hour boundaries in every tzdb zone
const GAP_STEP_MINUTES: i64 = 15;

/// Records that fall on one local calendar date
#[derive(Debug, Clone)]
pub struct DayBucket<'a> {
    /// Local calendar date shared by every record in the bucket
    pub date: NaiveDate,
    /// Epoch seconds at local midnight of `date`
    pub midnight: i64,
    /// Members in input order (never empty)
    pub records: Vec<&'a HourlyRecord>,
}

impl DayBucket<'_> {
    /// Earliest timestamp in the bucket; origin of the day's detail window
    pub fn anchor(&self) -> Option<i64> {
        self.records.iter().map(|r| r.timestamp).min()
    }
}

/// Local calendar date of an epoch timestamp, or `None` if chrono cannot
/// represent it in `tz`.
pub fn local_date<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> Option<NaiveDate> {
    // DateTime::with_timezone panics when the UTC instant is in range but
    // the local wall time is not, so apply the offset by hand.
    let utc = DateTime::from_timestamp(timestamp, 0)?.naive_utc();
    let offset = tz.offset_from_utc_datetime(&utc).fix();
    utc.checked_add_signed(TimeDelta::seconds(offset.local_minus_utc().into()))
        .map(|local| local.date())
}

/// Epoch seconds of local midnight on `date`.
///
/// Ambiguous midnights resolve to the earlier instant. A midnight skipped by a
/// DST transition resolves to the first wall-clock time of the date that
/// exists, i.e. the end of the gap.
pub fn midnight_timestamp<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> i64 {
    let midnight = date.and_time(NaiveTime::MIN);
    let mut wall = midnight;
    while wall.date() == date {
        match tz.from_local_datetime(&wall) {
            LocalResult::Single(dt) => return dt.timestamp(),
            LocalResult::Ambiguous(earliest, _) => return earliest.timestamp(),
            LocalResult::None => wall += TimeDelta::minutes(GAP_STEP_MINUTES),
        }
    }

    // No valid wall time on this date at all; read midnight with the offset
    // in force at that UTC instant.
    let offset = tz.offset_from_utc_datetime(&midnight).fix();
    midnight.and_utc().timestamp() - i64::from(offset.local_minus_utc())
}

/// Partition `records` into calendar days in `tz`.
///
/// Buckets come back in the order their date was first seen; members keep
/// input order. Records outside chrono's representable range are skipped.
pub fn bucket_by_day<'a, Tz: TimeZone>(records: &'a [HourlyRecord], tz: &Tz) -> Vec<DayBucket<'a>> {
    let mut buckets: Vec<DayBucket<'a>> = Vec::new();
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();

    for record in records {
        let Some(date) = local_date(record.timestamp, tz) else {
            tracing::warn!(
                "Skipping forecast record with unrepresentable timestamp {}",
                record.timestamp
            );
            continue;
        };

        match index.get(&date).copied() {
            Some(i) => buckets[i].records.push(record),
            None => {
                index.insert(date, buckets.len());
                buckets.push(DayBucket {
                    date,
                    midnight: midnight_timestamp(date, tz),
                    records: vec![record],
                });
            }
        }
    }

    buckets
}
