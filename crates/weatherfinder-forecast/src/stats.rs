//! Per-day statistics: means, extremes and modal values.

use std::collections::HashMap;
use std::hash::Hash;

use crate::types::HourlyRecord;

/// Statistical fields of one day's summary
#[derive(Debug, Clone, PartialEq)]
pub struct DayStatistics {
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
}

/// Index of the first record carrying the most frequent key.
///
/// Ties go to the key seen first in `records`. One pass builds a table of
/// (first index, count) per key, so the result never depends on map
/// iteration order.
pub fn mode_index<'a, K, F>(records: &[&'a HourlyRecord], key: F) -> Option<usize>
where
    K: Eq + Hash,
    F: Fn(&'a HourlyRecord) -> K,
{
    let mut table: HashMap<K, (usize, usize)> = HashMap::new();
    for (i, record) in records.iter().enumerate() {
        table.entry(key(*record)).or_insert((i, 0)).1 += 1;
    }

    table
        .into_values()
        .max_by(|(first_a, count_a), (first_b, count_b)| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(first, _)| first)
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    sum / n as f64
}

// f64::min/max drop NaN; a malformed reading has to show up in the summary.
fn nan_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() { f64::NAN } else { a.min(b) }
}

fn nan_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() { f64::NAN } else { a.max(b) }
}

/// Compute the statistics for one day's records.
///
/// Returns `None` only for an empty slice, which bucketing never produces.
pub fn day_statistics(records: &[&HourlyRecord]) -> Option<DayStatistics> {
    let first = *records.first()?;

    let min_temperature = records.iter().map(|r| r.temperature).fold(first.temperature, nan_min);
    let max_temperature = records.iter().map(|r| r.temperature).fold(first.temperature, nan_max);

    // Summation error can push the mean a ulp outside the extremes.
    let mut average_temperature = mean(records.iter().map(|r| r.temperature));
    if average_temperature < min_temperature {
        average_temperature = min_temperature;
    } else if average_temperature > max_temperature {
        average_temperature = max_temperature;
    }

    let humidity_sum: i64 = records.iter().map(|r| i64::from(r.humidity)).sum();
    let average_humidity = (humidity_sum as f64 / records.len() as f64) as i32;

    let condition = mode_index(records, |r| r.icon_code.as_str())
        .map_or(first, |i| records[i]);
    let wind = mode_index(records, |r| r.wind_direction).map_or(first, |i| records[i]);
    let visibility = mode_index(records, |r| r.visibility).map_or(first, |i| records[i]);

    Some(DayStatistics {
        average_temperature,
        min_temperature,
        max_temperature,
        average_feels_like: mean(records.iter().map(|r| r.feels_like)),
        average_humidity,
        max_wind_speed: records.iter().map(|r| r.wind_speed).fold(first.wind_speed, nan_max),
        modal_wind_direction: wind.wind_direction,
        modal_visibility: visibility.visibility,
        description: condition.description.clone(),
        icon_code: condition.icon_code.clone(),
        average_probability_of_precipitation: mean(
            records.iter().map(|r| r.probability_of_precipitation),
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordBuilder;

    fn refs(records: &[HourlyRecord]) -> Vec<&HourlyRecord> {
        records.iter().collect()
    }

    #[test]
    fn test_empty_group_has_no_statistics() {
        assert!(day_statistics(&[]).is_none());
    }

    #[test]
    fn test_means_and_extremes() {
        let records = vec![
            RecordBuilder::at(0).temperature(15.0).humidity(60).wind_speed(3.0).build(),
            RecordBuilder::at(3600).temperature(25.0).humidity(80).wind_speed(5.0).build(),
        ];
        let stats = day_statistics(&refs(&records)).unwrap();

        assert_eq!(stats.average_temperature, 20.0);
        assert_eq!(stats.min_temperature, 15.0);
        assert_eq!(stats.max_temperature, 25.0);
        assert_eq!(stats.average_humidity, 70);
        assert_eq!(stats.max_wind_speed, 5.0);
    }

    #[test]
    fn test_extremes_ignore_upstream_bounds() {
        let records = vec![
            RecordBuilder::at(0).temperature(10.0).bounds(-5.0, 30.0).build(),
            RecordBuilder::at(3600).temperature(12.0).bounds(-5.0, 30.0).build(),
        ];
        let stats = day_statistics(&refs(&records)).unwrap();

        assert_eq!(stats.min_temperature, 10.0);
        assert_eq!(stats.max_temperature, 12.0);
    }

    #[test]
    fn test_humidity_mean_truncates() {
        let records = vec![
            RecordBuilder::at(0).humidity(60).build(),
            RecordBuilder::at(1).humidity(61).build(),
        ];
        assert_eq!(day_statistics(&refs(&records)).unwrap().average_humidity, 60);
    }

    #[test]
    fn test_feels_like_and_precipitation_means() {
        let records = vec![
            RecordBuilder::at(0).feels_like(1.0).pop(0.2).build(),
            RecordBuilder::at(1).feels_like(2.0).pop(0.4).build(),
        ];
        let stats = day_statistics(&refs(&records)).unwrap();

        assert_eq!(stats.average_feels_like, 1.5);
        assert!((stats.average_probability_of_precipitation - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_mean_stays_within_extremes() {
        let records = vec![
            RecordBuilder::at(0).temperature(0.1).build(),
            RecordBuilder::at(1).temperature(0.1).build(),
            RecordBuilder::at(2).temperature(0.1).build(),
        ];
        let stats = day_statistics(&refs(&records)).unwrap();

        assert!(stats.min_temperature <= stats.average_temperature);
        assert!(stats.average_temperature <= stats.max_temperature);
    }

    #[test]
    fn test_nan_temperature_propagates() {
        let records = vec![
            RecordBuilder::at(0).temperature(f64::NAN).build(),
            RecordBuilder::at(1).temperature(4.0).build(),
        ];
        let stats = day_statistics(&refs(&records)).unwrap();

        assert!(stats.average_temperature.is_nan());
        assert!(stats.min_temperature.is_nan());
        assert!(stats.max_temperature.is_nan());
    }

    #[test]
    fn test_icon_tie_goes_to_first_seen() {
        let records = vec![
            RecordBuilder::at(0).condition("10d", "light rain").build(),
            RecordBuilder::at(1).condition("01d", "clear sky").build(),
            RecordBuilder::at(2).condition("01d", "clear sky").build(),
            RecordBuilder::at(3).condition("10d", "moderate rain").build(),
        ];
        let stats = day_statistics(&refs(&records)).unwrap();

        assert_eq!(stats.icon_code, "10d");
        // description comes from the first record with the winning icon
        assert_eq!(stats.description, "light rain");
    }

    #[test]
    fn test_icon_majority_wins_over_first_seen() {
        let records = vec![
            RecordBuilder::at(0).condition("10d", "light rain").build(),
            RecordBuilder::at(1).condition("01d", "clear sky").build(),
            RecordBuilder::at(2).condition("01d", "sunny").build(),
        ];
        let stats = day_statistics(&refs(&records)).unwrap();

        assert_eq!(stats.icon_code, "01d");
        assert_eq!(stats.description, "clear sky");
    }

    #[test]
    fn test_modal_wind_and_visibility() {
        let records = vec![
            RecordBuilder::at(0).wind_direction(270).visibility(8000).build(),
            RecordBuilder::at(1).wind_direction(90).visibility(10000).build(),
            RecordBuilder::at(2).wind_direction(90).visibility(8000).build(),
            RecordBuilder::at(3).wind_direction(270).visibility(10000).build(),
            RecordBuilder::at(4).wind_direction(90).visibility(6000).build(),
        ];
        let stats = day_statistics(&refs(&records)).unwrap();

        assert_eq!(stats.modal_wind_direction, 90);
        // 8000 and 10000 tie; 8000 was seen first
        assert_eq!(stats.modal_visibility, 8000);
    }

    #[test]
    fn test_mode_index_empty() {
        assert_eq!(mode_index(&[], |r| r.visibility), None);
    }

    #[test]
    fn test_single_record_day() {
        let records = vec![RecordBuilder::at(0).temperature(-3.5).build()];
        let stats = day_statistics(&refs(&records)).unwrap();

        assert_eq!(stats.average_temperature, -3.5);
        assert_eq!(stats.min_temperature, -3.5);
        assert_eq!(stats.max_temperature, -3.5);
    }
}
