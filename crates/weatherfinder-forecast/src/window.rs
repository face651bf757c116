//! Rolling 24-hour detail window.

use crate::types::{HourlyRecord, WINDOW_SECONDS};

/// Records with `anchor <= timestamp < anchor + 24h`, ascending by timestamp.
///
/// Selects from the whole series, not one day's bucket, so a window anchored
/// after local midnight runs into the next day and shares records with it.
pub fn select_window(records: &[HourlyRecord], anchor: i64) -> Vec<HourlyRecord> {
    let end = anchor.saturating_add(WINDOW_SECONDS);
    let mut window: Vec<HourlyRecord> = records
        .iter()
        .filter(|r| r.timestamp >= anchor && r.timestamp < end)
        .cloned()
        .collect();
    window.sort_by_key(|r| r.timestamp);
    window
}
