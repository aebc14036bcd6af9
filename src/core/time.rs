//! Local-time helpers shared by the report and export paths. Window bounds
//! and trend day starts step in fixed 86_400_000 ms increments from local
//! anchors, matching the stored millisecond timestamps.

use chrono::{DateTime, Local, LocalResult, NaiveDate, TimeZone, Utc};

pub(crate) const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Converts an epoch-millisecond timestamp into local time.
pub(crate) fn to_local(timestamp_ms: i64) -> Option<DateTime<Local>> {
    match Utc.timestamp_millis_opt(timestamp_ms) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Local)),
        _ => None,
    }
}

/// Epoch milliseconds of local midnight on the given date.
pub(crate) fn local_day_start_ms(date: NaiveDate) -> i64 {
    let midnight = date.and_hms_opt(0, 0, 0).unwrap();
    match Local.from_local_datetime(&midnight) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.timestamp_millis(),
        // Midnight skipped by a DST jump; anchor on the UTC reading instead.
        LocalResult::None => Local.from_utc_datetime(&midnight).timestamp_millis(),
    }
}

/// Whether two timestamps fall on the same local calendar day.
pub(crate) fn same_local_day(a_ms: i64, b_ms: i64) -> bool {
    match (to_local(a_ms), to_local(b_ms)) {
        (Some(a), Some(b)) => a.date_naive() == b.date_naive(),
        _ => false,
    }
}

/// Local calendar date key (`YYYY-MM-DD`) for a timestamp.
pub(crate) fn local_date_key(timestamp_ms: i64) -> Option<String> {
    to_local(timestamp_ms).map(|dt| dt.format("%Y-%m-%d").to_string())
}
