mod driver_tests;

use crate::input::{TimePoint, TimeSeries};
use chrono::{NaiveDate, TimeDelta};

fn origin() -> TimePoint {
    NaiveDate::from_ymd_opt(2024, 3, 9)
        .unwrap()
        .and_hms_milli_opt(12, 0, 0, 0)
        .unwrap()
}

/// Series with a point at each of the given millisecond offsets.
fn series_at(offsets_ms: &[i64]) -> TimeSeries {
    offsets_ms
        .iter()
        .map(|&ms| origin() + TimeDelta::milliseconds(ms))
        .collect()
}

/// `count` points spaced `step_ms` apart.
fn uniform(count: i64, step_ms: i64) -> TimeSeries {
    (0..count)
        .map(|i| origin() + TimeDelta::milliseconds(i * step_ms))
        .collect()
}
