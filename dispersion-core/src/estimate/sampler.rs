use crate::estimate::types::{Sample, Window, WindowWidth};
use crate::input::{TimePoint, TimeSeries};
use chrono::TimeDelta;
use std::iter::FusedIterator;

/// Consecutive, non-overlapping windows of one width over a sorted series.
///
/// The first window starts at the first request; each following window starts
/// where the previous one ended. A window whose end falls after the last
/// request is never produced, since the log may not cover all of it.
#[derive(Debug, Clone)]
pub struct Windows<'a> {
    points: &'a [TimePoint],
    width: Option<TimeDelta>,
    start: Option<TimePoint>,
    // Lower bound of the previous window; every later search starts here.
    lo: usize,
}

impl<'a> Windows<'a> {
    pub fn new(series: &'a TimeSeries, width: WindowWidth) -> Self {
        Self {
            points: series.as_slice(),
            width: width.as_delta(),
            start: series.first(),
            lo: 0,
        }
    }
}

impl Iterator for Windows<'_> {
    type Item = Window;

    fn next(&mut self) -> Option<Window> {
        let start = self.start?;
        let last = *self.points.last()?;

        let end = match self.width.and_then(|w| start.checked_add_signed(w)) {
            Some(end) if end <= last => end,
            _ => {
                self.start = None;
                return None;
            }
        };

        let first = self.lo + self.points[self.lo..].partition_point(|t| *t < start);
        let past = first + self.points[first..].partition_point(|t| *t <= end);

        self.lo = first;
        self.start = Some(end);

        Some(Window {
            start,
            end,
            count: (past - first) as u64,
        })
    }
}

impl FusedIterator for Windows<'_> {}

pub fn windows(series: &TimeSeries, width: WindowWidth) -> Windows<'_> {
    Windows::new(series, width)
}

/// Request counts for every complete window of `width`.
pub fn sample(series: &TimeSeries, width: WindowWidth) -> Sample {
    windows(series, width).map(|w| w.count).collect()
}
