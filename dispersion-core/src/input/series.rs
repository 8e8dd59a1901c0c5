use chrono::{NaiveDateTime, TimeDelta};

/// A request timestamp with millisecond precision.
pub type TimePoint = NaiveDateTime;

/// Request timestamps sorted ascending.
///
/// There is no way to mutate the points once the series is built, so every
/// sampling pass sees the same ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeSeries {
    points: Vec<TimePoint>,
}

impl TimeSeries {
    pub fn from_unsorted(mut points: Vec<TimePoint>) -> Self {
        points.sort_unstable();
        Self { points }
    }

    pub fn as_slice(&self) -> &[TimePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<TimePoint> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<TimePoint> {
        self.points.last().copied()
    }

    /// Time between the first and last request.
    pub fn span(&self) -> Option<TimeDelta> {
        Some(self.last()? - self.first()?)
    }
}

impl FromIterator<TimePoint> for TimeSeries {
    fn from_iter<I: IntoIterator<Item = TimePoint>>(iter: I) -> Self {
        Self::from_unsorted(iter.into_iter().collect())
    }
}
