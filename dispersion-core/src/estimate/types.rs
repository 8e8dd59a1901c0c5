use crate::error::DispersionError;
use crate::input::TimePoint;
use chrono::TimeDelta;
use serde::Serialize;
use std::fmt;
use std::num::NonZeroU64;

pub const DEFAULT_SAMPLING_RESOLUTION_MS: u64 = 60;
pub const DEFAULT_CONVERGENCE_TOLERANCE: f64 = 0.20;

/// Fewer complete windows than this and a sample is not statistically meaningful.
pub const MIN_SAMPLE_SIZE: usize = 100;

//-----------------------------------------------------------------------------
// Parameters
//-----------------------------------------------------------------------------

/// Width of a sampling window, in whole milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u64")]
pub struct WindowWidth(NonZeroU64);

impl WindowWidth {
    pub fn from_millis(ms: u64) -> Option<Self> {
        NonZeroU64::new(ms).map(Self)
    }

    pub fn as_millis(self) -> u64 {
        self.0.get()
    }

    pub fn as_delta(self) -> Option<TimeDelta> {
        i64::try_from(self.as_millis())
            .ok()
            .and_then(TimeDelta::try_milliseconds)
    }

    /// The next width in the arithmetic progression `R, 2R, 3R, ...`.
    pub fn advance(self, step: WindowWidth) -> Self {
        Self(self.0.saturating_add(step.as_millis()))
    }
}

impl From<WindowWidth> for u64 {
    fn from(width: WindowWidth) -> Self {
        width.as_millis()
    }
}

impl fmt::Display for WindowWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.as_millis())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatorParams {
    sampling_resolution: WindowWidth,
    convergence_tolerance: f64,
}

impl EstimatorParams {
    pub fn new(
        sampling_resolution_ms: u64,
        convergence_tolerance: f64,
    ) -> Result<Self, DispersionError> {
        let sampling_resolution = WindowWidth::from_millis(sampling_resolution_ms).ok_or(
            DispersionError::InvalidParameter("sampling resolution must be a positive integer"),
        )?;

        if !convergence_tolerance.is_finite() || convergence_tolerance <= 0.0 {
            return Err(DispersionError::InvalidParameter(
                "convergence tolerance must be a positive finite number",
            ));
        }

        Ok(Self {
            sampling_resolution,
            convergence_tolerance,
        })
    }

    pub fn sampling_resolution(&self) -> WindowWidth {
        self.sampling_resolution
    }

    pub fn convergence_tolerance(&self) -> f64 {
        self.convergence_tolerance
    }
}

//-----------------------------------------------------------------------------
// Samples
//-----------------------------------------------------------------------------

/// One complete window: requests with `start <= t <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: TimePoint,
    pub end: TimePoint,
    pub count: u64,
}

/// Request counts of consecutive windows of one width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sample {
    counts: Vec<u64>,
}

impl Sample {
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn is_sufficient(&self) -> bool {
        self.len() >= MIN_SAMPLE_SIZE
    }
}

impl From<Vec<u64>> for Sample {
    fn from(counts: Vec<u64>) -> Self {
        Self { counts }
    }
}

impl FromIterator<u64> for Sample {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

//-----------------------------------------------------------------------------
// Results
//-----------------------------------------------------------------------------

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Two successive indices agreed within the tolerance.
    Converged { index: f64, window_ms: u64 },

    /// The sample at `window_ms` had fewer than [`MIN_SAMPLE_SIZE`] windows.
    Insufficient {
        window_ms: u64,
        sample_len: usize,
        last_index: Option<f64>,
    },

    /// The cancel flag was raised before `window_ms` was sampled.
    Cancelled {
        window_ms: u64,
        last_index: Option<f64>,
    },
}

impl Outcome {
    /// The converged index, or `None` for every non-convergent ending.
    pub fn index(&self) -> Option<f64> {
        match self {
            Self::Converged { index, .. } => Some(*index),
            Self::Insufficient { .. } | Self::Cancelled { .. } => None,
        }
    }

    pub fn is_converged(&self) -> bool {
        matches!(self, Self::Converged { .. })
    }

    /// Last index computed before the run stopped, converged or not.
    pub fn last_index(&self) -> Option<f64> {
        match self {
            Self::Converged { index, .. } => Some(*index),
            Self::Insufficient { last_index, .. } | Self::Cancelled { last_index, .. } => {
                *last_index
            }
        }
    }
}

/// One evaluated window width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Iteration {
    pub window_ms: u64,
    pub sample_len: usize,
    /// `None` when the sample was too small to compute an index.
    pub index: Option<f64>,
    /// Change from the previous index; `None` on the first evaluation.
    pub error: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    pub outcome: Outcome,
    pub iterations: Vec<Iteration>,
    pub events: usize,
    pub first_event: Option<TimePoint>,
    pub last_event: Option<TimePoint>,
    /// Milliseconds between the first and last request.
    pub span_ms: Option<i64>,
}

impl Estimate {
    pub fn index(&self) -> Option<f64> {
        self.outcome.index()
    }
}
