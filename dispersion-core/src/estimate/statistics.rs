use crate::error::DispersionError;
use crate::estimate::types::{Sample, WindowWidth};

pub fn mean(counts: &[u64]) -> Option<f64> {
    if counts.is_empty() {
        return None;
    }
    let total: u64 = counts.iter().sum();
    Some(total as f64 / counts.len() as f64)
}

/// Sample variance (`n - 1` denominator). Needs at least two counts.
pub fn variance(counts: &[u64]) -> Option<f64> {
    if counts.len() < 2 {
        return None;
    }
    let m = mean(counts)?;
    let squares: f64 = counts
        .iter()
        .map(|&c| {
            let d = c as f64 - m;
            d * d
        })
        .sum();
    Some(squares / (counts.len() - 1) as f64)
}

/// Variance-to-mean ratio of the counts in `sample`.
pub fn dispersion_index(sample: &Sample, width: WindowWidth) -> Result<f64, DispersionError> {
    let counts = sample.counts();
    match (mean(counts), variance(counts)) {
        (Some(m), Some(v)) => ratio(m, v, width),
        _ => Err(DispersionError::InvalidParameter(
            "dispersion index needs at least two windows",
        )),
    }
}

/// `variance / mean`, with an all-zero sample counted as perfectly regular.
pub fn ratio(mean: f64, variance: f64, width: WindowWidth) -> Result<f64, DispersionError> {
    if mean == 0.0 {
        if variance == 0.0 {
            return Ok(0.0);
        }
        return Err(DispersionError::DegenerateStatistic {
            window_ms: width.as_millis(),
            variance,
        });
    }
    Ok(variance / mean)
}

/// Change between two successive indices.
///
/// Relative to `previous`, except when `previous` is exactly zero, where the
/// absolute difference is used instead.
pub fn convergence_error(previous: f64, current: f64) -> f64 {
    if previous != 0.0 {
        (1.0 - current / previous).abs()
    } else {
        (previous - current).abs()
    }
}
