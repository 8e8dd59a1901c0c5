//! Index of Dispersion estimation.
//!
//! Requests are counted in consecutive windows of width `R`, `2R`, `3R`, ...
//! For every width the variance-to-mean ratio of the counts is computed, and
//! the run stops as soon as two successive ratios agree within the tolerance.
//! If the number of complete windows drops below [`MIN_SAMPLE_SIZE`] first,
//! the run ends without a result.
//!
//! A Poisson arrival process has an index of 1. Regular arrivals score below
//! 1 and bursty arrivals above it.

mod driver;
mod sampler;
mod statistics;
mod types;

#[cfg(test)]
mod tests;

pub use driver::{ConvergenceDriver, DriverState, Evaluation, evaluate};
pub use sampler::{Windows, sample, windows};
pub use statistics::{convergence_error, dispersion_index, mean, ratio, variance};
pub use types::{
    DEFAULT_CONVERGENCE_TOLERANCE, DEFAULT_SAMPLING_RESOLUTION_MS, Estimate, EstimatorParams,
    Iteration, MIN_SAMPLE_SIZE, Outcome, Sample, Window, WindowWidth,
};

use crate::cancel::CancelFlag;
use crate::error::DispersionError;
use crate::input::LogSource;
use std::io::BufRead;
use std::path::Path;

/// Reads `source` to the end and runs the estimation over its timestamps.
pub fn estimate(
    params: EstimatorParams,
    source: LogSource<'_>,
    cancel: Option<&CancelFlag>,
) -> Result<Estimate, DispersionError> {
    let series = source.read_series()?;

    let driver = ConvergenceDriver::new(&series, params);
    match cancel {
        Some(flag) => driver.with_cancel(flag).run(),
        None => driver.run(),
    }
}

/// Index of dispersion of the request timestamps in a log.
///
/// Exactly one of `log_file_path` and `stream` must be given. Returns
/// `Ok(None)` when the sample became too small before convergence.
pub fn compute_dispersion_index<'a>(
    sampling_resolution_ms: u64,
    convergence_tolerance: f64,
    log_file_path: Option<&Path>,
    stream: Option<Box<dyn BufRead + 'a>>,
) -> Result<Option<f64>, DispersionError> {
    let params = EstimatorParams::new(sampling_resolution_ms, convergence_tolerance)?;
    let source = LogSource::from_parts(log_file_path.map(Path::to_path_buf), stream)?;

    Ok(estimate(params, source, None)?.index())
}
