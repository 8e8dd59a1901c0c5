//! Index of Dispersion estimation for load-generator request logs.
//!
//! The pipeline is:
//!
//! log lines
//! input::extract_timestamps
//! TimeSeries (sorted)
//! estimate::ConvergenceDriver (Sampling -> Evaluating -> Done)
//! Estimate
//!
//! [`compute_dispersion_index`] is the plain entry point; [`estimate::estimate`]
//! returns the full outcome with the per-iteration history.

pub mod cancel;
pub mod cli;
pub mod conf;
pub mod error;
pub mod estimate;
pub mod input;
pub mod logging;

pub use cancel::CancelFlag;
pub use error::DispersionError;
pub use estimate::{Estimate, EstimatorParams, Outcome, compute_dispersion_index};
pub use input::{LogSource, TimePoint, TimeSeries};
