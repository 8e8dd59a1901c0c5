use crate::cancel::CancelFlag;
use crate::error::DispersionError;
use crate::estimate::sampler::sample;
use crate::estimate::statistics::{convergence_error, dispersion_index};
use crate::estimate::types::{
    Estimate, EstimatorParams, Iteration, MIN_SAMPLE_SIZE, Outcome, Sample, WindowWidth,
};
use crate::input::TimeSeries;
use tracing::{debug, info, warn};

/// States of one estimation run.
///
/// Sampling -> Evaluating -> (Sampling | Done)
#[derive(Debug, Clone, PartialEq)]
pub enum DriverState {
    Sampling {
        width: WindowWidth,
        previous: Option<f64>,
    },
    Evaluating {
        width: WindowWidth,
        previous: Option<f64>,
        sample: Sample,
    },
    Done(Outcome),
}

impl DriverState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done(_))
    }
}

/// Verdict on one sample, given the index of the previous width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluation {
    Insufficient,
    Continue { index: f64, error: Option<f64> },
    Converged { index: f64, error: f64 },
}

/// The transition out of `Evaluating`, free of any driver state.
pub fn evaluate(
    sample: &Sample,
    width: WindowWidth,
    previous: Option<f64>,
    tolerance: f64,
) -> Result<Evaluation, DispersionError> {
    if !sample.is_sufficient() {
        return Ok(Evaluation::Insufficient);
    }

    let index = dispersion_index(sample, width)?;

    let Some(previous) = previous else {
        return Ok(Evaluation::Continue { index, error: None });
    };

    let error = convergence_error(previous, index);
    if error <= tolerance {
        Ok(Evaluation::Converged { index, error })
    } else {
        Ok(Evaluation::Continue {
            index,
            error: Some(error),
        })
    }
}

pub struct ConvergenceDriver<'a> {
    series: &'a TimeSeries,
    params: EstimatorParams,
    cancel: Option<&'a CancelFlag>,
}

impl<'a> ConvergenceDriver<'a> {
    pub fn new(series: &'a TimeSeries, params: EstimatorParams) -> Self {
        Self {
            series,
            params,
            cancel: None,
        }
    }

    pub fn with_cancel(mut self, cancel: &'a CancelFlag) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn initial_state(&self) -> DriverState {
        DriverState::Sampling {
            width: self.params.sampling_resolution(),
            previous: None,
        }
    }

    /// Advances one state. Leaving `Evaluating` also yields the record of
    /// that width; `Done` is returned unchanged.
    pub fn step(
        &self,
        state: DriverState,
    ) -> Result<(DriverState, Option<Iteration>), DispersionError> {
        match state {
            DriverState::Sampling { width, previous } => {
                if self.cancel.is_some_and(CancelFlag::is_cancelled) {
                    warn!(window_ms = width.as_millis(), "estimation cancelled");
                    let outcome = Outcome::Cancelled {
                        window_ms: width.as_millis(),
                        last_index: previous,
                    };
                    return Ok((DriverState::Done(outcome), None));
                }

                let sample = sample(self.series, width);
                debug!(
                    window_ms = width.as_millis(),
                    windows = sample.len(),
                    "sampled window counts"
                );

                Ok((
                    DriverState::Evaluating {
                        width,
                        previous,
                        sample,
                    },
                    None,
                ))
            }

            DriverState::Evaluating {
                width,
                previous,
                sample,
            } => {
                let evaluation = evaluate(
                    &sample,
                    width,
                    previous,
                    self.params.convergence_tolerance(),
                )?;
                let iteration = record(width, &sample, &evaluation);
                Ok((self.transition(width, previous, &sample, evaluation), Some(iteration)))
            }

            done @ DriverState::Done(_) => Ok((done, None)),
        }
    }

    fn transition(
        &self,
        width: WindowWidth,
        previous: Option<f64>,
        sample: &Sample,
        evaluation: Evaluation,
    ) -> DriverState {
        let window_ms = width.as_millis();

        match evaluation {
            Evaluation::Insufficient => {
                warn!(
                    window_ms,
                    windows = sample.len(),
                    min_windows = MIN_SAMPLE_SIZE,
                    last_index = ?previous,
                    "sample too small, exiting without converging"
                );
                DriverState::Done(Outcome::Insufficient {
                    window_ms,
                    sample_len: sample.len(),
                    last_index: previous,
                })
            }
            Evaluation::Converged { index, error } => {
                info!(window_ms, error, index, "converged to dispersion index");
                DriverState::Done(Outcome::Converged { index, window_ms })
            }
            Evaluation::Continue { index, error } => {
                match error {
                    Some(error) => info!(window_ms, error, index, "relative error above tolerance"),
                    None => info!(window_ms, index, "first dispersion index"),
                }
                DriverState::Sampling {
                    width: width.advance(self.params.sampling_resolution()),
                    previous: Some(index),
                }
            }
        }
    }

    /// Drives the state machine until it reaches `Done`.
    pub fn run(&self) -> Result<Estimate, DispersionError> {
        let span_ms = self.series.span().map(|d| d.num_milliseconds());

        info!(
            events = self.series.len(),
            span_ms = ?span_ms,
            sampling_resolution_ms = self.params.sampling_resolution().as_millis(),
            tolerance = self.params.convergence_tolerance(),
            "estimating index of dispersion"
        );

        let mut state = self.initial_state();
        let mut iterations = Vec::new();

        let outcome = loop {
            if let DriverState::Done(outcome) = state {
                break outcome;
            }
            let (next, iteration) = self.step(state)?;
            iterations.extend(iteration);
            state = next;
        };

        Ok(Estimate {
            outcome,
            iterations,
            events: self.series.len(),
            first_event: self.series.first(),
            last_event: self.series.last(),
            span_ms,
        })
    }
}

fn record(width: WindowWidth, sample: &Sample, evaluation: &Evaluation) -> Iteration {
    let (index, error) = match *evaluation {
        Evaluation::Insufficient => (None, None),
        Evaluation::Continue { index, error } => (Some(index), error),
        Evaluation::Converged { index, error } => (Some(index), Some(error)),
    };

    Iteration {
        window_ms: width.as_millis(),
        sample_len: sample.len(),
        index,
        error,
    }
}
