use super::uniform;
use crate::cancel::CancelFlag;
use crate::estimate::{
    ConvergenceDriver, DriverState, Evaluation, EstimatorParams, Outcome, Sample, WindowWidth,
    evaluate,
};
use crate::input::TimeSeries;
use pretty_assertions::assert_eq;

fn width(ms: u64) -> WindowWidth {
    WindowWidth::from_millis(ms).unwrap()
}

fn params(resolution_ms: u64, tolerance: f64) -> EstimatorParams {
    EstimatorParams::new(resolution_ms, tolerance).unwrap()
}

/// 100 windows alternating 1 and 3 requests.
fn alternating() -> (Sample, f64) {
    let s: Sample = (0..100).map(|i| if i % 2 == 0 { 1 } else { 3 }).collect();
    (s, (100.0 / 99.0) / 2.0)
}

//-----------------------------------------------------------------------------
// Transition function
//-----------------------------------------------------------------------------

#[test]
fn fewer_than_100_windows_is_insufficient() {
    let s = Sample::from(vec![1; 99]);

    assert_eq!(
        evaluate(&s, width(60), Some(0.8), 0.2).unwrap(),
        Evaluation::Insufficient
    );
    assert_eq!(
        evaluate(&Sample::default(), width(60), None, 0.2).unwrap(),
        Evaluation::Insufficient
    );
}

#[test]
fn first_evaluation_never_converges() {
    let (s, index) = alternating();

    let evaluation = evaluate(&s, width(60), None, 10.0).unwrap();

    assert_eq!(evaluation, Evaluation::Continue { index, error: None });
}

#[test]
fn converges_when_error_within_tolerance() {
    let (s, index) = alternating();

    let evaluation = evaluate(&s, width(60), Some(index), 0.2).unwrap();

    assert_eq!(evaluation, Evaluation::Converged { index, error: 0.0 });
}

#[test]
fn continues_when_error_above_tolerance() {
    let (s, index) = alternating();

    let evaluation = evaluate(&s, width(60), Some(2.0 * index), 0.2).unwrap();

    assert_eq!(
        evaluation,
        Evaluation::Continue {
            index,
            error: Some(0.5)
        }
    );
}

#[test]
fn zero_previous_index_compares_absolute_difference() {
    let (s, index) = alternating();

    // |0 - 0.505| passes a 0.6 tolerance even though the index moved from zero.
    let evaluation = evaluate(&s, width(60), Some(0.0), 0.6).unwrap();

    assert_eq!(evaluation, Evaluation::Converged { index, error: index });
}

//-----------------------------------------------------------------------------
// Driver
//-----------------------------------------------------------------------------

#[test]
fn uniform_arrivals_converge_to_zero_on_second_width() {
    let series = uniform(15_000, 100);

    let estimate = ConvergenceDriver::new(&series, params(100, 0.2)).run().unwrap();

    assert_eq!(
        estimate.outcome,
        Outcome::Converged {
            index: 0.0,
            window_ms: 200
        }
    );
    let widths: Vec<_> = estimate.iterations.iter().map(|i| i.window_ms).collect();
    assert_eq!(widths, vec![100, 200]);
    assert_eq!(estimate.events, 15_000);
}

#[test]
fn small_series_is_insufficient_on_first_width() {
    let series = uniform(50, 100);

    let estimate = ConvergenceDriver::new(&series, params(100, 0.2)).run().unwrap();

    assert_eq!(
        estimate.outcome,
        Outcome::Insufficient {
            window_ms: 100,
            sample_len: 49,
            last_index: None
        }
    );
    assert_eq!(estimate.index(), None);
    assert_eq!(estimate.iterations.len(), 1);
    assert_eq!(estimate.iterations[0].index, None);
}

#[test]
fn empty_series_is_insufficient() {
    let series = TimeSeries::default();

    let estimate = ConvergenceDriver::new(&series, params(60, 0.2)).run().unwrap();

    assert_eq!(
        estimate.outcome,
        Outcome::Insufficient {
            window_ms: 60,
            sample_len: 0,
            last_index: None
        }
    );
    assert_eq!(estimate.first_event, None);
    assert_eq!(estimate.span_ms, None);
}

#[test]
fn insufficient_after_first_width_keeps_last_index() {
    // 149 windows at 100ms, 74 at 200ms.
    let series = uniform(150, 100);

    let estimate = ConvergenceDriver::new(&series, params(100, 0.2)).run().unwrap();

    assert_eq!(
        estimate.outcome,
        Outcome::Insufficient {
            window_ms: 200,
            sample_len: 74,
            last_index: Some(0.0)
        }
    );
    assert_eq!(estimate.outcome.last_index(), Some(0.0));
    assert_eq!(estimate.index(), None);
}

#[test]
fn widths_grow_by_resolution_and_stop_at_first_convergence() {
    // Arrange: one request every 100ms; a 30ms step lands on and off the
    // request grid, so the index bounces before settling at 0.
    let series = uniform(2_000, 100);

    // Act
    let estimate = ConvergenceDriver::new(&series, params(30, 0.05)).run().unwrap();

    // Assert
    assert_eq!(
        estimate.outcome,
        Outcome::Converged {
            index: 0.0,
            window_ms: 180
        }
    );

    let widths: Vec<_> = estimate.iterations.iter().map(|it| it.window_ms).collect();
    assert_eq!(widths, vec![30, 60, 90, 120, 150, 180]);

    let lens: Vec<_> = estimate.iterations.iter().map(|it| it.sample_len).collect();
    assert_eq!(lens, vec![6663, 3331, 2221, 1665, 1332, 1110]);

    let (last, earlier) = estimate.iterations.split_last().unwrap();
    assert_eq!(earlier[0].error, None);
    for it in &earlier[1..] {
        assert!(it.error.unwrap() > 0.05, "{it:?}");
    }
    assert_eq!(last.index, Some(0.0));
    assert_eq!(last.error, Some(0.0));
    assert_eq!(estimate.span_ms, Some(199_900));
}

#[test]
fn cancelled_flag_stops_before_sampling() {
    let series = uniform(15_000, 100);
    let cancel = CancelFlag::new();
    cancel.cancel();

    let estimate = ConvergenceDriver::new(&series, params(100, 0.2))
        .with_cancel(&cancel)
        .run()
        .unwrap();

    assert_eq!(
        estimate.outcome,
        Outcome::Cancelled {
            window_ms: 100,
            last_index: None
        }
    );
    assert!(estimate.iterations.is_empty());
}

#[test]
fn step_walks_sampling_then_evaluating() {
    let series = uniform(15_000, 100);
    let driver = ConvergenceDriver::new(&series, params(100, 0.2));

    let (state, record) = driver.step(driver.initial_state()).unwrap();
    assert!(matches!(state, DriverState::Evaluating { .. }));
    assert_eq!(record, None);

    let (state, record) = driver.step(state).unwrap();
    assert_eq!(
        state,
        DriverState::Sampling {
            width: width(200),
            previous: Some(0.0)
        }
    );
    assert_eq!(record.map(|r| r.sample_len), Some(14_999));
}

#[test]
fn done_state_is_left_unchanged() {
    let series = TimeSeries::default();
    let driver = ConvergenceDriver::new(&series, params(100, 0.2));
    let done = DriverState::Done(Outcome::Converged {
        index: 1.0,
        window_ms: 100,
    });

    let (state, record) = driver.step(done.clone()).unwrap();

    assert!(state.is_terminal());
    assert_eq!(state, done);
    assert_eq!(record, None);
}

#[test]
fn invalid_parameters_are_rejected() {
    assert!(EstimatorParams::new(0, 0.2).is_err());
    assert!(EstimatorParams::new(60, 0.0).is_err());
    assert!(EstimatorParams::new(60, -0.1).is_err());
    assert!(EstimatorParams::new(60, f64::NAN).is_err());
    assert!(EstimatorParams::new(60, f64::INFINITY).is_err());
}
