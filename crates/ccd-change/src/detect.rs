//! The detection driver
//!
//! Alternates initialization and extension from the start of the series,
//! emitting one segment per cycle and restarting at the end of the last
//! segment until the remaining observations cannot form a window.

use crate::extend::{extend, extend_traced};
use crate::initialize::initialize;
use crate::series::TimeSeries;
use crate::types::{Extension, SegmentResult, WindowResult};
use ccd_core::{DetectionParameters, Result};
use ccd_regression::{FittedModel, Fitter};
use tracing::{debug, instrument};

/// Change detector bound to one fitter and one set of parameters
///
/// Holds no per-call state: the same detector may run on any number of
/// series, from any number of threads.
#[derive(Debug, Clone)]
pub struct ChangeDetector<F> {
    fitter: F,
    params: DetectionParameters,
}

impl<F: Fitter> ChangeDetector<F> {
    /// Create a detector, rejecting invalid parameters
    pub fn new(fitter: F, params: DetectionParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self { fitter, params })
    }

    /// Detector with default parameters
    pub fn with_defaults(fitter: F) -> Self {
        Self {
            fitter,
            params: DetectionParameters::default(),
        }
    }

    pub fn fitter(&self) -> &F {
        &self.fitter
    }

    pub fn params(&self) -> &DetectionParameters {
        &self.params
    }

    /// Segments of the series, in chronological order
    pub fn detect(&self, times: &[i64], observations: &[Vec<f64>]) -> Result<Vec<SegmentResult>> {
        run(times, observations, &self.fitter, &self.params, Mode::Segments)
    }

    /// One result per accepted extension step
    ///
    /// A segment whose extension never accepted a step contributes its
    /// initial window instead.
    pub fn detect_windows(
        &self,
        times: &[i64],
        observations: &[Vec<f64>],
    ) -> Result<Vec<SegmentResult>> {
        run(times, observations, &self.fitter, &self.params, Mode::Windows)
    }
}

/// Detect segments with an explicit fitter and parameters
pub fn detect<F: Fitter + ?Sized>(
    times: &[i64],
    observations: &[Vec<f64>],
    fitter: &F,
    params: &DetectionParameters,
) -> Result<Vec<SegmentResult>> {
    params.validate()?;
    run(times, observations, fitter, params, Mode::Segments)
}

/// Windows-only detection with an explicit fitter and parameters
pub fn detect_windows<F: Fitter + ?Sized>(
    times: &[i64],
    observations: &[Vec<f64>],
    fitter: &F,
    params: &DetectionParameters,
) -> Result<Vec<SegmentResult>> {
    params.validate()?;
    run(times, observations, fitter, params, Mode::Windows)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Segments,
    Windows,
}

#[instrument(
    skip_all,
    fields(observations = times.len(), bands = observations.len(), fitter = fitter.name(), mode = ?mode)
)]
fn run<F: Fitter + ?Sized>(
    times: &[i64],
    observations: &[Vec<f64>],
    fitter: &F,
    params: &DetectionParameters,
    mode: Mode,
) -> Result<Vec<SegmentResult>> {
    let series = TimeSeries::new(times, observations, fitter)?;
    let adjusted_rmse = params
        .screen_outliers
        .then(|| ccd_tmask::adjusted_rmse(observations, params.tmask_t_const));

    let mut results = Vec::new();
    let mut start = 0;

    while start + params.window_size <= series.len() {
        let (window, models, errors) =
            match initialize(&series, fitter, start, params, adjusted_rmse.as_deref())? {
                WindowResult::Found {
                    window,
                    models,
                    errors,
                } => (window, models, errors),
                WindowResult::InsufficientData { start } => {
                    debug!(start, "no further stable window");
                    break;
                }
            };

        let extension = match mode {
            Mode::Segments => extend(&series, fitter, window, models, params)?,
            Mode::Windows => extend_traced(&series, fitter, window, models, params)?,
        };

        match mode {
            Mode::Segments => {
                let segment = segment(&series, window.start, &extension, &errors);
                debug!(%segment, "segment emitted");
                results.push(segment);
            }
            Mode::Windows if extension.steps.is_empty() => {
                results.push(segment(&series, window.start, &extension, &errors));
            }
            Mode::Windows => {
                results.extend(extension.steps.iter().map(|step| {
                    build(
                        &series,
                        window.start,
                        step.end,
                        step.models.clone(),
                        &errors,
                        Some(step.magnitudes.clone()),
                    )
                }));
            }
        }

        start = extension.end;
    }

    debug!(segments = results.len(), "detection complete");
    Ok(results)
}

fn segment(
    series: &TimeSeries<'_>,
    start: usize,
    extension: &Extension,
    errors: &[f64],
) -> SegmentResult {
    build(
        series,
        start,
        extension.end,
        extension.models.clone(),
        errors,
        extension.magnitudes.clone(),
    )
}

fn build(
    series: &TimeSeries<'_>,
    start: usize,
    end: usize,
    models: Vec<FittedModel>,
    errors: &[f64],
    magnitudes: Option<Vec<f64>>,
) -> SegmentResult {
    // With a peek of one the end can move past the last observation
    let end = end.min(series.len() - 1);
    SegmentResult {
        start_day: series.day(start),
        end_day: series.day(end),
        start_index: start,
        end_index: end,
        models,
        errors: errors.to_vec(),
        magnitudes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccd_core::Error;
    use ccd_regression::FitterKind;

    #[test]
    fn test_new_rejects_invalid_parameters() {
        let params = DetectionParameters::default().with_peek_size(0);
        let result = ChangeDetector::new(FitterKind::ols(), params);
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_short_series_yields_nothing() {
        let times: Vec<i64> = (0..10).map(|i| 730_120 + 60 * i).collect();
        let observations = vec![vec![1.0; 10]];
        let detector = ChangeDetector::with_defaults(FitterKind::ols());

        assert!(detector.detect(&times, &observations).unwrap().is_empty());
        assert!(detector.detect_windows(&times, &observations).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_series_is_rejected() {
        let times = vec![1, 1, 2];
        let observations = vec![vec![1.0; 3]];
        let result = detect(&times, &observations, &FitterKind::ols(), &DetectionParameters::default());
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_peek_of_one_clamps_end() {
        let times: Vec<i64> = (0..20).map(|i| 730_120 + 30 * i).collect();
        let observations = vec![vec![4.0; 20]];
        let params = DetectionParameters::default().with_peek_size(1);

        let segments = detect(&times, &observations, &FitterKind::ols(), &params).unwrap();

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].start_index, 0);
        assert_eq!(segments[0].end_index, 19);
        assert_eq!(segments[0].end_day, times[19]);
    }
}
