//! Forward extension of a stable window

use crate::series::TimeSeries;
use crate::statistics::accurate;
use crate::types::{Extension, ExtensionStep, Window};
use ccd_core::{DetectionParameters, Result};
use ccd_regression::{FittedModel, Fitter};
use tracing::{debug, trace};

/// Grow `window` one observation at a time until a change is detected
///
/// Each step tests the current models over the cumulative window
/// `[start, end + peek_size)`. An accurate step refits every band over that
/// window and advances the end by one; the first inaccurate step stops the
/// extension and its magnitudes are reported. When fewer than `peek_size`
/// observations remain beyond the window, nothing is attempted and the
/// magnitudes are absent.
pub fn extend<F: Fitter + ?Sized>(
    series: &TimeSeries<'_>,
    fitter: &F,
    window: Window,
    models: Vec<FittedModel>,
    params: &DetectionParameters,
) -> Result<Extension> {
    run(series, fitter, window, models, params, false)
}

/// Like [`extend`], also recording every accepted step
pub fn extend_traced<F: Fitter + ?Sized>(
    series: &TimeSeries<'_>,
    fitter: &F,
    window: Window,
    models: Vec<FittedModel>,
    params: &DetectionParameters,
) -> Result<Extension> {
    run(series, fitter, window, models, params, true)
}

fn run<F: Fitter + ?Sized>(
    series: &TimeSeries<'_>,
    fitter: &F,
    window: Window,
    models: Vec<FittedModel>,
    params: &DetectionParameters,
    record: bool,
) -> Result<Extension> {
    let peek = params.peek_size;
    let mut end = window.end;
    let mut models = models;
    let mut magnitudes = None;
    let mut steps = Vec::new();

    if end + peek > series.len() {
        trace!(end, peek, len = series.len(), "no room to extend");
    }

    while end + peek <= series.len() {
        let cumulative = Window::new(window.start, end).widened(peek);
        let tested = series.magnitudes(&models, cumulative)?;

        if !accurate(&tested, params.accuracy_threshold) {
            debug!(window = %cumulative, magnitudes = ?tested, "change detected");
            magnitudes = Some(tested);
            break;
        }

        models = series.fit(fitter, cumulative)?;
        end += 1;
        trace!(window = %cumulative, end, "extended and refitted");
        if record {
            steps.push(ExtensionStep {
                window: cumulative,
                end,
                models: models.clone(),
                magnitudes: tested.clone(),
            });
        }
        magnitudes = Some(tested);
    }

    Ok(Extension {
        end,
        models,
        magnitudes,
        steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccd_regression::FitterKind;

    fn monthly(count: i64) -> Vec<i64> {
        (0..count).map(|i| 730_120 + 30 * i).collect()
    }

    #[test]
    fn test_no_room_leaves_magnitudes_absent() {
        let times = monthly(17);
        let observations = vec![vec![3.0; 17]];
        let fitter = FitterKind::ols();
        let series = TimeSeries::new(&times, &observations, &fitter).unwrap();
        let window = Window::new(0, 15);
        let models = series.fit(&fitter, window).unwrap();

        let extension = extend(&series, &fitter, window, models.clone(), &DetectionParameters::default())
            .unwrap();

        assert_eq!(extension.end, 15);
        assert_eq!(extension.models, models);
        assert!(extension.magnitudes.is_none());
        assert!(!extension.attempted());
    }

    #[test]
    fn test_extends_to_end_of_stable_series() {
        let times = monthly(30);
        let observations = vec![vec![3.0; 30]];
        let fitter = FitterKind::ols();
        let series = TimeSeries::new(&times, &observations, &fitter).unwrap();
        let window = Window::new(0, 15);
        let models = series.fit(&fitter, window).unwrap();
        let params = DetectionParameters::default();

        let extension = extend_traced(&series, &fitter, window, models, &params).unwrap();

        // Steps run while end + peek fits: end 15 through 27
        assert_eq!(extension.end, 28);
        assert_eq!(extension.steps.len(), 13);
        assert_eq!(extension.steps[0].window, Window::new(0, 18));
        assert_eq!(extension.steps[0].end, 16);
        assert!(extension.magnitudes.is_some());
        // Ran out of data without a change, yet steps were evaluated
        assert!(extension.attempted());
    }

    #[test]
    fn test_stops_on_jump_without_refit() {
        let times = monthly(30);
        let mut band = vec![3.0; 30];
        for value in band.iter_mut().skip(20) {
            *value += 50.0;
        }
        let observations = vec![band];
        let fitter = FitterKind::ols();
        let series = TimeSeries::new(&times, &observations, &fitter).unwrap();
        let window = Window::new(0, 15);
        let models = series.fit(&fitter, window).unwrap();
        let params = DetectionParameters::default();

        let extension = extend_traced(&series, &fitter, window, models, &params).unwrap();

        // The jump at 20 enters the peek once end reaches 18
        assert_eq!(extension.end, 18);
        assert_eq!(extension.steps.len(), 3);
        let magnitudes = extension.magnitudes.unwrap();
        assert!(magnitudes[0] > params.accuracy_threshold);
        // Plain extension records nothing
        let plain = extend(&series, &fitter, window, extension.steps[0].models.clone(), &params)
            .unwrap();
        assert!(plain.steps.is_empty());
    }
}
