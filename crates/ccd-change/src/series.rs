//! A validated multi-band series with its design matrix

use crate::statistics;
use crate::types::Window;
use ccd_core::utils::strictly_increasing;
use ccd_core::{Error, Result};
use ccd_regression::{DMatrix, FittedModel, Fitter};

/// Times and band-major observations sharing one time axis
///
/// The fitter's design matrix is built once for the whole series; windows
/// take row ranges of it instead of rebuilding.
#[derive(Debug, Clone)]
pub struct TimeSeries<'a> {
    times: &'a [i64],
    observations: &'a [Vec<f64>],
    design: DMatrix<f64>,
}

impl<'a> TimeSeries<'a> {
    /// Validate the inputs and build the design for `fitter`
    pub fn new<F: Fitter + ?Sized>(
        times: &'a [i64],
        observations: &'a [Vec<f64>],
        fitter: &F,
    ) -> Result<Self> {
        if observations.is_empty() {
            return Err(Error::InvalidInput(
                "at least one band is required".to_string(),
            ));
        }
        if !strictly_increasing(times) {
            return Err(Error::InvalidInput(
                "times must be strictly increasing".to_string(),
            ));
        }
        for (index, band) in observations.iter().enumerate() {
            if band.len() != times.len() {
                return Err(Error::size_mismatch(
                    times.len(),
                    band.len(),
                    &format!("band {index}"),
                ));
            }
            if band.iter().any(|v| !v.is_finite()) {
                return Err(Error::non_finite(&format!("band {index}")));
            }
        }

        Ok(Self {
            times,
            observations,
            design: fitter.design_matrix(times),
        })
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn band_count(&self) -> usize {
        self.observations.len()
    }

    pub fn times(&self) -> &'a [i64] {
        self.times
    }

    pub fn observations(&self) -> &'a [Vec<f64>] {
        self.observations
    }

    /// Ordinal day at `index`
    pub fn day(&self, index: usize) -> i64 {
        self.times[index]
    }

    /// Days between the first and last observation of the window
    pub fn span(&self, window: Window) -> i64 {
        if window.is_empty() {
            return 0;
        }
        self.times[window.end - 1] - self.times[window.start]
    }

    /// Design rows of the window
    pub fn design(&self, window: Window) -> DMatrix<f64> {
        self.design.rows(window.start, window.len()).into_owned()
    }

    /// Every band's values within the window
    pub fn spectra(&self, window: Window) -> Vec<&'a [f64]> {
        self.observations
            .iter()
            .map(|band| &band[window.start..window.end])
            .collect()
    }

    /// Times and band-major values of the window, copied out
    pub fn slice(&self, window: Window) -> (Vec<i64>, Vec<Vec<f64>>) {
        let times = self.times[window.start..window.end].to_vec();
        let observations = self
            .spectra(window)
            .into_iter()
            .map(|band| band.to_vec())
            .collect();
        (times, observations)
    }

    /// Fit one model per band over the window
    pub fn fit<F: Fitter + ?Sized>(&self, fitter: &F, window: Window) -> Result<Vec<FittedModel>> {
        let design = self.design(window);
        self.spectra(window)
            .into_iter()
            .map(|values| fitter.fit_design(&design, values).map_err(Error::from))
            .collect()
    }

    /// Per-band RMSE of `models` over the window
    pub fn rmse(&self, models: &[FittedModel], window: Window) -> Result<Vec<f64>> {
        statistics::rmse(models, &self.design(window), &self.spectra(window))
    }

    /// Per-band change magnitudes of `models` over the window
    pub fn magnitudes(&self, models: &[FittedModel], window: Window) -> Result<Vec<f64>> {
        statistics::magnitudes(models, &self.design(window), &self.spectra(window))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccd_regression::FitterKind;

    fn days(count: i64) -> Vec<i64> {
        (0..count).map(|i| 730_120 + 30 * i).collect()
    }

    #[test]
    fn test_rejects_invalid_series() {
        let fitter = FitterKind::ols();
        let times = days(4);

        let result = TimeSeries::new(&times, &[], &fitter);
        assert!(matches!(result, Err(Error::InvalidInput(_))));

        let observations = vec![vec![1.0; 4], vec![1.0; 3]];
        let result = TimeSeries::new(&times, &observations, &fitter);
        assert!(matches!(result, Err(Error::DimensionMismatch { .. })));

        let unordered = vec![3, 2, 1, 4];
        let observations = vec![vec![1.0; 4]];
        let result = TimeSeries::new(&unordered, &observations, &fitter);
        assert!(matches!(result, Err(Error::InvalidInput(_))));

        let observations = vec![vec![1.0, f64::NAN, 1.0, 1.0]];
        let result = TimeSeries::new(&times, &observations, &fitter);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_window_views() {
        let fitter = FitterKind::ols();
        let times = days(10);
        let observations = vec![(0..10).map(f64::from).collect::<Vec<_>>(), vec![2.0; 10]];
        let series = TimeSeries::new(&times, &observations, &fitter).unwrap();
        let window = Window::new(2, 6);

        assert_eq!(series.len(), 10);
        assert_eq!(series.band_count(), 2);
        assert_eq!(series.span(window), 90);
        assert_eq!(series.design(window).shape(), (4, 3));
        assert_eq!(series.design(window)[(0, 0)], 730_180.0);
        assert_eq!(series.spectra(window)[0], &[2.0, 3.0, 4.0, 5.0]);

        let (slice_times, slice_values) = series.slice(window);
        assert_eq!(slice_times, &times[2..6]);
        assert_eq!(slice_values[1], vec![2.0; 4]);
    }
}
