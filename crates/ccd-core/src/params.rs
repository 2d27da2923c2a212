//! Parameters for change detection
//!
//! Every detection call receives its parameters explicitly, so callers
//! running different configurations side by side never interfere.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default minimum expected observation window
pub const DEFAULT_WINDOW_SIZE: usize = 16;

/// Default number of observations looked ahead when testing for change
pub const DEFAULT_PEEK_SIZE: usize = 3;

/// Default minimum time span of an initial window, in days
pub const DEFAULT_MIN_SPAN_DAYS: i64 = 365;

/// Default RMSE ceiling for a stable initial window
pub const DEFAULT_STABILITY_THRESHOLD: f64 = 2.0;

/// Default residual magnitude ceiling for an accurate extension
pub const DEFAULT_ACCURACY_THRESHOLD: f64 = 0.99;

/// Multiplier turning a band's median absolute value into its adjusted RMSE
pub const DEFAULT_T_CONST: f64 = 4.89;

/// Default bands screened by the outlier mask (green and SWIR1)
pub const DEFAULT_TMASK_BANDS: [usize; 2] = [1, 4];

/// Parameters for the detection driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionParameters {
    /// Minimum number of observations in an initial window
    pub window_size: usize,

    /// Observations looked ahead beyond the window end before extending
    pub peek_size: usize,

    /// Minimum time span of an initial window, in days
    pub min_span_days: i64,

    /// Every band's RMSE must be strictly below this for a stable window
    pub stability_threshold: f64,

    /// Every band's magnitude must be strictly below this for an accurate extension
    pub accuracy_threshold: f64,

    /// Run the outlier mask on each candidate initial window
    pub screen_outliers: bool,

    /// Band indices examined by the outlier mask
    pub tmask_bands: Vec<usize>,

    /// Multiplier for the adjusted RMSE used by the outlier mask
    pub tmask_t_const: f64,
}

impl Default for DetectionParameters {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            peek_size: DEFAULT_PEEK_SIZE,
            min_span_days: DEFAULT_MIN_SPAN_DAYS,
            stability_threshold: DEFAULT_STABILITY_THRESHOLD,
            accuracy_threshold: DEFAULT_ACCURACY_THRESHOLD,
            screen_outliers: false,
            tmask_bands: DEFAULT_TMASK_BANDS.to_vec(),
            tmask_t_const: DEFAULT_T_CONST,
        }
    }
}

impl DetectionParameters {
    /// Parameters that demand tighter fits before accepting a window
    pub fn strict() -> Self {
        Self {
            stability_threshold: 1.0,
            accuracy_threshold: 0.5,
            screen_outliers: true,
            ..Self::default()
        }
    }

    /// Parameters that tolerate noisier series
    pub fn relaxed() -> Self {
        Self {
            window_size: 12,
            stability_threshold: 4.0,
            accuracy_threshold: 2.0,
            ..Self::default()
        }
    }

    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn with_peek_size(mut self, peek_size: usize) -> Self {
        self.peek_size = peek_size;
        self
    }

    pub fn with_min_span_days(mut self, min_span_days: i64) -> Self {
        self.min_span_days = min_span_days;
        self
    }

    pub fn with_stability_threshold(mut self, threshold: f64) -> Self {
        self.stability_threshold = threshold;
        self
    }

    pub fn with_accuracy_threshold(mut self, threshold: f64) -> Self {
        self.accuracy_threshold = threshold;
        self
    }

    /// Enable or disable the per-window outlier screen
    pub fn with_outlier_screen(mut self, enabled: bool) -> Self {
        self.screen_outliers = enabled;
        self
    }

    pub fn with_tmask_bands(mut self, bands: Vec<usize>) -> Self {
        self.tmask_bands = bands;
        self
    }

    /// Check that the parameters describe a usable detection run
    ///
    /// A window needs at least two observations, otherwise the driver
    /// cannot advance past a segment.
    pub fn validate(&self) -> Result<()> {
        if self.window_size < 2 {
            return Err(Error::InvalidParameter(format!(
                "window_size must be at least 2, got {}",
                self.window_size
            )));
        }
        if self.peek_size == 0 {
            return Err(Error::InvalidParameter(
                "peek_size must be positive".to_string(),
            ));
        }
        if self.min_span_days < 0 {
            return Err(Error::InvalidParameter(format!(
                "min_span_days must not be negative, got {}",
                self.min_span_days
            )));
        }
        if !(self.stability_threshold > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "stability_threshold must be positive, got {}",
                self.stability_threshold
            )));
        }
        if !(self.accuracy_threshold > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "accuracy_threshold must be positive, got {}",
                self.accuracy_threshold
            )));
        }
        if self.screen_outliers && !(self.tmask_t_const > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "tmask_t_const must be positive, got {}",
                self.tmask_t_const
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_values() {
        let params = DetectionParameters::default();
        assert_eq!(params.window_size, 16);
        assert_eq!(params.peek_size, 3);
        assert_eq!(params.min_span_days, 365);
        assert_eq!(params.stability_threshold, 2.0);
        assert_eq!(params.accuracy_threshold, 0.99);
        assert_eq!(params.tmask_bands, vec![1, 4]);
        assert!(!params.screen_outliers);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(DetectionParameters::strict().validate().is_ok());
        assert!(DetectionParameters::relaxed().validate().is_ok());
        assert!(DetectionParameters::strict().screen_outliers);
    }

    #[test]
    fn test_validate_rejects_degenerate_sizes() {
        let params = DetectionParameters::default().with_window_size(1);
        assert!(matches!(params.validate(), Err(Error::InvalidParameter(_))));

        let params = DetectionParameters::default().with_peek_size(0);
        assert!(matches!(params.validate(), Err(Error::InvalidParameter(_))));

        let params = DetectionParameters::default().with_min_span_days(-1);
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_thresholds() {
        let params = DetectionParameters::default().with_stability_threshold(0.0);
        assert!(params.validate().is_err());

        let params = DetectionParameters::default().with_accuracy_threshold(f64::NAN);
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_builder_setters() {
        let params = DetectionParameters::default()
            .with_window_size(12)
            .with_peek_size(5)
            .with_min_span_days(200)
            .with_outlier_screen(true)
            .with_tmask_bands(vec![0]);
        assert_eq!(params.window_size, 12);
        assert_eq!(params.peek_size, 5);
        assert_eq!(params.min_span_days, 200);
        assert!(params.screen_outliers);
        assert_eq!(params.tmask_bands, vec![0]);
    }
}
