//! Continuous change detection for multi-band satellite time series
//!
//! This crate re-exports the workspace crates and adds the band-level
//! entry point: give it a pixel's dates, Landsat reflectance, thermal and
//! QA bands and get back one [`Detection`] per stable segment.
//!
//! - [`ccd_core`]: errors and detection parameters
//! - [`ccd_regression`]: design matrices and fitters
//! - [`ccd_tmask`]: the harmonic outlier mask
//! - [`ccd_change`]: initialization, extension and the detection driver
//! - [`ccd_qa`]: CFMask filtering and pixel categories
//!
//! # Example
//!
//! ```rust
//! use ccd::{detect, BandSeries, CcdConfig, FitterKind};
//!
//! let dates: Vec<i64> = (0..40).map(|i| 730_120 + 16 * i).collect();
//! let flat = |level: f64| vec![level; dates.len()];
//! let series = BandSeries {
//!     red: flat(500.0),
//!     green: flat(800.0),
//!     blue: flat(400.0),
//!     nir: flat(3000.0),
//!     swir1: flat(2000.0),
//!     swir2: flat(1200.0),
//!     thermal: flat(2950.0),
//!     qa: vec![0; dates.len()],
//!     dates,
//! };
//!
//! let config = CcdConfig::default().with_fitter(FitterKind::ols());
//! let detections = detect(&series, &config).unwrap();
//! assert_eq!(detections.len(), 1);
//! ```

pub mod bands;
pub mod batch;
pub mod detection;
pub mod sample;

pub use bands::{Band, BandSeries, CcdConfig};
pub use batch::detect_batch;
pub use detection::{detect, results_to_table, BandModel, Detection};
pub use sample::{read_sample, read_sample_from};

pub use ccd_change::{ChangeDetector, SegmentResult, Window, WindowResult};
pub use ccd_core::{DetectionParameters, Error, FitError, Result};
pub use ccd_qa::{Category, QaParameters};
pub use ccd_regression::{CoefficientCategory, FittedModel, Fitter, FitterKind, Lasso, OrdinaryLeastSquares};

pub use ccd_change;
pub use ccd_core;
pub use ccd_qa;
pub use ccd_regression;
pub use ccd_tmask;
