//! Outlier mask for multi-band time series
//!
//! Fits a small harmonic model to a few designated bands and drops every
//! time step whose residual on any of them exceeds that band's adjusted
//! RMSE. The model combines the annual cycle with an "observation cycle"
//! stretched over the length of the series, so short series still get a
//! seasonal term.
//!
//! ```rust
//! use ccd_tmask::{adjusted_rmse, mask};
//!
//! let times: Vec<i64> = (0..30).map(|i| 730_120 + 16 * i).collect();
//! let mut band: Vec<f64> = vec![100.0; 30];
//! band[12] = 900.0;
//! let observations = vec![band];
//!
//! let thresholds = adjusted_rmse(&observations, 4.89);
//! let masked = mask(&times, &observations, &thresholds, &[0]).unwrap();
//! assert!(!masked.kept.contains(&12));
//! ```

pub mod design;
pub mod mask;

pub use design::{design_matrix, observation_cycle};
pub use mask::{adjusted_rmse, band_residuals, mask, outlier_flags, Masked};
