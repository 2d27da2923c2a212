//! Continuous change detection
//!
//! Finds structural breaks in multi-band time series by fitting per-band
//! regression models over a window that first slides until it is stable
//! and then grows until newly observed values stop matching the models.
//!
//! # Algorithm
//!
//! - **Initialization** ([`initialize`]): from a start index, take at least
//!   `window_size` observations spanning at least `min_span_days`, fit each
//!   band and accept the window once every band's RMSE is below the
//!   stability threshold. Unstable windows slide forward by one.
//! - **Extension** ([`extend`]): test the current models over the window
//!   plus `peek_size` more observations. Accurate steps refit and advance
//!   the end by one; the first inaccurate step marks a change.
//! - **Detection** ([`ChangeDetector`]): repeat from the end of each
//!   segment until the series is exhausted.
//!
//! Running out of data is not an error: detection simply returns fewer
//! segments. A failing regression fit aborts the call with
//! [`ccd_core::Error::Fit`].
//!
//! ## Usage
//!
//! ```rust
//! use ccd_change::ChangeDetector;
//! use ccd_regression::FitterKind;
//!
//! let times: Vec<i64> = (0..40).map(|i| 730_120 + 30 * i).collect();
//! let band: Vec<f64> = (0..40).map(|i| if i < 20 { 100.0 } else { 160.0 }).collect();
//!
//! let detector = ChangeDetector::with_defaults(FitterKind::ols());
//! let segments = detector.detect(&times, &[band]).unwrap();
//! assert!(!segments.is_empty());
//! ```

pub mod detect;
pub mod extend;
pub mod initialize;
pub mod series;
pub mod statistics;
pub mod types;

pub use detect::{detect, detect_windows, ChangeDetector};
pub use extend::{extend, extend_traced};
pub use initialize::{enough_samples, enough_time, find_time_index, initialize};
pub use series::TimeSeries;
pub use statistics::{accurate, magnitudes, rmse, stable};
pub use types::{Extension, ExtensionStep, SegmentResult, Window, WindowResult};
