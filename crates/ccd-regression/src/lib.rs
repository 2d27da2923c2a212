//! Regression models for continuous change detection
//!
//! Change detection only relies on the contract in [`Fitter`]: fit
//! observed values against ordinal days and get back a [`FittedModel`]
//! exposing `predict`, `coefficients` and `intercept`. This crate supplies
//! the harmonic design matrices that contract is built on and two
//! fitters, selected through the [`FitterKind`] strategy enum.
//!
//! ## Usage
//!
//! ```rust
//! use ccd_regression::{Fitter, FitterKind};
//!
//! let times: Vec<i64> = (0..24).map(|i| 730_120 + 30 * i).collect();
//! let values: Vec<f64> = times.iter().map(|&t| 100.0 + 0.01 * (t - 730_120) as f64).collect();
//!
//! let fitter = FitterKind::ols();
//! let model = fitter.fit(&times, &values).unwrap();
//! let predicted = model.predict(&fitter.design_matrix(&times)).unwrap();
//! assert!((predicted[0] - values[0]).abs() < 1e-6);
//! ```

pub mod design;
pub mod kind;
pub mod lasso;
pub mod model;
pub mod ols;
pub mod traits;

pub use design::{CoefficientCategory, HarmonicBasis, ANNUAL_CYCLE, DAYS_PER_YEAR};
pub use kind::FitterKind;
pub use lasso::Lasso;
pub use model::FittedModel;
pub use ols::{lstsq, LeastSquares, OrdinaryLeastSquares};
pub use traits::Fitter;

// Re-export so callers can name design matrices without depending on nalgebra
pub use nalgebra::DMatrix;
