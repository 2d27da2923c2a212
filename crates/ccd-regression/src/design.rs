//! Design matrices built from ordinal days
//!
//! Both the change models and the outlier mask regress observations on
//! periodic terms keyed to a 365.25-day year. The exact basis is part of
//! the compatibility contract: changing a column changes every fit.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Days in the annual cycle
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Angular frequency of the annual cycle, in radians per day
pub const ANNUAL_CYCLE: f64 = 2.0 * PI / DAYS_PER_YEAR;

/// Number of model coefficients, intercept included
///
/// Two for the linear trend, then two per harmonic: seasonal, bi-modal
/// and tri-modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CoefficientCategory {
    /// Trend plus annual harmonic
    #[default]
    Min,
    /// Adds the semiannual harmonic
    Mid,
    /// Adds the tri-annual harmonic
    Max,
}

impl CoefficientCategory {
    /// Total coefficient count including the intercept
    pub fn coefficient_count(self) -> usize {
        match self {
            CoefficientCategory::Min => 4,
            CoefficientCategory::Mid => 6,
            CoefficientCategory::Max => 8,
        }
    }

    /// Number of harmonic cos/sin pairs
    pub fn harmonics(self) -> usize {
        (self.coefficient_count() - 2) / 2
    }

    /// Design columns, i.e. coefficients without the intercept
    pub fn columns(self) -> usize {
        self.coefficient_count() - 1
    }
}

/// Linear trend plus annual harmonics
///
/// Column 0 holds the ordinal day, followed by `cos(k·a·t)` and
/// `sin(k·a·t)` for `k = 1..=harmonics` where `a` is [`ANNUAL_CYCLE`].
/// The intercept is not a column; fitters estimate it separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HarmonicBasis {
    category: CoefficientCategory,
}

impl HarmonicBasis {
    pub fn new(category: CoefficientCategory) -> Self {
        Self { category }
    }

    pub fn category(&self) -> CoefficientCategory {
        self.category
    }

    /// Number of design columns
    pub fn columns(&self) -> usize {
        self.category.columns()
    }

    /// Build the design matrix for the given ordinal days
    pub fn design_matrix(&self, times: &[i64]) -> DMatrix<f64> {
        DMatrix::from_fn(times.len(), self.columns(), |row, col| {
            let t = times[row] as f64;
            if col == 0 {
                return t;
            }
            let k = ((col + 1) / 2) as f64;
            let angle = k * ANNUAL_CYCLE * t;
            if col % 2 == 1 {
                angle.cos()
            } else {
                angle.sin()
            }
        })
    }
}
