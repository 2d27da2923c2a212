//! Registered fitting strategies
//!
//! Fitters are selected by value, not looked up by name at run time.

use crate::design::CoefficientCategory;
use crate::lasso::Lasso;
use crate::model::FittedModel;
use crate::ols::OrdinaryLeastSquares;
use crate::traits::Fitter;
use ccd_core::FitError;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

/// The fitters available to change detection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FitterKind {
    Ols(OrdinaryLeastSquares),
    Lasso(Lasso),
}

/// Ordinary least squares
///
/// A penalised fit leaves a residual on every observation, and the
/// extension magnitude accumulates it, so stable series would split.
impl Default for FitterKind {
    fn default() -> Self {
        FitterKind::ols()
    }
}

impl FitterKind {
    /// Ordinary least squares with the default basis
    pub fn ols() -> Self {
        FitterKind::Ols(OrdinaryLeastSquares::default())
    }

    /// Lasso with the given penalty and the default basis
    pub fn lasso(alpha: f64) -> Self {
        FitterKind::Lasso(Lasso::new(alpha))
    }

    /// Same strategy over a different coefficient category
    pub fn with_category(self, category: CoefficientCategory) -> Self {
        match self {
            FitterKind::Ols(_) => FitterKind::Ols(OrdinaryLeastSquares::new(category)),
            FitterKind::Lasso(lasso) => FitterKind::Lasso(lasso.with_category(category)),
        }
    }

    fn inner(&self) -> &dyn Fitter {
        match self {
            FitterKind::Ols(ols) => ols as &dyn Fitter,
            FitterKind::Lasso(lasso) => lasso as &dyn Fitter,
        }
    }
}

impl Fitter for FitterKind {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn design_matrix(&self, times: &[i64]) -> DMatrix<f64> {
        self.inner().design_matrix(times)
    }

    fn fit_design(&self, design: &DMatrix<f64>, values: &[f64]) -> Result<FittedModel, FitError> {
        self.inner().fit_design(design, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_ols() {
        assert_eq!(FitterKind::default(), FitterKind::ols());
        assert_eq!(FitterKind::default().name(), "ols");
        assert_eq!(FitterKind::lasso(0.1).name(), "lasso");
    }

    #[test]
    fn test_with_category_widens_design() {
        let kind = FitterKind::ols().with_category(CoefficientCategory::Mid);
        assert_eq!(kind.design_matrix(&[1, 2, 3]).ncols(), 5);

        let kind = FitterKind::lasso(0.5).with_category(CoefficientCategory::Max);
        assert_eq!(kind.design_matrix(&[1]).ncols(), 7);
        match kind {
            FitterKind::Lasso(lasso) => assert_eq!(lasso.alpha(), 0.5),
            _ => panic!("Wrong fitter kind"),
        }
    }

    #[test]
    fn test_dispatch_fits() {
        let times: Vec<i64> = (0..24).map(|i| 730_120 + 30 * i).collect();
        let values: Vec<f64> = times.iter().map(|&t| 3.0 + 0.001 * t as f64).collect();
        let model = FitterKind::ols().fit(&times, &values).unwrap();
        assert!((model.coefficients()[0] - 0.001).abs() < 1e-9);
    }
}
