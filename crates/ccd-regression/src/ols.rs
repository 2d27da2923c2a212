//! Ordinary least squares
//!
//! Columns and values are centred before solving so the intercept is
//! estimated separately and the trend column, which holds raw ordinal
//! days, does not swamp the harmonic columns. The centred system is
//! solved with an SVD.

use crate::design::{CoefficientCategory, HarmonicBasis};
use crate::model::FittedModel;
use crate::traits::{center_columns, check_inputs, column_means, Fitter};
use ccd_core::FitError;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// Solution of a least-squares problem with intercept
#[derive(Debug, Clone, PartialEq)]
pub struct LeastSquares {
    pub model: FittedModel,
    /// Numerical rank of the centred design
    pub rank: usize,
}

/// Minimum-norm least squares with a free intercept
///
/// Rank-deficient designs are accepted: singular directions receive zero
/// weight, as with a pseudo-inverse.
pub fn lstsq(design: &DMatrix<f64>, values: &[f64]) -> Result<LeastSquares, FitError> {
    check_inputs(design, values)?;

    let (rows, cols) = design.shape();
    let means = column_means(design);
    let y_mean = values.iter().sum::<f64>() / rows as f64;

    if cols == 0 {
        return Ok(LeastSquares {
            model: FittedModel::new(Vec::new(), y_mean),
            rank: 0,
        });
    }

    let centred = center_columns(design, &means);
    let y = DVector::from_iterator(rows, values.iter().map(|v| v - y_mean));

    let svd = centred.svd(true, true);
    let largest = svd.singular_values.iter().cloned().fold(0.0_f64, f64::max);
    let eps = largest * rows.max(cols) as f64 * f64::EPSILON;
    let rank = svd.rank(eps);

    let beta = svd
        .solve(&y, eps)
        .map_err(|e| FitError::SolverFailed(e.to_string()))?;
    let coefficients: Vec<f64> = beta.iter().cloned().collect();
    if coefficients.iter().any(|c| !c.is_finite()) {
        return Err(FitError::SolverFailed(
            "least-squares solution is not finite".to_string(),
        ));
    }

    let intercept = y_mean
        - coefficients
            .iter()
            .zip(&means)
            .map(|(c, m)| c * m)
            .sum::<f64>();

    Ok(LeastSquares {
        model: FittedModel::new(coefficients, intercept),
        rank,
    })
}

/// Ordinary least squares over a harmonic basis
///
/// Unlike [`lstsq`], a rank-deficient window is a fit failure.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OrdinaryLeastSquares {
    basis: HarmonicBasis,
}

impl OrdinaryLeastSquares {
    pub fn new(category: CoefficientCategory) -> Self {
        Self {
            basis: HarmonicBasis::new(category),
        }
    }

    pub fn basis(&self) -> HarmonicBasis {
        self.basis
    }
}

impl Fitter for OrdinaryLeastSquares {
    fn name(&self) -> &'static str {
        "ols"
    }

    fn design_matrix(&self, times: &[i64]) -> DMatrix<f64> {
        self.basis.design_matrix(times)
    }

    fn fit_design(&self, design: &DMatrix<f64>, values: &[f64]) -> Result<FittedModel, FitError> {
        let solution = lstsq(design, values)?;
        if solution.rank < design.ncols() {
            return Err(FitError::Singular {
                rank: solution.rank,
                columns: design.ncols(),
            });
        }
        Ok(solution.model)
    }
}
