//! Lasso regression by cyclic coordinate descent
//!
//! Minimises `(1/2n)·||y − Xw − b||² + alpha·||w||₁` with a free,
//! unpenalised intercept `b`. Columns and values are centred first, so
//! the intercept is recovered from the means after the descent.

use crate::design::{CoefficientCategory, HarmonicBasis};
use crate::model::FittedModel;
use crate::traits::{center_columns, check_inputs, column_means, Fitter};
use ccd_core::FitError;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default L1 penalty
pub const DEFAULT_ALPHA: f64 = 0.1;

/// Default iteration cap
pub const DEFAULT_MAX_ITER: usize = 1000;

/// Default relative tolerance on coefficient updates
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// L1-penalised least squares over a harmonic basis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lasso {
    basis: HarmonicBasis,
    alpha: f64,
    max_iter: usize,
    tolerance: f64,
}

impl Default for Lasso {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHA)
    }
}

impl Lasso {
    pub fn new(alpha: f64) -> Self {
        Self {
            basis: HarmonicBasis::default(),
            alpha,
            max_iter: DEFAULT_MAX_ITER,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    pub fn with_category(mut self, category: CoefficientCategory) -> Self {
        self.basis = HarmonicBasis::new(category);
        self
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn basis(&self) -> HarmonicBasis {
        self.basis
    }

    fn coordinate_descent(&self, x: &DMatrix<f64>, y: &[f64]) -> Vec<f64> {
        let (rows, cols) = x.shape();
        let penalty = self.alpha * rows as f64;
        let norms: Vec<f64> = x
            .column_iter()
            .map(|column| column.iter().map(|v| v * v).sum())
            .collect();

        let mut weights = vec![0.0; cols];
        let mut residual = y.to_vec();

        for iteration in 0..self.max_iter {
            let mut max_update = 0.0_f64;
            let mut max_weight = 0.0_f64;

            for j in 0..cols {
                if norms[j] == 0.0 {
                    continue;
                }
                let column = x.column(j);
                let previous = weights[j];
                let rho = column
                    .iter()
                    .zip(&residual)
                    .map(|(xij, r)| xij * r)
                    .sum::<f64>()
                    + norms[j] * previous;
                let updated = soft_threshold(rho, penalty) / norms[j];

                let delta = updated - previous;
                if delta != 0.0 {
                    for (r, xij) in residual.iter_mut().zip(column.iter()) {
                        *r -= xij * delta;
                    }
                }
                weights[j] = updated;
                max_update = max_update.max(delta.abs());
                max_weight = max_weight.max(updated.abs());
            }

            if max_weight == 0.0 || max_update / max_weight < self.tolerance {
                return weights;
            }
            if iteration + 1 == self.max_iter {
                debug!(
                    "lasso stopped after {} iterations, relative update {:.3e}",
                    self.max_iter,
                    max_update / max_weight
                );
            }
        }
        weights
    }
}

fn soft_threshold(value: f64, threshold: f64) -> f64 {
    if value > threshold {
        value - threshold
    } else if value < -threshold {
        value + threshold
    } else {
        0.0
    }
}

impl Fitter for Lasso {
    fn name(&self) -> &'static str {
        "lasso"
    }

    fn design_matrix(&self, times: &[i64]) -> DMatrix<f64> {
        self.basis.design_matrix(times)
    }

    fn fit_design(&self, design: &DMatrix<f64>, values: &[f64]) -> Result<FittedModel, FitError> {
        check_inputs(design, values)?;

        let rows = design.nrows() as f64;
        let means = column_means(design);
        let y_mean = values.iter().sum::<f64>() / rows;
        let centred = center_columns(design, &means);
        let y: Vec<f64> = values.iter().map(|v| v - y_mean).collect();

        let coefficients = self.coordinate_descent(&centred, &y);
        let intercept = y_mean
            - coefficients
                .iter()
                .zip(&means)
                .map(|(c, m)| c * m)
                .sum::<f64>();
        if !intercept.is_finite() {
            return Err(FitError::SolverFailed(
                "lasso solution is not finite".to_string(),
            ));
        }

        Ok(FittedModel::new(coefficients, intercept))
    }
}
