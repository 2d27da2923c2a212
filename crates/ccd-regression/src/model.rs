//! Fitted regression models

use ccd_core::FitError;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// A fitted linear model: `y = intercept + X · coefficients`
///
/// Models are immutable. When a window changes the old model is
/// discarded and a new one fitted in its place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedModel {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl FittedModel {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    /// Regression coefficients, one per design column
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Predict one value per design row
    pub fn predict(&self, design: &DMatrix<f64>) -> Result<Vec<f64>, FitError> {
        if design.ncols() != self.coefficients.len() {
            return Err(FitError::DesignMismatch {
                expected: self.coefficients.len(),
                actual: design.ncols(),
            });
        }
        let beta = DVector::from_column_slice(&self.coefficients);
        let fitted = design * beta;
        Ok(fitted.iter().map(|v| v + self.intercept).collect())
    }
}
