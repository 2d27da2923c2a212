//! The fitting capability injected into change detection

use crate::model::FittedModel;
use ccd_core::FitError;
use nalgebra::DMatrix;

/// Fits a regression model of observed values against ordinal days
///
/// A fitter owns its basis: [`Fitter::design_matrix`] builds the matrix it
/// regresses on, and the models it returns predict over that same matrix.
/// Callers that fit many windows of one series build the design once and
/// hand row ranges to [`Fitter::fit_design`].
pub trait Fitter: Send + Sync {
    /// Name of the fitting procedure
    fn name(&self) -> &'static str;

    /// Build the design matrix for the given ordinal days
    fn design_matrix(&self, times: &[i64]) -> DMatrix<f64>;

    /// Fit against a prebuilt design matrix
    fn fit_design(&self, design: &DMatrix<f64>, values: &[f64]) -> Result<FittedModel, FitError>;

    /// Fit observed values against ordinal days
    fn fit(&self, times: &[i64], values: &[f64]) -> Result<FittedModel, FitError> {
        self.fit_design(&self.design_matrix(times), values)
    }
}

impl<F: Fitter + ?Sized> Fitter for &F {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn design_matrix(&self, times: &[i64]) -> DMatrix<f64> {
        (**self).design_matrix(times)
    }

    fn fit_design(&self, design: &DMatrix<f64>, values: &[f64]) -> Result<FittedModel, FitError> {
        (**self).fit_design(design, values)
    }
}

/// Validate a design/values pair before fitting
pub(crate) fn check_inputs(design: &DMatrix<f64>, values: &[f64]) -> Result<(), FitError> {
    if design.nrows() == 0 {
        return Err(FitError::EmptyWindow);
    }
    if design.nrows() != values.len() {
        return Err(FitError::LengthMismatch {
            rows: design.nrows(),
            values: values.len(),
        });
    }
    if values.iter().chain(design.iter()).any(|v| !v.is_finite()) {
        return Err(FitError::NonFinite);
    }
    Ok(())
}

/// Column means of a design matrix
pub(crate) fn column_means(design: &DMatrix<f64>) -> Vec<f64> {
    let rows = design.nrows() as f64;
    design
        .column_iter()
        .map(|column| column.iter().sum::<f64>() / rows)
        .collect()
}

/// Subtract the given column means from every row
pub(crate) fn center_columns(design: &DMatrix<f64>, means: &[f64]) -> DMatrix<f64> {
    DMatrix::from_fn(design.nrows(), design.ncols(), |i, j| design[(i, j)] - means[j])
}
