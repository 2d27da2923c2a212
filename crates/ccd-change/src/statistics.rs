//! Window statistics
//!
//! RMSE gates the initial window and is normalised by the window length.
//! Magnitude gates each extension and is the raw 2-norm of the residuals
//! over the whole cumulative window. Both are computed per band.

use ccd_core::utils::residual_norm;
use ccd_core::{Error, FitError, Result};
use ccd_regression::{DMatrix, FittedModel};
use tracing::trace;

fn residual_norms(
    models: &[FittedModel],
    design: &DMatrix<f64>,
    spectra: &[&[f64]],
) -> Result<Vec<f64>> {
    if models.len() != spectra.len() {
        return Err(Error::size_mismatch(models.len(), spectra.len(), "window spectra"));
    }
    models
        .iter()
        .zip(spectra)
        .map(|(model, observed)| {
            if observed.len() != design.nrows() {
                return Err(Error::size_mismatch(design.nrows(), observed.len(), "window band"));
            }
            let predicted = model.predict(design)?;
            Ok(residual_norm(&predicted, observed))
        })
        .collect()
}

/// Root mean squared error of each band's model over the window
pub fn rmse(models: &[FittedModel], design: &DMatrix<f64>, spectra: &[&[f64]]) -> Result<Vec<f64>> {
    if design.nrows() == 0 {
        return Err(FitError::EmptyWindow.into());
    }
    let scale = (design.nrows() as f64).sqrt();
    let errors: Vec<f64> = residual_norms(models, design, spectra)?
        .into_iter()
        .map(|norm| norm / scale)
        .collect();
    trace!(?errors, "window rmse");
    Ok(errors)
}

/// 2-norm of each band's residuals over the window
pub fn magnitudes(
    models: &[FittedModel],
    design: &DMatrix<f64>,
    spectra: &[&[f64]],
) -> Result<Vec<f64>> {
    let magnitudes = residual_norms(models, design, spectra)?;
    trace!(?magnitudes, "window magnitudes");
    Ok(magnitudes)
}

/// Every band's RMSE is strictly below `threshold`
pub fn stable(errors: &[f64], threshold: f64) -> bool {
    errors.iter().all(|e| *e < threshold)
}

/// Every band's magnitude is strictly below `threshold`
pub fn accurate(magnitudes: &[f64], threshold: f64) -> bool {
    magnitudes.iter().all(|m| *m < threshold)
}
