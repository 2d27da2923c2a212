//! Residual screening against the harmonic outlier model

use crate::design::design_matrix;
use ccd_core::utils::median;
use ccd_core::{Error, Result};
use ccd_regression::{lstsq, DMatrix};
use tracing::{debug, trace};

/// Observations that survived the mask
#[derive(Debug, Clone, PartialEq)]
pub struct Masked {
    pub times: Vec<i64>,
    /// Band-major values, one row per input band
    pub observations: Vec<Vec<f64>>,
    /// Input indices that were kept, in order
    pub kept: Vec<usize>,
}

impl Masked {
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Number of input observations dropped as outliers
    pub fn removed(&self, input_len: usize) -> usize {
        input_len.saturating_sub(self.kept.len())
    }
}

/// Per-band noise floor: median absolute value times `t_const`
pub fn adjusted_rmse(observations: &[Vec<f64>], t_const: f64) -> Vec<f64> {
    observations
        .iter()
        .map(|band| {
            let magnitudes: Vec<f64> = band.iter().map(|v| v.abs()).collect();
            median(&magnitudes) * t_const
        })
        .collect()
}

/// Absolute residuals of a least-squares fit of `values` on `design`
pub fn band_residuals(design: &DMatrix<f64>, values: &[f64]) -> Result<Vec<f64>> {
    let solution = lstsq(design, values)?;
    let predicted = solution.model.predict(design)?;
    Ok(predicted
        .iter()
        .zip(values)
        .map(|(p, v)| (p - v).abs())
        .collect())
}

/// Flag every time step that is an outlier on any selected band
pub fn outlier_flags(
    times: &[i64],
    observations: &[Vec<f64>],
    adjusted_rmse: &[f64],
    bands: &[usize],
) -> Result<Vec<bool>> {
    validate(times, observations, adjusted_rmse, bands)?;

    let mut flags = vec![false; times.len()];
    if times.is_empty() {
        return Ok(flags);
    }

    let design = design_matrix(times);
    for &band in bands {
        let residuals = band_residuals(&design, &observations[band])?;
        let threshold = adjusted_rmse[band];
        for (flag, residual) in flags.iter_mut().zip(&residuals) {
            if *residual > threshold {
                *flag = true;
            }
        }
        trace!(band, threshold, "screened band");
    }
    Ok(flags)
}

/// Remove outlying time steps from every band
///
/// A time step is kept only when its residual is within threshold on all
/// selected bands. `adjusted_rmse` is indexed by band and must cover every
/// band of `observations`.
pub fn mask(
    times: &[i64],
    observations: &[Vec<f64>],
    adjusted_rmse: &[f64],
    bands: &[usize],
) -> Result<Masked> {
    let flags = outlier_flags(times, observations, adjusted_rmse, bands)?;
    let kept: Vec<usize> = flags
        .iter()
        .enumerate()
        .filter_map(|(i, &outlier)| (!outlier).then_some(i))
        .collect();

    let removed = times.len() - kept.len();
    if removed > 0 {
        debug!(removed, total = times.len(), "outlier mask removed observations");
    }

    Ok(Masked {
        times: kept.iter().map(|&i| times[i]).collect(),
        observations: observations
            .iter()
            .map(|band| kept.iter().map(|&i| band[i]).collect())
            .collect(),
        kept,
    })
}

fn validate(
    times: &[i64],
    observations: &[Vec<f64>],
    adjusted_rmse: &[f64],
    bands: &[usize],
) -> Result<()> {
    if adjusted_rmse.len() != observations.len() {
        return Err(Error::size_mismatch(
            observations.len(),
            adjusted_rmse.len(),
            "adjusted RMSE thresholds",
        ));
    }
    for (index, band) in observations.iter().enumerate() {
        if band.len() != times.len() {
            return Err(Error::size_mismatch(
                times.len(),
                band.len(),
                &format!("band {index}"),
            ));
        }
        if band.iter().any(|v| !v.is_finite()) {
            return Err(Error::non_finite(&format!("band {index}")));
        }
    }
    if let Some(band) = bands.iter().find(|&&b| b >= observations.len()) {
        return Err(Error::InvalidParameter(format!(
            "mask band {band} out of range for {} bands",
            observations.len()
        )));
    }
    Ok(())
}
