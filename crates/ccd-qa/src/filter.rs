//! Counting, ratios and observation indices over CFMask QA values

use crate::params::QaParameters;
use crate::{CLEAR, SNOW, WATER};
use ccd_core::{Error, Result};
use tracing::debug;

/// Clear or water observations
pub fn count_clear_or_water(qa: &[u8]) -> usize {
    qa.iter().filter(|&&q| q == CLEAR || q == WATER).count()
}

/// Observations carrying the fill code
pub fn count_fill(qa: &[u8], fill: u8) -> usize {
    qa.iter().filter(|&&q| q == fill).count()
}

pub fn count_snow(qa: &[u8]) -> usize {
    qa.iter().filter(|&&q| q == SNOW).count()
}

/// Non-fill observations
pub fn count_total(qa: &[u8], fill: u8) -> usize {
    qa.len() - count_fill(qa, fill)
}

/// Clear or water share of the non-fill observations
///
/// Zero when everything is fill.
pub fn ratio_clear(qa: &[u8], fill: u8) -> f64 {
    ratio(count_clear_or_water(qa), count_total(qa, fill))
}

/// Snow share of the clear, water and snow observations
pub fn ratio_snow(qa: &[u8]) -> f64 {
    let snow = count_snow(qa);
    ratio(snow, count_clear_or_water(qa) + snow)
}

fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

pub fn enough_clear(qa: &[u8], threshold: f64, fill: u8) -> bool {
    ratio_clear(qa, fill) >= threshold
}

pub fn enough_snow(qa: &[u8], threshold: f64) -> bool {
    ratio_snow(qa) >= threshold
}

/// Observations that are clear or water
pub fn clear_index(qa: &[u8]) -> Vec<bool> {
    qa.iter().map(|&q| q == CLEAR || q == WATER).collect()
}

/// Observations where every reflectance band lies strictly in `(0, ceiling)`
pub fn unsaturated_index(reflectance: &[Vec<f64>], ceiling: f64) -> Result<Vec<bool>> {
    let len = reflectance.first().map_or(0, Vec::len);
    check_lengths(reflectance, len)?;
    Ok((0..len)
        .map(|i| {
            reflectance
                .iter()
                .all(|band| band[i] > 0.0 && band[i] < ceiling)
        })
        .collect())
}

/// Thermal observations within `[min_kelvin, max_kelvin]`
///
/// Thermal values are stored as Kelvin scaled by ten; the bounds are not.
pub fn temperature_index(thermal: &[f64], min_kelvin: f64, max_kelvin: f64) -> Vec<bool> {
    let (low, high) = (min_kelvin * 10.0, max_kelvin * 10.0);
    thermal.iter().map(|&t| low <= t && t <= high).collect()
}

/// Observations kept by [`preprocess`]
#[derive(Debug, Clone, PartialEq)]
pub struct Filtered {
    pub dates: Vec<i64>,
    pub reflectance: Vec<Vec<f64>>,
    pub thermal: Vec<f64>,
    /// Input indices that were kept, in order
    pub kept: Vec<usize>,
}

impl Filtered {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Keep the observations that are clear or water, unsaturated in every
/// reflectance band and within the brightness temperature range
pub fn preprocess(
    dates: &[i64],
    reflectance: &[Vec<f64>],
    thermal: &[f64],
    qa: &[u8],
    params: &QaParameters,
) -> Result<Filtered> {
    let len = dates.len();
    check_lengths(reflectance, len)?;
    if thermal.len() != len {
        return Err(Error::size_mismatch(len, thermal.len(), "thermal band"));
    }
    if qa.len() != len {
        return Err(Error::size_mismatch(len, qa.len(), "qa band"));
    }

    let clear = clear_index(qa);
    let unsaturated = unsaturated_index(reflectance, params.saturation_ceiling)?;
    let temperate = temperature_index(thermal, params.min_kelvin, params.max_kelvin);

    let kept: Vec<usize> = (0..len)
        .filter(|&i| clear[i] && unsaturated[i] && temperate[i])
        .collect();
    debug!(kept = kept.len(), total = len, "qa preprocessing");

    Ok(Filtered {
        dates: kept.iter().map(|&i| dates[i]).collect(),
        reflectance: reflectance
            .iter()
            .map(|band| kept.iter().map(|&i| band[i]).collect())
            .collect(),
        thermal: kept.iter().map(|&i| thermal[i]).collect(),
        kept,
    })
}

fn check_lengths(bands: &[Vec<f64>], len: usize) -> Result<()> {
    for (index, band) in bands.iter().enumerate() {
        if band.len() != len {
            return Err(Error::size_mismatch(len, band.len(), &format!("band {index}")));
        }
    }
    Ok(())
}
