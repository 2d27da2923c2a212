//! Detection over many independent pixels

use crate::bands::{BandSeries, CcdConfig};
use crate::detection::{detect, Detection};
use ccd_core::Result;

/// Detect change in every pixel, in input order
///
/// Pixels share nothing, so with the `parallel` feature they are spread
/// over the rayon thread pool. The output is identical either way.
#[cfg(feature = "parallel")]
pub fn detect_batch(pixels: &[BandSeries], config: &CcdConfig) -> Result<Vec<Vec<Detection>>> {
    use rayon::prelude::*;

    pixels.par_iter().map(|pixel| detect(pixel, config)).collect()
}

/// Detect change in every pixel, in input order
#[cfg(not(feature = "parallel"))]
pub fn detect_batch(pixels: &[BandSeries], config: &CcdConfig) -> Result<Vec<Vec<Detection>>> {
    pixels.iter().map(|pixel| detect(pixel, config)).collect()
}
