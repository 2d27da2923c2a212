//! Signal generators shared by the integration tests

#![allow(dead_code)]

use ccd_regression::ANNUAL_CYCLE;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

/// Ordinal day of 2000-01-01
pub const EPOCH: i64 = 730_120;

/// `count` ordinal days `spacing` days apart, starting at [`EPOCH`]
pub fn days(count: usize, spacing: i64) -> Vec<i64> {
    (0..count as i64).map(|i| EPOCH + spacing * i).collect()
}

/// `base + amplitude·sin(annual cycle)` sampled at `times`
pub fn seasonal(times: &[i64], base: f64, amplitude: f64) -> Vec<f64> {
    times
        .iter()
        .map(|&t| base + amplitude * (ANNUAL_CYCLE * t as f64).sin())
        .collect()
}

/// Add seeded Gaussian noise
pub fn with_noise(values: &[f64], sigma: f64, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let normal = Normal::new(0.0, sigma).unwrap();
    values.iter().map(|v| v + normal.sample(&mut rng)).collect()
}

/// Add `delta` to every value from index `from` on
pub fn shifted(values: &[f64], from: usize, delta: f64) -> Vec<f64> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| if i >= from { v + delta } else { *v })
        .collect()
}

/// Stable seasonal bands with distinct levels
pub fn stable_bands(times: &[i64], count: usize) -> Vec<Vec<f64>> {
    (0..count)
        .map(|band| seasonal(times, 100.0 * (band + 1) as f64, 10.0 + band as f64))
        .collect()
}

/// (start, end) index pairs of each segment
pub fn boundaries(segments: &[ccd_change::SegmentResult]) -> Vec<(usize, usize)> {
    segments
        .iter()
        .map(|segment| (segment.start_index, segment.end_index))
        .collect()
}
